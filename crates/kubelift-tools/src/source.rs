//! Schema sources
//!
//! A schema source produces the cluster's definitions dictionary. The HTTP
//! source performs a read-only GET against the discovery endpoint on every
//! call (schema fetches are pure reads and safe to repeat); the static source
//! serves a preloaded dictionary for tests and offline use.

use async_trait::async_trait;
use tracing::debug;

use kubelift_core::{LiftError, LiftResult, SchemaDefinitions};

/// Produces the definitions dictionary
#[async_trait]
pub trait SchemaSource: Send + Sync {
    async fn definitions(&self) -> LiftResult<SchemaDefinitions>;
}

/// Fetches the definitions dictionary over HTTP(S)
pub struct HttpSchemaSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSchemaSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SchemaSource for HttpSchemaSource {
    async fn definitions(&self) -> LiftResult<SchemaDefinitions> {
        debug!(url = %self.url, "Fetching schema definitions");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LiftError::transport(format!("schema fetch failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LiftError::transport(format!(
                "schema fetch returned {} from {}",
                status, self.url
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| LiftError::transport(format!("schema fetch failed: {}", e)))?;

        let defs = SchemaDefinitions::from_json(&text)?;
        debug!(count = defs.definitions.len(), "Loaded schema definitions");
        Ok(defs)
    }
}

/// Serves a preloaded definitions dictionary
pub struct StaticSchemaSource {
    defs: SchemaDefinitions,
}

impl StaticSchemaSource {
    pub fn new(defs: SchemaDefinitions) -> Self {
        Self { defs }
    }
}

#[async_trait]
impl SchemaSource for StaticSchemaSource {
    async fn definitions(&self) -> LiftResult<SchemaDefinitions> {
        Ok(self.defs.clone())
    }
}
