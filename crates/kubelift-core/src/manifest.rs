//! Manifest document model
//!
//! A manifest is an untyped YAML document. Only the top-level `kind` and
//! `apiVersion` scalars are load-bearing for routing a submission; the rest
//! of the document is passed through opaquely.

use serde::{Deserialize, Serialize};

use crate::{LiftError, LiftResult};

/// A parsed manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestDocument {
    /// Resource kind (`Deployment`, `Service`, ...)
    pub kind: String,
    /// API version (`apps/v1`, `v1`, ...)
    pub api_version: String,
    /// The full document, passed through opaquely
    pub body: serde_json::Value,
}

impl ManifestDocument {
    /// Parse manifest text.
    ///
    /// Missing `kind` or `apiVersion` yield empty strings rather than an
    /// error: parsing is pass-through by contract, and [`require_submittable`]
    /// rejects such a document before it can reach the cluster.
    ///
    /// [`require_submittable`]: ManifestDocument::require_submittable
    pub fn parse(text: &str) -> LiftResult<Self> {
        let body: serde_json::Value = serde_yaml::from_str(text).map_err(|e| {
            let location = e.location();
            LiftError::parse_at(
                format!("invalid manifest: {}", e),
                location.as_ref().map(|l| l.line()),
                location.as_ref().map(|l| l.column()),
            )
        })?;

        let kind = top_level_str(&body, "kind");
        let api_version = top_level_str(&body, "apiVersion");

        Ok(Self {
            kind,
            api_version,
            body,
        })
    }

    /// Wrap an already-structured document
    pub fn from_body(body: serde_json::Value) -> Self {
        let kind = top_level_str(&body, "kind");
        let api_version = top_level_str(&body, "apiVersion");
        Self {
            kind,
            api_version,
            body,
        }
    }

    /// Name from `metadata.name`, if present
    pub fn name(&self) -> Option<&str> {
        self.body.get("metadata")?.get("name")?.as_str()
    }

    /// A document is submittable only when both routing fields are non-empty
    pub fn is_submittable(&self) -> bool {
        !self.kind.is_empty() && !self.api_version.is_empty()
    }

    /// Reject documents that cannot be routed to a cluster endpoint
    pub fn require_submittable(&self) -> LiftResult<()> {
        if self.kind.is_empty() {
            return Err(LiftError::validation(
                "manifest is missing a top-level 'kind' field",
            ));
        }
        if self.api_version.is_empty() {
            return Err(LiftError::validation(
                "manifest is missing a top-level 'apiVersion' field",
            ));
        }
        Ok(())
    }

    /// Serialize the document back to YAML
    pub fn to_yaml(&self) -> LiftResult<String> {
        serde_yaml::to_string(&self.body)
            .map_err(|e| LiftError::parse(format!("failed to serialize manifest: {}", e)))
    }
}

fn top_level_str(body: &serde_json::Value, key: &str) -> String {
    body.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}
