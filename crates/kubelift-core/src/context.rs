//! Cluster context
//!
//! One explicit context object per process, constructed by the embedding
//! layer (CLI, agent runtime) and handed down to every operation. Credentials
//! are supplied externally; the context never locates or validates them.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::{LiftError, LiftResult};

/// Submission backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubmitBackend {
    /// Native API call against the cluster's REST endpoint
    Api,
    /// Shell out to kubectl on the local PATH
    #[default]
    Kubectl,
}

impl FromStr for SubmitBackend {
    type Err = LiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "api" => Ok(SubmitBackend::Api),
            "kubectl" => Ok(SubmitBackend::Kubectl),
            other => Err(LiftError::config(format!(
                "unknown submit backend '{}' (expected 'api' or 'kubectl')",
                other
            ))),
        }
    }
}

/// Per-process connection and storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterContext {
    /// Base URL of the cluster API server (required for the api backend)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Schema discovery endpoint; defaults to `<api_url>/openapi/v2`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discovery_url: Option<String>,

    /// Externally supplied kubeconfig path for the kubectl backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<PathBuf>,

    /// Default namespace for submissions
    pub namespace: String,

    /// Directory the manifest store writes into
    pub store_dir: PathBuf,

    /// Which backend handles submissions
    pub backend: SubmitBackend,
}

impl Default for ClusterContext {
    fn default() -> Self {
        Self {
            api_url: None,
            discovery_url: None,
            kubeconfig: None,
            namespace: "default".to_string(),
            store_dir: PathBuf::from("manifests"),
            backend: SubmitBackend::default(),
        }
    }
}

impl ClusterContext {
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    pub fn with_discovery_url(mut self, url: impl Into<String>) -> Self {
        self.discovery_url = Some(url.into());
        self
    }

    pub fn with_kubeconfig(mut self, path: impl Into<PathBuf>) -> Self {
        self.kubeconfig = Some(path.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_store_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.store_dir = dir.into();
        self
    }

    pub fn with_backend(mut self, backend: SubmitBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Resolve the schema discovery endpoint
    pub fn discovery_endpoint(&self) -> LiftResult<String> {
        if let Some(url) = &self.discovery_url {
            return Ok(url.clone());
        }
        match &self.api_url {
            Some(base) => Ok(format!("{}/openapi/v2", base.trim_end_matches('/'))),
            None => Err(LiftError::config(
                "schema discovery requires --discovery-url or --api-url",
            )),
        }
    }
}
