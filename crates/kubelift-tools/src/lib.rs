//! Kubelift Tools - manifest lifecycle operations
//!
//! This crate provides the operational layer of the manifest lifecycle:
//!
//! - [`ManifestStore`] - filesystem persistence of manifest text
//! - [`SchemaSource`] - definitions dictionary lookup (HTTP discovery or a
//!   preloaded static dictionary)
//! - [`ClusterSubmitter`] - idempotency-aware submission with two backends
//!   (native API call, kubectl shell-out) selected by configuration
//! - the four caller-facing tools (`explain_resource`, `save_manifest`,
//!   `submit_manifest`, `build_deployment`) and a [`ToolRegistry`] to hold
//!   them
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kubelift_core::ClusterContext;
//! use kubelift_tools::{lifecycle_registry, ManifestStore, HttpSchemaSource};
//! use kubelift_tools::submit::build_submitter;
//!
//! let context = ClusterContext::default().with_namespace("staging");
//! let store = Arc::new(ManifestStore::new(&context.store_dir));
//! let source = Arc::new(HttpSchemaSource::new(context.discovery_endpoint()?));
//! let submitter = build_submitter(&context)?;
//!
//! let registry = lifecycle_registry(store, source, submitter, &context.namespace);
//! let executor = registry.into_executor();
//! ```

pub mod registry;
pub mod source;
pub mod store;
pub mod submit;
pub mod tools;

pub use registry::{RegistryExecutor, ToolRegistry};
pub use source::{HttpSchemaSource, SchemaSource, StaticSchemaSource};
pub use store::ManifestStore;
pub use submit::{ApiSubmitter, ClusterSubmitter, KubectlSubmitter};
pub use tools::lifecycle::{
    BuildDeploymentTool, ExplainResourceTool, SaveManifestTool, SubmitManifestTool,
};

use std::sync::Arc;

/// Build a registry holding the four lifecycle tools wired to shared
/// collaborators. Collaborators are constructed once per process and handed
/// down; nothing here is a module-level global.
pub fn lifecycle_registry(
    store: Arc<ManifestStore>,
    source: Arc<dyn SchemaSource>,
    submitter: Arc<dyn ClusterSubmitter>,
    default_namespace: &str,
) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(ExplainResourceTool::new(source));
    registry.register(SaveManifestTool::new(store.clone()));
    registry.register(SubmitManifestTool::new(store.clone(), submitter, default_namespace));
    registry.register(BuildDeploymentTool::new(store));
    registry
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use super::registry::{RegistryExecutor, ToolRegistry};
    pub use super::source::{HttpSchemaSource, SchemaSource, StaticSchemaSource};
    pub use super::store::ManifestStore;
    pub use super::submit::{build_submitter, ClusterSubmitter};
    pub use kubelift_core::{
        ClusterContext, LiftError, LiftResult, SubmissionResult, Tool, ToolExecutor, ToolInput,
        ToolResult,
    };
}
