// Kubelift Core - Foundation types for the manifest lifecycle manager
//
// This crate provides the typed building blocks for taking a Kubernetes
// manifest from schema lookup through persistence to cluster submission.

pub mod context;
pub mod deployment;
pub mod error;
pub mod manifest;
pub mod schema;
pub mod submission;
pub mod tool;

// Re-export core types
pub use context::{ClusterContext, SubmitBackend};
pub use deployment::build_deployment;
pub use error::{LiftError, LiftResult};
pub use manifest::ManifestDocument;
pub use schema::{FieldSpec, ResourceSchema, SchemaDefinitions};
pub use submission::SubmissionResult;
pub use tool::{Tool, ToolConfig, ToolDefinition, ToolExecutor, ToolInput, ToolResult};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
