//! Manifest lifecycle tools
//!
//! - `explain_resource` - schema lookup plus recursive field explanation
//! - `save_manifest` - persist manifest text under a caller-chosen name
//! - `submit_manifest` - load a stored manifest and submit it to the cluster
//! - `build_deployment` - synthesize a Deployment manifest from a few inputs
//!
//! Tools hold shared collaborators behind `Arc`; they are constructed once
//! per process from a [`kubelift_core::ClusterContext`] and handed down.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

use kubelift_core::{
    build_deployment, LiftResult, SubmissionResult, Tool, ToolConfig, ToolInput, ToolResult,
};

use super::common::{create_schema, tool_config};
use crate::source::SchemaSource;
use crate::store::ManifestStore;
use crate::submit::ClusterSubmitter;

// ============================================================================
// Explain Resource Tool
// ============================================================================

/// Explain the fields of a resource kind
pub struct ExplainResourceTool {
    config: ToolConfig,
    source: Arc<dyn SchemaSource>,
}

impl ExplainResourceTool {
    pub fn new(source: Arc<dyn SchemaSource>) -> Self {
        let parameters = create_schema(
            json!({
                "kind": {
                    "type": "string",
                    "description": "Resource kind in the cluster's canonical casing (e.g. 'Deployment', not 'deployment'). Casing is not normalized."
                }
            }),
            vec!["kind"],
        );

        Self {
            config: tool_config(
                "explain_resource",
                "Look up the schema for a Kubernetes resource kind and return an indented field tree (name: type, references expanded).",
                parameters,
                60,
            ),
            source,
        }
    }
}

#[async_trait]
impl Tool for ExplainResourceTool {
    async fn execute(&self, input: ToolInput) -> LiftResult<ToolResult> {
        let kind: String = input.get_arg("kind")?;

        debug!(kind = %kind, "Explaining resource");

        let defs = match self.source.definitions().await {
            Ok(defs) => defs,
            Err(e) => return Ok(ToolResult::error(e.to_string())),
        };

        match defs.explain_kind(&kind) {
            Ok((definition_id, explanation)) => Ok(ToolResult::success(json!({
                "kind": kind,
                "definition_id": definition_id,
                "explanation": explanation
            }))),
            Err(e) => Ok(ToolResult::error_with_detail(
                e.to_string(),
                json!({ "kind": kind }),
            )),
        }
    }

    fn config(&self) -> &ToolConfig {
        &self.config
    }
}

// ============================================================================
// Save Manifest Tool
// ============================================================================

/// Persist manifest text under a caller-chosen name
pub struct SaveManifestTool {
    config: ToolConfig,
    store: Arc<ManifestStore>,
}

impl SaveManifestTool {
    pub fn new(store: Arc<ManifestStore>) -> Self {
        let parameters = create_schema(
            json!({
                "name": {
                    "type": "string",
                    "description": "File name to store the manifest under (e.g. 'web-deployment.yaml'). An existing entry with the same name is overwritten."
                },
                "content": {
                    "type": "string",
                    "description": "Manifest text (YAML)"
                }
            }),
            vec!["name", "content"],
        );

        Self {
            config: tool_config(
                "save_manifest",
                "Save manifest text to the manifest store. Overwrites any existing entry; last writer wins.",
                parameters,
                30,
            ),
            store,
        }
    }
}

#[async_trait]
impl Tool for SaveManifestTool {
    async fn execute(&self, input: ToolInput) -> LiftResult<ToolResult> {
        let name: String = input.get_arg("name")?;
        let content: String = input.get_arg("content")?;

        match self.store.save(&name, &content).await {
            Ok(path) => Ok(ToolResult::success(json!({
                "name": name,
                "path": path.display().to_string(),
                "bytes": content.len(),
                "message": format!("manifest '{}' saved", name)
            }))),
            Err(e) => Ok(ToolResult::error_with_detail(
                e.to_string(),
                json!({ "name": name }),
            )),
        }
    }

    fn config(&self) -> &ToolConfig {
        &self.config
    }
}

// ============================================================================
// Submit Manifest Tool
// ============================================================================

/// Load a stored manifest and submit it to the cluster
pub struct SubmitManifestTool {
    config: ToolConfig,
    store: Arc<ManifestStore>,
    submitter: Arc<dyn ClusterSubmitter>,
    default_namespace: String,
}

impl SubmitManifestTool {
    pub fn new(
        store: Arc<ManifestStore>,
        submitter: Arc<dyn ClusterSubmitter>,
        default_namespace: impl Into<String>,
    ) -> Self {
        let parameters = create_schema(
            json!({
                "name": {
                    "type": "string",
                    "description": "Name of a stored manifest (as given to save_manifest)"
                },
                "namespace": {
                    "type": "string",
                    "description": "Target namespace (optional, defaults to the configured namespace)"
                }
            }),
            vec!["name"],
        );

        Self {
            config: tool_config(
                "submit_manifest",
                "Submit a stored manifest to the cluster as a create. Never retries; a duplicate submission reports 'already exists' rather than failing opaquely.",
                parameters,
                120,
            ),
            store,
            submitter,
            default_namespace: default_namespace.into(),
        }
    }
}

#[async_trait]
impl Tool for SubmitManifestTool {
    async fn execute(&self, input: ToolInput) -> LiftResult<ToolResult> {
        let name: String = input.get_arg("name")?;
        let namespace: String = input
            .get_arg("namespace")
            .unwrap_or_else(|_| self.default_namespace.clone());

        let document = match self.store.load(&name).await {
            Ok(doc) => doc,
            Err(e) => {
                return Ok(ToolResult::error_with_detail(
                    e.to_string(),
                    json!({ "name": name }),
                ))
            }
        };

        if let Err(e) = document.require_submittable() {
            return Ok(ToolResult::error_with_detail(
                e.to_string(),
                json!({ "name": name, "kind": document.kind, "apiVersion": document.api_version }),
            ));
        }

        debug!(name = %name, kind = %document.kind, namespace = %namespace, "Submitting stored manifest");

        let outcome = self.submitter.submit(&document, &namespace).await?;
        let summary = outcome.summary(&document.kind, &namespace);
        let detail = json!({
            "name": name,
            "kind": document.kind,
            "apiVersion": document.api_version,
            "namespace": namespace,
            "submission": &outcome,
            "message": summary
        });

        // Created and AlreadyExists are both successful attempts; the outcome
        // tag keeps them distinguishable for callers that care.
        match outcome {
            SubmissionResult::Created | SubmissionResult::AlreadyExists { .. } => {
                Ok(ToolResult::success(detail))
            }
            SubmissionResult::Rejected { .. } | SubmissionResult::TransportError { .. } => {
                Ok(ToolResult::error_with_detail(summary, detail))
            }
        }
    }

    fn config(&self) -> &ToolConfig {
        &self.config
    }
}

// ============================================================================
// Build Deployment Tool
// ============================================================================

/// Synthesize a Deployment manifest from image/port/name/replicas
pub struct BuildDeploymentTool {
    config: ToolConfig,
    store: Arc<ManifestStore>,
}

impl BuildDeploymentTool {
    pub fn new(store: Arc<ManifestStore>) -> Self {
        let parameters = create_schema(
            json!({
                "image": {
                    "type": "string",
                    "description": "Container image (e.g. 'nginx:latest')"
                },
                "port": {
                    "type": "integer",
                    "description": "Container port to expose"
                },
                "name": {
                    "type": "string",
                    "description": "Deployment name; also used as the app label and selector"
                },
                "replicas": {
                    "type": "integer",
                    "description": "Number of pod replicas (must be positive)"
                },
                "save_as": {
                    "type": "string",
                    "description": "Optional store name to persist the generated manifest under"
                }
            }),
            vec!["image", "port", "name", "replicas"],
        );

        Self {
            config: tool_config(
                "build_deployment",
                "Build a Deployment manifest with one container, default resource requests/limits, and matching app label/selector. Optionally saves it to the manifest store.",
                parameters,
                30,
            ),
            store,
        }
    }
}

#[async_trait]
impl Tool for BuildDeploymentTool {
    async fn execute(&self, input: ToolInput) -> LiftResult<ToolResult> {
        let image: String = input.get_arg("image")?;
        let port: u16 = input.get_arg("port")?;
        let name: String = input.get_arg("name")?;
        let replicas: i32 = input.get_arg("replicas")?;
        let save_as: Option<String> = input.get_arg("save_as").ok();

        let document = match build_deployment(&image, port, &name, replicas) {
            Ok(doc) => doc,
            Err(e) => return Ok(ToolResult::error(e.to_string())),
        };

        let yaml = document.to_yaml()?;

        let saved_path = if let Some(store_name) = &save_as {
            match self.store.save(store_name, &yaml).await {
                Ok(path) => Some(path.display().to_string()),
                Err(e) => {
                    return Ok(ToolResult::error_with_detail(
                        e.to_string(),
                        json!({ "name": name, "save_as": store_name }),
                    ))
                }
            }
        } else {
            None
        };

        Ok(ToolResult::success(json!({
            "name": name,
            "manifest": document.body,
            "yaml": yaml,
            "saved_as": save_as,
            "saved_path": saved_path
        })))
    }

    fn config(&self) -> &ToolConfig {
        &self.config
    }
}
