//! Deployment manifest builder
//!
//! Convenience constructor for the common "scaled container deployment" case:
//! one container, fixed default resource requests/limits, pod template and
//! selector labeled `app=<name>`. Pure and side-effect free.

use serde_json::json;

use crate::manifest::ManifestDocument;
use crate::{LiftError, LiftResult};

/// Default resource requests applied to the container
pub const DEFAULT_CPU_REQUEST: &str = "100m";
pub const DEFAULT_MEMORY_REQUEST: &str = "200Mi";

/// Default resource limits applied to the container
pub const DEFAULT_CPU_LIMIT: &str = "500m";
pub const DEFAULT_MEMORY_LIMIT: &str = "500Mi";

/// Build a Deployment manifest.
///
/// Rejects empty `image`/`name` and `replicas <= 0` up front instead of
/// constructing a manifest the cluster would reject later.
pub fn build_deployment(
    image: &str,
    container_port: u16,
    name: &str,
    replicas: i32,
) -> LiftResult<ManifestDocument> {
    if name.trim().is_empty() {
        return Err(LiftError::validation("deployment name must not be empty"));
    }
    if image.trim().is_empty() {
        return Err(LiftError::validation("container image must not be empty"));
    }
    if replicas <= 0 {
        return Err(LiftError::validation(format!(
            "replicas must be positive, got {}",
            replicas
        )));
    }

    let body = json!({
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": {
            "name": name,
            "labels": { "app": name }
        },
        "spec": {
            "replicas": replicas,
            "selector": {
                "matchLabels": { "app": name }
            },
            "template": {
                "metadata": {
                    "labels": { "app": name }
                },
                "spec": {
                    "containers": [{
                        "name": name,
                        "image": image,
                        "ports": [{ "containerPort": container_port }],
                        "resources": {
                            "requests": {
                                "cpu": DEFAULT_CPU_REQUEST,
                                "memory": DEFAULT_MEMORY_REQUEST
                            },
                            "limits": {
                                "cpu": DEFAULT_CPU_LIMIT,
                                "memory": DEFAULT_MEMORY_LIMIT
                            }
                        }
                    }]
                }
            }
        }
    });

    Ok(ManifestDocument::from_body(body))
}
