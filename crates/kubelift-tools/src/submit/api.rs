//! Native API submission backend
//!
//! Resolves `(apiVersion, kind)` to a concrete resource endpoint via the
//! cluster's dynamic discovery (`GET /api/v1` or `/apis/<group>/<version>`),
//! then POSTs the document as a create against the namespaced collection.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use kubelift_core::{LiftResult, ManifestDocument, SubmissionResult};

use super::ClusterSubmitter;

/// One entry of an `APIResourceList`
#[derive(Debug, Deserialize)]
struct ApiResource {
    /// Plural resource name; subresources carry a slash (`deployments/status`)
    name: String,
    kind: String,
}

#[derive(Debug, Deserialize)]
struct ApiResourceList {
    #[serde(default)]
    resources: Vec<ApiResource>,
}

/// Submits manifests via the cluster's REST API
pub struct ApiSubmitter {
    base_url: String,
    client: reqwest::Client,
}

impl ApiSubmitter {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Path prefix for a group/version: `apis/apps/v1`, or `api/v1` for the
    /// core group
    fn group_path(api_version: &str) -> String {
        if api_version.contains('/') {
            format!("apis/{}", api_version)
        } else {
            format!("api/{}", api_version)
        }
    }

    /// Resolve the plural collection name for a kind, or a classified outcome
    /// when resolution fails
    async fn resolve_plural(
        &self,
        api_version: &str,
        kind: &str,
    ) -> Result<String, SubmissionResult> {
        let url = format!("{}/{}", self.base_url, Self::group_path(api_version));
        debug!(url = %url, kind = %kind, "Resolving resource endpoint");

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                return Err(SubmissionResult::TransportError {
                    detail: format!("discovery request failed: {}", e),
                })
            }
        };

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(classify_discovery_failure(status, body, api_version, kind));
        }

        let list: ApiResourceList = match response.json().await {
            Ok(l) => l,
            Err(e) => {
                return Err(SubmissionResult::TransportError {
                    detail: format!("invalid discovery response: {}", e),
                })
            }
        };

        list.resources
            .into_iter()
            .find(|r| r.kind == kind && !r.name.contains('/'))
            .map(|r| r.name)
            .ok_or_else(|| SubmissionResult::Rejected {
                reason: format!("unknown resource type: {}/{}", api_version, kind),
            })
    }
}

/// Classify a failed discovery response. A 404 means the group/version does
/// not exist on this cluster, which is a semantic rejection; any other
/// failure status means the server could not answer the routing question at
/// all, so the attempt is a transport failure rather than a rejection.
fn classify_discovery_failure(
    status: u16,
    body: String,
    api_version: &str,
    kind: &str,
) -> SubmissionResult {
    if status == 404 {
        SubmissionResult::Rejected {
            reason: format!("unknown resource type: {}/{}", api_version, kind),
        }
    } else {
        SubmissionResult::TransportError {
            detail: format!("discovery returned {}: {}", status, body),
        }
    }
}

/// Classify a create response by status code, carrying the server's body
/// verbatim so callers can distinguish "already exists" from "malformed"
/// from "transport down"
fn classify_response(status: u16, body: String) -> SubmissionResult {
    match status {
        200..=299 => SubmissionResult::Created,
        409 => SubmissionResult::AlreadyExists { detail: body },
        _ => SubmissionResult::Rejected { reason: body },
    }
}

#[async_trait]
impl ClusterSubmitter for ApiSubmitter {
    async fn submit(
        &self,
        document: &ManifestDocument,
        namespace: &str,
    ) -> LiftResult<SubmissionResult> {
        document.require_submittable()?;

        let plural = match self.resolve_plural(&document.api_version, &document.kind).await {
            Ok(plural) => plural,
            Err(outcome) => return Ok(outcome),
        };

        let url = format!(
            "{}/{}/namespaces/{}/{}",
            self.base_url,
            Self::group_path(&document.api_version),
            namespace,
            plural
        );
        debug!(url = %url, kind = %document.kind, "Submitting manifest");

        let response = match self.client.post(&url).json(&document.body).send().await {
            Ok(r) => r,
            Err(e) => {
                return Ok(SubmissionResult::TransportError {
                    detail: format!("create request failed: {}", e),
                })
            }
        };

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Ok(classify_response(status, body))
    }
}
