//! Submission outcome classification
//!
//! Every submission attempt that reaches a backend produces exactly one
//! outcome. `AlreadyExists` is deliberately not an error: it is the signal
//! that makes a non-retried create safe, and whether a caller treats it as
//! success is the caller's decision.

use serde::{Deserialize, Serialize};

/// Outcome of a single submission attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionResult {
    /// Resource was created
    Created,
    /// A resource with the same name/namespace already exists; carries the
    /// server's detail body verbatim
    AlreadyExists { detail: String },
    /// Server-side semantic rejection (unknown resource type, validation
    /// failure) with the server's error body
    Rejected { reason: String },
    /// Network/transport failure before a response was obtained
    TransportError { detail: String },
}

impl SubmissionResult {
    pub fn is_created(&self) -> bool {
        matches!(self, SubmissionResult::Created)
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, SubmissionResult::AlreadyExists { .. })
    }

    /// Short human-readable status line
    pub fn summary(&self, kind: &str, namespace: &str) -> String {
        match self {
            SubmissionResult::Created => {
                format!("{} created in namespace '{}'", kind, namespace)
            }
            SubmissionResult::AlreadyExists { .. } => {
                format!("{} already exists in namespace '{}'", kind, namespace)
            }
            SubmissionResult::Rejected { reason } => {
                format!("{} rejected by the cluster: {}", kind, reason)
            }
            SubmissionResult::TransportError { detail } => {
                format!("could not reach the cluster: {}", detail)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialized_tag_distinguishes_outcomes() {
        let created = serde_json::to_value(SubmissionResult::Created).unwrap();
        assert_eq!(created, json!({"outcome": "created"}));

        let exists = serde_json::to_value(SubmissionResult::AlreadyExists {
            detail: "deployments.apps \"web\" already exists".into(),
        })
        .unwrap();
        assert_eq!(exists["outcome"], "already_exists");
        assert!(exists["detail"].as_str().unwrap().contains("web"));
    }

    #[test]
    fn test_summary_lines() {
        let summary = SubmissionResult::Created.summary("Deployment", "default");
        assert_eq!(summary, "Deployment created in namespace 'default'");

        let summary = SubmissionResult::TransportError {
            detail: "connection refused".into(),
        }
        .summary("Deployment", "default");
        assert!(summary.contains("connection refused"));
    }
}
