//! kubectl submission backend
//!
//! Shells out to `kubectl create -f -` with the manifest on stdin. `create`
//! (not `apply`) keeps the submission contract identical to the API backend:
//! a second submission of an unchanged manifest is a conflict, not a silent
//! success.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use kubelift_core::{LiftResult, ManifestDocument, SubmissionResult};

use super::ClusterSubmitter;

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Submits manifests by shelling out to kubectl
pub struct KubectlSubmitter {
    kubeconfig: Option<PathBuf>,
    timeout_secs: u64,
}

impl KubectlSubmitter {
    pub fn new(kubeconfig: Option<PathBuf>) -> Self {
        Self {
            kubeconfig,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Check if kubectl is available on PATH
    pub fn is_available() -> bool {
        which::which("kubectl").is_ok()
    }

    async fn run_create(&self, yaml: &str, namespace: &str) -> SubmissionResult {
        let mut cmd = Command::new("kubectl");
        cmd.args(["create", "-f", "-", "-n", namespace]);
        if let Some(path) = &self.kubeconfig {
            cmd.arg("--kubeconfig").arg(path);
        }
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        // A timed-out or abandoned child must not keep running detached
        cmd.kill_on_drop(true);

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                return SubmissionResult::TransportError {
                    detail: format!("failed to spawn kubectl: {}", e),
                }
            }
        };

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(yaml.as_bytes()).await {
                return SubmissionResult::TransportError {
                    detail: format!("failed to write manifest to kubectl: {}", e),
                };
            }
            // Close stdin so kubectl sees EOF
        }

        let output = match wait_with_timeout(child, self.timeout_secs).await {
            Ok(output) => output,
            Err(outcome) => return outcome,
        };

        classify_output(
            output.status.success(),
            &String::from_utf8_lossy(&output.stderr),
        )
    }
}

/// Wait for the child with a deadline. On timeout the wait future is dropped,
/// which kills the child (it was spawned with `kill_on_drop`).
async fn wait_with_timeout(
    child: tokio::process::Child,
    timeout_secs: u64,
) -> Result<std::process::Output, SubmissionResult> {
    match tokio::time::timeout(Duration::from_secs(timeout_secs), child.wait_with_output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(SubmissionResult::TransportError {
            detail: format!("kubectl failed: {}", e),
        }),
        Err(_) => Err(SubmissionResult::TransportError {
            detail: format!("kubectl timed out after {}s", timeout_secs),
        }),
    }
}

/// Classify kubectl's exit status and stderr into a submission outcome
fn classify_output(success: bool, stderr: &str) -> SubmissionResult {
    if success {
        return SubmissionResult::Created;
    }

    let detail = stderr.trim().to_string();
    if detail.contains("already exists") || detail.contains("AlreadyExists") {
        SubmissionResult::AlreadyExists { detail }
    } else if detail.contains("doesn't have a resource type")
        || detail.contains("no matches for kind")
    {
        SubmissionResult::Rejected {
            reason: format!("unknown resource type: {}", detail),
        }
    } else {
        SubmissionResult::Rejected { reason: detail }
    }
}

#[async_trait]
impl ClusterSubmitter for KubectlSubmitter {
    async fn submit(
        &self,
        document: &ManifestDocument,
        namespace: &str,
    ) -> LiftResult<SubmissionResult> {
        document.require_submittable()?;

        let yaml = document.to_yaml()?;
        debug!(kind = %document.kind, namespace = %namespace, "Submitting via kubectl");
        Ok(self.run_create(&yaml, namespace).await)
    }
}
