//! Cluster submission
//!
//! One submission contract, two backends: a native API call against the
//! cluster's REST endpoint and a kubectl shell-out. Both submit as a create
//! (never an upsert) and never retry - retrying a create is unsafe without
//! idempotency keys, and surfacing `AlreadyExists` to the caller is the
//! retry-safety mechanism.

pub mod api;
pub mod kubectl;

pub use api::ApiSubmitter;
pub use kubectl::KubectlSubmitter;

use async_trait::async_trait;
use std::sync::Arc;

use kubelift_core::{
    ClusterContext, LiftError, LiftResult, ManifestDocument, SubmissionResult, SubmitBackend,
};

/// Submits a manifest to a target namespace and classifies the outcome.
///
/// `Err` is reserved for local precondition failures (a document missing its
/// routing fields); every attempt that reaches a backend produces exactly one
/// [`SubmissionResult`] variant.
#[async_trait]
pub trait ClusterSubmitter: Send + Sync {
    async fn submit(
        &self,
        document: &ManifestDocument,
        namespace: &str,
    ) -> LiftResult<SubmissionResult>;
}

/// Construct the submitter selected by the context configuration
pub fn build_submitter(context: &ClusterContext) -> LiftResult<Arc<dyn ClusterSubmitter>> {
    match context.backend {
        SubmitBackend::Api => {
            let base_url = context.api_url.clone().ok_or_else(|| {
                LiftError::config("the api backend requires --api-url to be set")
            })?;
            Ok(Arc::new(ApiSubmitter::new(base_url)))
        }
        SubmitBackend::Kubectl => Ok(Arc::new(KubectlSubmitter::new(
            context.kubeconfig.clone(),
        ))),
    }
}
