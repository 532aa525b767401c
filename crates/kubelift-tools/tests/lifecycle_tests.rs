//! End-to-end lifecycle tests: build, save, load, explain, submit
//!
//! Submission runs against a scripted fake backend so the idempotency
//! contract (Created, then AlreadyExists with a non-empty detail body) can be
//! pinned without a cluster.

use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::tempdir;

use kubelift_core::{
    LiftResult, ManifestDocument, SchemaDefinitions, SubmissionResult, Tool, ToolExecutor,
    ToolInput,
};
use kubelift_tools::submit::ClusterSubmitter;
use kubelift_tools::{
    lifecycle_registry, ManifestStore, SchemaSource, StaticSchemaSource, SubmitManifestTool,
};

/// Behaves like a cluster for create calls: first submission of a given
/// manifest name succeeds, subsequent ones conflict.
struct FakeCluster {
    submissions: AtomicUsize,
}

impl FakeCluster {
    fn new() -> Self {
        Self {
            submissions: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ClusterSubmitter for FakeCluster {
    async fn submit(
        &self,
        document: &ManifestDocument,
        namespace: &str,
    ) -> LiftResult<SubmissionResult> {
        document.require_submittable()?;

        let attempt = self.submissions.fetch_add(1, Ordering::SeqCst);
        if attempt == 0 {
            Ok(SubmissionResult::Created)
        } else {
            Ok(SubmissionResult::AlreadyExists {
                detail: format!(
                    "deployments.apps \"{}\" already exists in namespace \"{}\"",
                    document.name().unwrap_or("unknown"),
                    namespace
                ),
            })
        }
    }
}

fn sample_definitions() -> SchemaDefinitions {
    serde_json::from_value(json!({
        "definitions": {
            "io.k8s.api.apps.v1.Deployment": {
                "description": "Deployment enables declarative updates for Pods",
                "properties": {
                    "metadata": {"$ref": "#/definitions/io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta"},
                    "spec": {"$ref": "#/definitions/io.k8s.api.apps.v1.DeploymentSpec"}
                }
            },
            "io.k8s.api.extensions.v1beta1.Deployment": {
                "description": "Deprecated"
            },
            "io.k8s.api.apps.v1.DeploymentSpec": {
                "properties": {
                    "replicas": {"type": "integer"},
                    "template": {"$ref": "#/definitions/io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta"}
                }
            },
            "io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta": {
                "properties": {
                    "name": {"type": "string"},
                    "labels": {"type": "object"}
                }
            }
        }
    }))
    .unwrap()
}

fn test_registry(
    store: Arc<ManifestStore>,
    submitter: Arc<dyn ClusterSubmitter>,
) -> kubelift_tools::ToolRegistry {
    let source: Arc<dyn SchemaSource> = Arc::new(StaticSchemaSource::new(sample_definitions()));
    lifecycle_registry(store, source, submitter, "default")
}

#[tokio::test]
async fn test_registry_exposes_the_four_operations() {
    let dir = tempdir().unwrap();
    let store = Arc::new(ManifestStore::new(dir.path()));
    let registry = test_registry(store, Arc::new(FakeCluster::new()));

    assert_eq!(
        registry.list_names(),
        vec![
            "build_deployment",
            "explain_resource",
            "save_manifest",
            "submit_manifest"
        ]
    );
}

#[tokio::test]
async fn test_build_save_submit_flow() {
    let dir = tempdir().unwrap();
    let store = Arc::new(ManifestStore::new(dir.path()));
    let executor = test_registry(store, Arc::new(FakeCluster::new())).into_executor();

    // Build and persist a deployment in one call
    let built = executor
        .execute_tool(
            "build_deployment",
            ToolInput::new(json!({
                "image": "nginx:latest",
                "port": 80,
                "name": "devs-deployment",
                "replicas": 3,
                "save_as": "devs-deployment.yaml"
            })),
        )
        .await
        .unwrap();
    assert!(built.success);
    assert_eq!(
        built.data["manifest"]["spec"]["selector"]["matchLabels"]["app"],
        "devs-deployment"
    );

    // Submit it
    let submitted = executor
        .execute_tool(
            "submit_manifest",
            ToolInput::new(json!({"name": "devs-deployment.yaml"})),
        )
        .await
        .unwrap();
    assert!(submitted.success);
    assert_eq!(submitted.data["submission"]["outcome"], "created");
    assert_eq!(submitted.data["namespace"], "default");
}

#[tokio::test]
async fn test_second_submission_reports_already_exists_with_detail() {
    let dir = tempdir().unwrap();
    let store = Arc::new(ManifestStore::new(dir.path()));
    let submitter = Arc::new(FakeCluster::new());
    let tool = SubmitManifestTool::new(store.clone(), submitter, "staging");

    let yaml = kubelift_core::build_deployment("nginx:latest", 80, "web", 2)
        .unwrap()
        .to_yaml()
        .unwrap();
    store.save("web.yaml", &yaml).await.unwrap();

    let first = tool
        .execute(ToolInput::new(json!({"name": "web.yaml"})))
        .await
        .unwrap();
    assert!(first.success);
    assert_eq!(first.data["submission"]["outcome"], "created");

    let second = tool
        .execute(ToolInput::new(json!({"name": "web.yaml"})))
        .await
        .unwrap();
    assert!(second.success);
    assert_eq!(second.data["submission"]["outcome"], "already_exists");

    let detail = second.data["submission"]["detail"].as_str().unwrap();
    assert!(!detail.is_empty());
    assert!(detail.contains("already exists"));
}

#[tokio::test]
async fn test_submit_unknown_name_fails_cleanly() {
    let dir = tempdir().unwrap();
    let store = Arc::new(ManifestStore::new(dir.path()));
    let executor = test_registry(store, Arc::new(FakeCluster::new())).into_executor();

    let result = executor
        .execute_tool("submit_manifest", ToolInput::new(json!({"name": "ghost.yaml"})))
        .await
        .unwrap();

    assert!(!result.success);
    assert!(result.error.unwrap().contains("ghost.yaml"));
}

#[tokio::test]
async fn test_submit_unroutable_manifest_is_rejected_locally() {
    let dir = tempdir().unwrap();
    let store = Arc::new(ManifestStore::new(dir.path()));
    store
        .save("orphan.yaml", "metadata:\n  name: orphan\n")
        .await
        .unwrap();

    let executor = test_registry(store, Arc::new(FakeCluster::new())).into_executor();
    let result = executor
        .execute_tool("submit_manifest", ToolInput::new(json!({"name": "orphan.yaml"})))
        .await
        .unwrap();

    assert!(!result.success);
    assert!(result.error.unwrap().contains("kind"));
}

#[tokio::test]
async fn test_explain_deployment_picks_apps_v1_and_expands_refs() {
    let dir = tempdir().unwrap();
    let store = Arc::new(ManifestStore::new(dir.path()));
    let executor = test_registry(store, Arc::new(FakeCluster::new())).into_executor();

    let result = executor
        .execute_tool("explain_resource", ToolInput::new(json!({"kind": "Deployment"})))
        .await
        .unwrap();

    assert!(result.success);
    // Two definitions share the Deployment suffix; the shortest qualified
    // name (apps/v1) must win deterministically.
    assert_eq!(result.data["definition_id"], "io.k8s.api.apps.v1.Deployment");

    let explanation = result.data["explanation"].as_str().unwrap();
    assert!(explanation.contains("metadata: object"));
    assert!(explanation.contains("  name: string"));
    assert!(explanation.contains("replicas: integer"));
    // ObjectMeta is referenced from both metadata and spec.template; each
    // branch gets its own full expansion
    assert!(explanation.contains("  template: object\n    labels: object\n    name: string"));
}

#[tokio::test]
async fn test_save_then_load_round_trip_via_tools() {
    let dir = tempdir().unwrap();
    let store = Arc::new(ManifestStore::new(dir.path()));
    let executor = test_registry(store.clone(), Arc::new(FakeCluster::new())).into_executor();

    let content = "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: settings\ndata:\n  key: value\n";
    let saved = executor
        .execute_tool(
            "save_manifest",
            ToolInput::new(json!({"name": "settings.yaml", "content": content})),
        )
        .await
        .unwrap();
    assert!(saved.success);

    let doc = store.load("settings.yaml").await.unwrap();
    assert_eq!(doc.kind, "ConfigMap");
    assert_eq!(doc.api_version, "v1");
    assert_eq!(doc.body["data"]["key"], "value");
}
