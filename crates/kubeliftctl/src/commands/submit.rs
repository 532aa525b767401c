use anyhow::Result;
use serde_json::json;
use std::sync::Arc;

use kubelift_core::{ClusterContext, Tool, ToolInput};
use kubelift_tools::submit::build_submitter;
use kubelift_tools::{ManifestStore, SubmitManifestTool};

pub async fn run(context: &ClusterContext, name: &str, namespace: Option<&str>) -> Result<bool> {
    let store = Arc::new(ManifestStore::new(&context.store_dir));
    let submitter = build_submitter(context)?;
    let tool = SubmitManifestTool::new(store, submitter, &context.namespace);

    let mut args = json!({ "name": name });
    if let Some(ns) = namespace {
        args["namespace"] = json!(ns);
    }

    let result = tool.execute(ToolInput::new(args)).await?;
    Ok(super::print_result(&result))
}
