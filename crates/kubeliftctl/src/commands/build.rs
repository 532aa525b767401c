use anyhow::Result;
use serde_json::json;
use std::sync::Arc;

use kubelift_core::{ClusterContext, Tool, ToolInput};
use kubelift_tools::{BuildDeploymentTool, ManifestStore};

pub async fn run(
    context: &ClusterContext,
    image: &str,
    port: u16,
    name: &str,
    replicas: i32,
    save_as: Option<&str>,
) -> Result<bool> {
    let store = Arc::new(ManifestStore::new(&context.store_dir));
    let tool = BuildDeploymentTool::new(store);

    let mut args = json!({
        "image": image,
        "port": port,
        "name": name,
        "replicas": replicas
    });
    if let Some(store_name) = save_as {
        args["save_as"] = json!(store_name);
    }

    let result = tool.execute(ToolInput::new(args)).await?;

    if result.success {
        if let Some(path) = result.data["saved_path"].as_str() {
            eprintln!("saved to {}", path);
        }
        // YAML is the useful form of the output; print it bare so it can be
        // piped straight into a file or kubectl
        print!("{}", result.data["yaml"].as_str().unwrap_or(""));
        Ok(true)
    } else {
        Ok(super::print_result(&result))
    }
}
