use anyhow::{Context as _, Result};
use serde_json::json;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

use kubelift_core::{ClusterContext, Tool, ToolInput};
use kubelift_tools::{ManifestStore, SaveManifestTool};

pub async fn run(context: &ClusterContext, name: &str, file: &str) -> Result<bool> {
    let content = if file == "-" {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("failed to read manifest from stdin")?;
        buf
    } else {
        tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("failed to read manifest file '{}'", file))?
    };

    let store = Arc::new(ManifestStore::new(&context.store_dir));
    let tool = SaveManifestTool::new(store);

    let result = tool
        .execute(ToolInput::new(json!({ "name": name, "content": content })))
        .await?;
    Ok(super::print_result(&result))
}
