use anyhow::Result;
use serde_json::json;
use std::sync::Arc;

use kubelift_core::{ClusterContext, Tool, ToolInput};
use kubelift_tools::{ExplainResourceTool, HttpSchemaSource};

pub async fn run(context: &ClusterContext, kind: &str) -> Result<bool> {
    let source = Arc::new(HttpSchemaSource::new(context.discovery_endpoint()?));
    let tool = ExplainResourceTool::new(source);

    let result = tool.execute(ToolInput::new(json!({ "kind": kind }))).await?;

    if result.success {
        // The explanation is the payload here; print it directly instead of
        // wrapping it in JSON
        println!(
            "{} ({})",
            kind,
            result.data["definition_id"].as_str().unwrap_or("unknown")
        );
        print!("{}", result.data["explanation"].as_str().unwrap_or(""));
        Ok(true)
    } else {
        Ok(super::print_result(&result))
    }
}
