//! Command implementations
//!
//! Each command wires the shared collaborators (store, schema source,
//! submitter) from the cluster context, invokes the matching lifecycle tool,
//! and prints the human-readable status line plus structured JSON detail.

pub mod build;
pub mod explain;
pub mod save;
pub mod submit;

use kubelift_core::ToolResult;

/// Print a tool result: status line first, then structured detail as JSON
pub(crate) fn print_result(result: &ToolResult) -> bool {
    if let Some(message) = result.data.get("message").and_then(|m| m.as_str()) {
        println!("{}", message);
    }
    if let Some(error) = &result.error {
        eprintln!("error: {}", error);
    }
    if !result.data.is_null() {
        match serde_json::to_string_pretty(&result.data) {
            Ok(detail) => println!("{}", detail),
            Err(_) => println!("{}", result.data),
        }
    }
    result.success
}
