//! Tool implementations
//!
//! The four caller-facing lifecycle operations, each wrapped as a
//! [`kubelift_core::Tool`] with a JSON-schema argument description.

pub mod lifecycle;

/// Common utilities for tool implementations
pub mod common {
    use kubelift_core::ToolConfig;

    /// Create a standard JSON schema for a tool's arguments
    pub fn create_schema(properties: serde_json::Value, required: Vec<&str>) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required
        })
    }

    /// Create a tool config with a custom timeout
    pub fn tool_config(
        name: &str,
        description: &str,
        parameters: serde_json::Value,
        timeout_secs: u64,
    ) -> ToolConfig {
        ToolConfig::new(name, description, parameters).with_timeout(timeout_secs)
    }
}
