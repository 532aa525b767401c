//! Tool abstraction
//!
//! Each lifecycle operation (explain, save, submit, build) is exposed as a
//! tool with a JSON-schema parameter description so that agent and CLI layers
//! can discover and invoke them uniformly.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{LiftError, LiftResult};

/// Tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Tool name (unique within a registry)
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// JSON Schema for the tool's arguments
    pub parameters: serde_json::Value,
    /// Execution timeout in seconds
    pub timeout_secs: u64,
}

impl ToolConfig {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            timeout_secs: 30,
        }
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Tool definition as presented to callers (agents, CLIs)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Input arguments for a tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInput {
    /// Arguments as a JSON object
    pub args: serde_json::Value,
}

impl ToolInput {
    pub fn new(args: serde_json::Value) -> Self {
        Self { args }
    }

    /// Extract a typed argument by name
    pub fn get_arg<T: DeserializeOwned>(&self, key: &str) -> LiftResult<T> {
        let value = self
            .args
            .get(key)
            .ok_or_else(|| LiftError::tool(format!("Missing argument: {}", key)))?;
        serde_json::from_value(value.clone())
            .map_err(|e| LiftError::tool(format!("Invalid argument '{}': {}", key, e)))
    }
}

/// Tool execution result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub data: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ToolResult {
    /// Successful result with structured data
    pub fn success(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data,
            error: None,
            execution_time_ms: None,
        }
    }

    /// Failed result with a short message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: serde_json::Value::Null,
            error: Some(message.into()),
            execution_time_ms: None,
        }
    }

    /// Failed result carrying structured detail alongside the message
    pub fn error_with_detail(message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            success: false,
            data,
            error: Some(message.into()),
            execution_time_ms: None,
        }
    }

    pub fn with_execution_time(mut self, elapsed_ms: u64) -> Self {
        self.execution_time_ms = Some(elapsed_ms);
        self
    }
}

/// A single invocable tool
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with the given input
    async fn execute(&self, input: ToolInput) -> LiftResult<ToolResult>;

    /// Tool configuration
    fn config(&self) -> &ToolConfig;

    /// Definition presented to callers
    fn definition(&self) -> ToolDefinition {
        let config = self.config();
        ToolDefinition {
            name: config.name.clone(),
            description: config.description.clone(),
            parameters: config.parameters.clone(),
        }
    }
}

/// Executes tools by name
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute_tool(&self, name: &str, input: ToolInput) -> LiftResult<ToolResult>;

    fn list_tools(&self) -> Vec<ToolDefinition>;

    fn get_tool(&self, name: &str) -> Option<Arc<dyn Tool>>;
}
