//! Tool registry
//!
//! Central registration and discovery for lifecycle tools, plus an executor
//! that dispatches invocations by name with timing and tracing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use kubelift_core::{LiftError, LiftResult, Tool, ToolDefinition, ToolExecutor, ToolInput, ToolResult};

/// Registry of available tools
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single tool
    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> &mut Self {
        let name = tool.config().name.clone();
        info!(tool = %name, "Registering tool");
        self.tools.insert(name, Arc::new(tool));
        self
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// List all tool names
    pub fn list_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// List tool definitions
    pub fn list_definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.definition()).collect()
    }

    /// Get tool count
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Convert registry into an executor
    pub fn into_executor(self) -> RegistryExecutor {
        RegistryExecutor { tools: self.tools }
    }

    /// Create an executor without consuming the registry
    pub fn as_executor(&self) -> RegistryExecutor {
        RegistryExecutor {
            tools: self.tools.clone(),
        }
    }
}

/// Executor that dispatches to registered tools
pub struct RegistryExecutor {
    tools: HashMap<String, Arc<dyn Tool>>,
}

#[async_trait]
impl ToolExecutor for RegistryExecutor {
    async fn execute_tool(&self, name: &str, input: ToolInput) -> LiftResult<ToolResult> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| LiftError::tool(format!("Tool not found: {}", name)))?;

        debug!(tool = %name, "Executing tool");
        let start = std::time::Instant::now();

        match tool.execute(input).await {
            Ok(result) => {
                let elapsed = start.elapsed().as_millis() as u64;
                debug!(tool = %name, elapsed_ms = %elapsed, success = %result.success, "Tool execution complete");
                Ok(result.with_execution_time(elapsed))
            }
            Err(e) => {
                warn!(tool = %name, error = %e, "Tool execution failed");
                Err(e)
            }
        }
    }

    fn list_tools(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.definition()).collect()
    }

    fn get_tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }
}
