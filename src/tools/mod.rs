//! Tool system exposed to ReAct agents
//!
//! Tools are named external capabilities the model invokes by exact string
//! match on the action name. The interface is deliberately closed: metadata
//! for prompt rendering plus a single `execute` taking a JSON argument
//! object and returning text. Parameter hints in the metadata are rendered
//! into the system prompt but never validated against actual calls; a tool
//! that dislikes its arguments reports that through its textual result or an
//! error, both of which flow back to the model as observations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::AgentError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolMetadata {
    pub name: String,
    pub description: String,
    /// Free-form parameter hints rendered into the prompt, typically an
    /// object of `name -> "type - description"` strings.
    pub parameters: Value,
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn metadata(&self) -> ToolMetadata;
    async fn execute(&self, arguments: Value) -> Result<String, AgentError>;
}

/// Tool backed by a plain function or closure. Covers the common case of
/// thin glue tools (file helpers, format converters, delegation shims)
/// without a dedicated struct per tool.
pub struct FunctionTool {
    metadata: ToolMetadata,
    func: Box<dyn Fn(Value) -> Result<String, AgentError> + Send + Sync>,
}

impl FunctionTool {
    pub fn new<F>(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
        func: F,
    ) -> Self
    where
        F: Fn(Value) -> Result<String, AgentError> + Send + Sync + 'static,
    {
        FunctionTool {
            metadata: ToolMetadata {
                name: name.into(),
                description: description.into(),
                parameters,
            },
            func: Box::new(func),
        }
    }
}

#[async_trait]
impl Tool for FunctionTool {
    fn metadata(&self) -> ToolMetadata {
        self.metadata.clone()
    }

    async fn execute(&self, arguments: Value) -> Result<String, AgentError> {
        (self.func)(arguments)
    }
}

/// Name -> tool map handed to an agent at construction time.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register_tool(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.metadata().name.clone();
        self.tools.insert(name, tool);
    }

    /// Register a closure-backed tool, the dominant pattern for glue tools.
    pub fn register_function<F>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
        func: F,
    ) where
        F: Fn(Value) -> Result<String, AgentError> + Send + Sync + 'static,
    {
        self.register_tool(Arc::new(FunctionTool::new(
            name,
            description,
            parameters,
            func,
        )));
    }

    pub fn get_tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn list_tools(&self) -> Vec<ToolMetadata> {
        self.tools.values().map(|tool| tool.metadata()).collect()
    }

    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    pub fn into_map(self) -> HashMap<String, Arc<dyn Tool>> {
        self.tools
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn echo_tool() -> Arc<dyn Tool> {
        Arc::new(FunctionTool::new(
            "echo",
            "Echo the input text back",
            json!({"text": "string - text to echo"}),
            |args| {
                let text = args
                    .get("text")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default();
                Ok(text.to_string())
            },
        ))
    }

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = ToolRegistry::new();
        assert_eq!(registry.tool_count(), 0);

        registry.register_tool(echo_tool());
        assert_eq!(registry.tool_count(), 1);
        assert!(registry.get_tool("echo").is_some());
        assert!(registry.get_tool("nonexistent").is_none());
    }

    #[test]
    fn test_register_function() {
        let mut registry = ToolRegistry::new();
        registry.register_function(
            "list_directory",
            "List all files in a directory",
            json!({"path": "string - absolute path"}),
            |_args| Ok("(empty directory)".to_string()),
        );

        let tools = registry.list_tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "list_directory");
    }

    #[tokio::test]
    async fn test_function_tool_execute() {
        let tool = echo_tool();
        let result = tool.execute(json!({"text": "hi"})).await.unwrap();
        assert_eq!(result, "hi");
    }

    #[tokio::test]
    async fn test_function_tool_error_propagates() {
        let tool = FunctionTool::new("broken", "Always fails", json!({}), |_| {
            Err(AgentError::ToolError {
                tool_name: "broken".to_string(),
                message: "disk full".to_string(),
            })
        });
        let err = tool.execute(json!({})).await.unwrap_err();
        assert!(err.to_string().contains("disk full"));
    }
}
