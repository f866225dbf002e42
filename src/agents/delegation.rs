//! Sub-agent delegation tool.

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use crate::errors::AgentError;
use crate::react::ReActAgent;
use crate::tools::{Tool, ToolMetadata};

/// Exposes a whole `ReActAgent` as a single tool. The supervisor invokes it
/// with a `task` string; the sub-agent runs its full loop and the outcome is
/// rendered as a `SUCCESS:` or `FAILED:` observation so the supervisor can
/// react to it in text. Sub-agent failures are reported, never raised: a
/// failed delegation is feedback, not a supervisor crash.
pub struct SubAgentTool {
    metadata: ToolMetadata,
    agent: Mutex<ReActAgent>,
}

impl SubAgentTool {
    pub fn new(
        tool_name: impl Into<String>,
        description: impl Into<String>,
        agent: ReActAgent,
    ) -> Self {
        let tool_name = tool_name.into();
        let agent_name = agent.name().to_string();
        Self {
            metadata: ToolMetadata {
                name: tool_name,
                description: description.into(),
                parameters: json!({
                    "task": format!("string - task description for the {} agent", agent_name),
                }),
            },
            agent: Mutex::new(agent),
        }
    }
}

#[async_trait]
impl Tool for SubAgentTool {
    fn metadata(&self) -> ToolMetadata {
        self.metadata.clone()
    }

    async fn execute(&self, arguments: Value) -> Result<String, AgentError> {
        let task = arguments
            .get("task")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AgentError::ToolError {
                tool_name: self.metadata.name.clone(),
                message: "missing required 'task' argument".to_string(),
            })?;

        let mut agent = self.agent.lock().await;
        log::info!("Delegating to {}: {}", agent.name(), task);
        let result = agent.run(task).await;

        if result.success {
            Ok(format!("SUCCESS: {}", result.answer))
        } else {
            Ok(format!(
                "FAILED: {}",
                result.error.unwrap_or_else(|| "no answer produced".to_string())
            ))
        }
    }
}
