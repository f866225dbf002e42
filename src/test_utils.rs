//! Shared test doubles: scripted chat clients and canned tools.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use crate::core_types::{LLMResponse, Message};
use crate::errors::AgentError;
use crate::llm::ChatClient;
use crate::tools::{FunctionTool, Tool};

pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Chat client that replays a fixed script of completions (or errors) and
/// records every request it receives.
pub struct ScriptedClient {
    script: Mutex<VecDeque<Result<String, AgentError>>>,
    requests: Mutex<Vec<Vec<Message>>>,
    calls: AtomicUsize,
}

impl ScriptedClient {
    pub fn with_steps(script: Vec<Result<String, AgentError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_responses(responses: Vec<String>) -> Self {
        Self::with_steps(responses.into_iter().map(Ok).collect())
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for ScriptedClient {
    async fn chat(&self, _model: &str, messages: &[Message]) -> Result<LLMResponse, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(messages.to_vec());

        let step = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AgentError::InternalError("script exhausted".to_string())));

        step.map(|content| LLMResponse {
            content,
            finish_reason: Some("stop".to_string()),
            usage: None,
        })
    }
}

pub fn echo_tool() -> Arc<dyn Tool> {
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

pub fn failing_tool() -> Arc<dyn Tool> {
    Arc::new(FunctionTool::new(
        "always_fails",
        "Tool that always fails",
        json!({}),
        |_| {
            Err(AgentError::ToolError {
                tool_name: "always_fails".to_string(),
                message: "simulated failure".to_string(),
            })
        },
    ))
}

pub fn tool_map(tools: Vec<Arc<dyn Tool>>) -> HashMap<String, Arc<dyn Tool>> {
    tools
        .into_iter()
        .map(|tool| (tool.metadata().name.clone(), tool))
        .collect()
}
