//! Core type definitions for agent-LLM communication
//!
//! These types form the contract between the ReAct loop and the chat
//! completion service. The message format follows the OpenAI chat convention
//! (system/user/assistant roles) since every provider the system talks to
//! speaks that dialect. The loop's own trace is captured as an ordered list of
//! `StepRecord`s and returned to the caller inside `AgentResult`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Message {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Message {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Message {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// One chat completion as seen by the loop: the generated text plus whatever
/// bookkeeping the provider reported.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LLMResponse {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// One loop iteration's trace: the raw model output and the observation fed
/// back for it. The observation is absent only on the iteration that ended
/// the run.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StepRecord {
    pub model_output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
}

/// Outcome of one full `ReActAgent::run` invocation. Constructed exactly once
/// at loop termination; the caller owns it.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AgentResult {
    pub success: bool,
    pub answer: String,
    pub history: Vec<StepRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AgentResult {
    pub fn succeeded(answer: String, history: Vec<StepRecord>) -> Self {
        AgentResult {
            success: true,
            answer,
            history,
            error: None,
        }
    }

    pub fn failed(error: String, history: Vec<StepRecord>) -> Self {
        AgentResult {
            success: false,
            answer: String::new(),
            history,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let msg = Message::system("hello");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "hello");
    }

    #[test]
    fn test_failed_result_has_empty_answer() {
        let result = AgentResult::failed("boom".to_string(), vec![]);
        assert!(!result.success);
        assert_eq!(result.answer, "");
        assert_eq!(result.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_step_record_skips_absent_observation() {
        let record = StepRecord {
            model_output: "Final Answer: done".to_string(),
            observation: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("observation"));
    }
}
