//! Error types for failure handling across the agent core
//!
//! A single `AgentError` hierarchy covers every failure mode the loop can
//! encounter. Errors carry string payloads rather than structured causes
//! because most of them are rendered back to the model as observations; the
//! distinction that matters is the category, which decides whether a failure
//! aborts a run (LLM transport) or becomes textual feedback (everything else).

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AgentError {
    #[error("LLM interaction failed: {0}")]
    LLMError(String),
    #[error("Tool execution failed for '{tool_name}': {message}")]
    ToolError { tool_name: String, message: String },
    #[error("Parsing error: {0}")]
    ParsingError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Maximum iterations ({0}) reached without Final Answer")]
    MaxIterationsReached(usize),
    #[error("I/O error: {0}")]
    IoError(String),
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<std::io::Error> for AgentError {
    fn from(err: std::io::Error) -> Self {
        AgentError::IoError(err.to_string())
    }
}

impl From<reqwest::Error> for AgentError {
    fn from(err: reqwest::Error) -> Self {
        AgentError::LLMError(err.to_string())
    }
}
