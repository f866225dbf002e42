//! Agent orchestration core for GCMC simulation setup workflows.
//!
//! This crate provides the control-loop infrastructure behind a team of
//! LLM-driven agents that prepare molecular-simulation experiments. The heart
//! of it is the ReAct loop: a bounded iterate/query/parse/dispatch cycle that
//! alternates between querying a chat model and executing the tools the model
//! asks for, until the model emits a Final Answer or runs out of iterations.
//!
//! # Architecture Overview
//!
//! - **ReAct loop** (`react`): the bounded Thought/Action/Observation cycle
//!   and the free-text response grammar parser
//! - **Chat integration** (`llm`): provider-agnostic `ChatClient` trait plus
//!   an OpenAI-compatible HTTP client
//! - **Tool system** (`tools`): closed `Tool` interface, registry, and
//!   closure-backed tools
//! - **Composition** (`agents`): sequential supervisors that delegate to
//!   specialist agents wrapped as tools
//! - **Tracing** (`trace`): injected transcript sinks (log facade, JSONL)
//! - **Configuration** (`config`): environment-driven provider settings

pub mod agents;
pub mod config;
pub mod core_types;
pub mod errors;
pub mod llm;
pub mod react;
pub mod tools;
pub mod trace;

pub use agents::{SubAgentTool, Supervisor};
pub use config::LlmConfig;
pub use core_types::{AgentResult, LLMResponse, Message, Role, StepRecord, Usage};
pub use errors::AgentError;
pub use llm::{ChatClient, OpenAIClient};
pub use react::{parse_response, ParsedResponse, ReActAgent};
pub use tools::{FunctionTool, Tool, ToolMetadata, ToolRegistry};
pub use trace::{JsonlTraceSink, LogTraceSink, TraceSink, TraceStep};

#[cfg(test)]
pub mod test_utils;
