//! Chat completion service abstractions
//!
//! The loop talks to language models through the `ChatClient` trait: a model
//! id plus an ordered message list in, generated text plus token usage out.
//! The model id is passed verbatim on every call so one client instance can
//! serve agents configured for different models (chat vs. reasoner).

use crate::core_types::{LLMResponse, Message};
use crate::errors::AgentError;
use async_trait::async_trait;

pub mod providers;

pub use providers::openai::OpenAIClient;

#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn chat(&self, model: &str, messages: &[Message]) -> Result<LLMResponse, AgentError>;
}
