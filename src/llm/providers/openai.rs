//! OpenAI-compatible chat completions client.
//!
//! Works against any endpoint speaking the `/chat/completions` dialect;
//! the default base URL targets DeepSeek, which the simulation workflows
//! run on. Transport and HTTP-status failures surface as `LLMError` (fatal
//! to a run), malformed response bodies as `ParsingError`.

use crate::core_types::{LLMResponse, Message, Usage};
use crate::errors::AgentError;
use crate::llm::ChatClient;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.deepseek.com";

#[derive(Debug, Clone)]
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    api_base: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout: Option<Duration>,
}

impl OpenAIClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_base: DEFAULT_API_BASE.to_string(),
            temperature: None,
            max_tokens: None,
            timeout: None,
        }
    }

    pub fn with_api_base(mut self, api_base: String) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn build_request_body(&self, model: &str, messages: &[Message]) -> Value {
        let mut body = json!({
            "model": model,
            "messages": messages,
        });

        if let Some(temp) = self.temperature {
            body["temperature"] = temp.into();
        }

        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = max_tokens.into();
        }

        body
    }

    fn parse_response_body(body: &str) -> Result<LLMResponse, AgentError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| AgentError::ParsingError(format!("Invalid response JSON: {}", e)))?;

        let choices = value["choices"]
            .as_array()
            .ok_or_else(|| AgentError::ParsingError("No choices in response".to_string()))?;

        if choices.is_empty() {
            return Err(AgentError::ParsingError("Empty choices array".to_string()));
        }

        let choice = &choices[0];
        let content = choice["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                AgentError::ParsingError("Response message has no content".to_string())
            })?
            .to_string();

        let finish_reason = choice["finish_reason"].as_str().map(|s| s.to_string());
        let usage = serde_json::from_value::<Usage>(value["usage"].clone()).ok();

        Ok(LLMResponse {
            content,
            finish_reason,
            usage,
        })
    }
}

#[async_trait]
impl ChatClient for OpenAIClient {
    async fn chat(&self, model: &str, messages: &[Message]) -> Result<LLMResponse, AgentError> {
        let url = format!("{}/chat/completions", self.api_base);
        let body = self.build_request_body(model, messages);

        log::debug!("Chat request to {} with model {}", url, model);
        log::debug!(
            "Request body: {}",
            serde_json::to_string_pretty(&body).unwrap_or_default()
        );

        let mut request = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body);

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AgentError::LLMError(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| AgentError::LLMError(format!("Failed to read response: {}", e)))?;

        log::debug!("Chat response ({}): {}", status, response_text);

        if !status.is_success() {
            return Err(AgentError::LLMError(format!(
                "Chat API request failed with status {}: {}",
                status, response_text
            )));
        }

        Self::parse_response_body(&response_text)
    }
}
