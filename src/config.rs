//! Environment-driven provider configuration.
//!
//! The orchestration core is configured purely from the environment: an API
//! key plus optional overrides for the endpoint, model names, and request
//! timeout. Model names are split into a chat model (the workhorse for tool
//! use) and a reasoner model for agents that need deeper deliberation.

use serde::{Deserialize, Serialize};
use std::env;

use crate::errors::AgentError;

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";
pub const DEFAULT_CHAT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_REASONER_MODEL: &str = "deepseek-reasoner";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub reasoner_model: String,
    pub timeout_secs: Option<u64>,
}

impl LlmConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            reasoner_model: DEFAULT_REASONER_MODEL.to_string(),
            timeout_secs: None,
        }
    }

    /// Reads `DEEPSEEK_API_KEY` (required), `DEEPSEEK_BASE_URL`,
    /// `DEEPSEEK_CHAT_MODEL`, `DEEPSEEK_REASONER_MODEL`, and
    /// `DEEPSEEK_TIMEOUT` (seconds).
    pub fn from_env() -> Result<Self, AgentError> {
        let api_key = env_trimmed("DEEPSEEK_API_KEY").ok_or_else(|| {
            AgentError::ConfigError(
                "DEEPSEEK_API_KEY is required; set it in the environment".to_string(),
            )
        })?;

        let mut config = Self::new(api_key);
        if let Some(base_url) = env_trimmed("DEEPSEEK_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(chat_model) = env_trimmed("DEEPSEEK_CHAT_MODEL") {
            config.chat_model = chat_model;
        }
        if let Some(reasoner_model) = env_trimmed("DEEPSEEK_REASONER_MODEL") {
            config.reasoner_model = reasoner_model;
        }
        config.timeout_secs = env_trimmed("DEEPSEEK_TIMEOUT").and_then(|v| v.parse().ok());

        Ok(config)
    }
}

fn env_trimmed(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LlmConfig::new("sk-test");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.chat_model, "deepseek-chat");
        assert_eq!(config.reasoner_model, "deepseek-reasoner");
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn test_env_trimmed_filters_empty() {
        // Variable names are unique to this test to avoid cross-test races.
        env::set_var("GCMC_AGENT_TEST_EMPTY", "   ");
        assert_eq!(env_trimmed("GCMC_AGENT_TEST_EMPTY"), None);

        env::set_var("GCMC_AGENT_TEST_SET", "  value  ");
        assert_eq!(
            env_trimmed("GCMC_AGENT_TEST_SET"),
            Some("value".to_string())
        );

        assert_eq!(env_trimmed("GCMC_AGENT_TEST_UNSET_XYZ"), None);
    }
}
