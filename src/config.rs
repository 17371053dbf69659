// SPDX-License-Identifier: MIT

//! Runtime configuration for the Claude API integration.
//!
//! All settings are carried in an explicit struct passed at construction time;
//! nothing here is a process-wide singleton.

use crate::error::DeckhandError;
use std::env;

/// Default Claude messages endpoint
pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Default model used for tool-backed completions
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Default completion budget per call
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

/// Configuration for the Claude API client
#[derive(Debug, Clone)]
pub struct ClaudeConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
}

impl ClaudeConfig {
    /// Build a config from the environment.
    ///
    /// Requires `ANTHROPIC_API_KEY`; a missing key is a startup error with a
    /// user-facing message, never an error surfaced mid-call. Optionally uses
    /// `ANTHROPIC_BASE_URL` for custom endpoints.
    pub fn from_env() -> Result<Self, DeckhandError> {
        let api_key = env::var("ANTHROPIC_API_KEY").map_err(|_| {
            DeckhandError::config("ANTHROPIC_API_KEY not set. Please set your API key.")
        })?;
        let api_url =
            env::var("ANTHROPIC_BASE_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Self {
            api_key,
            api_url,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }

    /// Same config pointed at a different endpoint. Used by tests and by
    /// gateway deployments that front the API.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Override the model id
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let config = ClaudeConfig {
            api_key: "k".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
        .with_api_url("http://127.0.0.1:9/v1/messages")
        .with_model("claude-sonnet-4-20250514");

        assert_eq!(config.api_url, "http://127.0.0.1:9/v1/messages");
        assert_eq!(config.model, "claude-sonnet-4-20250514");
        assert_eq!(config.max_tokens, 4000);
    }
}
