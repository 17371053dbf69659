// SPDX-License-Identifier: MIT

//! Claude messages-API client.
//!
//! One stateless request/response exchange per call: no session, no retries,
//! no cancellation. Callers needing resilience add it themselves.

use crate::config::ClaudeConfig;
use crate::error::DeckhandError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

/// Seam for anything that can turn a prompt into completion text.
///
/// The dispatcher holds a `dyn CompletionModel` so tests can drive it with a
/// stub instead of the live API.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(
        &self,
        prompt: &str,
        model: &str,
        max_tokens: u32,
    ) -> Result<String, DeckhandError>;
}

/// HTTP client for the Claude messages API
pub struct ClaudeClient {
    client: Client,
    config: ClaudeConfig,
}

impl ClaudeClient {
    pub fn new(config: ClaudeConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// The configured default model id
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// The configured completion budget
    pub fn max_tokens(&self) -> u32 {
        self.config.max_tokens
    }

    /// Extract the first text block from a messages-API response body.
    ///
    /// A body without `content[0].text` is a malformed-response failure, not a
    /// panic.
    fn extract_text(body: &Value) -> Result<String, DeckhandError> {
        body["content"]
            .as_array()
            .and_then(|blocks| blocks.first())
            .and_then(|block| block["text"].as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                DeckhandError::malformed(format!("no content[0].text in response: {}", body))
            })
    }
}

#[async_trait]
impl CompletionModel for ClaudeClient {
    async fn complete(
        &self,
        prompt: &str,
        model: &str,
        max_tokens: u32,
    ) -> Result<String, DeckhandError> {
        let payload = json!({
            "model": model,
            "max_tokens": max_tokens,
            "messages": [
                {"role": "user", "content": prompt}
            ]
        });

        log::debug!("Claude request to {} with model {}", self.config.api_url, model);

        let resp = self
            .client
            .post(&self.config.api_url)
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DeckhandError::api(status.as_u16(), body));
        }

        let body: Value = resp.json().await?;
        Self::extract_text(&body)
    }
}
