// SPDX-License-Identifier: MIT

//! Typed error handling for deckhand-rs
//!
//! Every failure mode has a variant here; the dispatcher converts all of them
//! into error-shaped tool results at its boundary, so a single tool call can
//! never crash the server.

use thiserror::Error;

/// Top-level error type for deckhand-rs
#[derive(Debug, Error)]
pub enum DeckhandError {
    /// Configuration errors (missing env vars, invalid config). Fatal at startup.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Non-success HTTP status from the Claude API, carrying the literal body
    #[error("Claude API Error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Response body did not have the expected shape
    #[error("Malformed API response: {0}")]
    MalformedResponse(String),

    /// Tool not found during dispatch
    #[error("Tool '{name}' not found")]
    ToolNotFound { name: String },

    /// A deployment tool handler failed
    #[error("Error executing {tool}: {message}")]
    Downstream { tool: String, message: String },

    /// HTTP transport errors (timeout, DNS, connection refused)
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl DeckhandError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an API error from a status code and response body
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Create a tool not found error
    pub fn tool_not_found(name: impl Into<String>) -> Self {
        Self::ToolNotFound { name: name.into() }
    }

    /// Create a downstream tool error
    pub fn downstream(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Downstream {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_matches_wire_contract() {
        let err = DeckhandError::api(500, "boom");
        assert_eq!(err.to_string(), "Claude API Error (500): boom");
    }

    #[test]
    fn test_tool_not_found_display_names_tool() {
        let err = DeckhandError::tool_not_found("mystery_tool");
        assert_eq!(err.to_string(), "Tool 'mystery_tool' not found");
    }

    #[test]
    fn test_downstream_error_display() {
        let err = DeckhandError::downstream("git_status", "spawn failed");
        assert_eq!(err.to_string(), "Error executing git_status: spawn failed");
    }
}
