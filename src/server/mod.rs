// SPDX-License-Identifier: MIT

//! Tool registry and request dispatcher for the deployment server.
//!
//! `call_tool` routes by name: the `claude_` prefix goes to the model-backed
//! path, registered deployment tools are invoked directly, and everything else
//! is a not-found result. Every failure on either path is converted into an
//! error-shaped result at this boundary; a single tool invocation can never
//! crash the process.

pub mod mcp;

use crate::claude::{build_prompt, CompletionModel};
use crate::deploy::DeploymentToolset;
use crate::error::DeckhandError;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Reserved prefix identifying model-backed tools
pub const CLAUDE_TOOL_PREFIX: &str = "claude_";

/// Prefix line of every successful model-backed result. External-interface
/// contract, not incidental formatting.
pub const CLAUDE_RESPONSE_PREFIX: &str = "Claude Sonnet 4 Response:\n\n";

/// Metadata describing one invocable capability
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Outcome of one tool invocation: a text result or an error text
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCallResult {
    Text(String),
    Error(String),
}

impl ToolCallResult {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn error(value: impl Into<String>) -> Self {
        Self::Error(value.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// The carried text, success or error
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) | Self::Error(s) => s,
        }
    }
}

/// The deployment server: a deployment toolset plus a completion model for the
/// four model-backed tools.
pub struct DeploymentServer {
    toolset: DeploymentToolset,
    model: Arc<dyn CompletionModel>,
    model_id: String,
    max_tokens: u32,
}

impl DeploymentServer {
    pub fn new(
        toolset: DeploymentToolset,
        model: Arc<dyn CompletionModel>,
        model_id: impl Into<String>,
        max_tokens: u32,
    ) -> Self {
        Self {
            toolset,
            model,
            model_id: model_id.into(),
            max_tokens,
        }
    }

    /// All available tools: the deployment toolset (queried at call time, so
    /// it reflects live registration) followed by the fixed model-backed
    /// descriptors.
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        let mut tools = self.toolset.descriptors();
        tools.extend(claude_tool_descriptors());
        tools
    }

    /// Route a named tool call to its handler and report the outcome.
    pub async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> ToolCallResult {
        if name.starts_with(CLAUDE_TOOL_PREFIX) {
            return self.call_claude_tool(name, &arguments).await;
        }

        if let Some(tool) = self.toolset.get(name) {
            return match tool.execute(arguments).await {
                Ok(value) => match serde_json::to_string_pretty(&value) {
                    Ok(text) => ToolCallResult::text(text),
                    Err(e) => ToolCallResult::error(
                        DeckhandError::downstream(name, e.to_string()).to_string(),
                    ),
                },
                Err(e) => ToolCallResult::error(
                    DeckhandError::downstream(name, e.to_string()).to_string(),
                ),
            };
        }

        ToolCallResult::error(DeckhandError::tool_not_found(name).to_string())
    }

    async fn call_claude_tool(
        &self,
        name: &str,
        arguments: &Map<String, Value>,
    ) -> ToolCallResult {
        let prompt = build_prompt(name, arguments);

        match self
            .model
            .complete(&prompt, &self.model_id, self.max_tokens)
            .await
        {
            Ok(text) => ToolCallResult::text(format!("{CLAUDE_RESPONSE_PREFIX}{text}")),
            // API errors already carry the status and body in the contract shape.
            Err(e @ DeckhandError::Api { .. }) => ToolCallResult::error(e.to_string()),
            Err(e) => ToolCallResult::error(format!("Error calling Claude API: {e}")),
        }
    }
}

/// The four fixed model-backed tool descriptors.
pub fn claude_tool_descriptors() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: "claude_code_review".to_string(),
            description: "Use Claude to review code and suggest improvements".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "code": {"type": "string", "description": "Code to review"},
                    "language": {"type": "string", "description": "Programming language"},
                    "context": {"type": "string", "description": "Additional context"}
                },
                "required": ["code"]
            }),
        },
        ToolDescriptor {
            name: "claude_deployment_planning".to_string(),
            description: "Use Claude to create deployment strategies".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "project_type": {"type": "string", "description": "Type of project to deploy"},
                    "requirements": {"type": "string", "description": "Deployment requirements"},
                    "constraints": {"type": "string", "description": "Any constraints or limitations"}
                },
                "required": ["project_type"]
            }),
        },
        ToolDescriptor {
            name: "claude_error_diagnosis".to_string(),
            description: "Use Claude to diagnose deployment errors".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "error_log": {"type": "string", "description": "Error log or message"},
                    "system_info": {"type": "string", "description": "System information"},
                    "deployment_context": {"type": "string", "description": "Deployment context"}
                },
                "required": ["error_log"]
            }),
        },
        ToolDescriptor {
            name: "claude_optimize_config".to_string(),
            description: "Use Claude to optimize configuration files".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "config_content": {"type": "string", "description": "Configuration file content"},
                    "config_type": {"type": "string", "description": "Type of config (docker, yaml, json, etc.)"},
                    "optimization_goals": {"type": "string", "description": "What to optimize for"}
                },
                "required": ["config_content", "config_type"]
            }),
        },
    ]
}
