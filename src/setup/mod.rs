// SPDX-License-Identifier: MIT

//! Generated configuration artifacts: the MCP client config, VS Code
//! settings, and the GitHub Actions pipeline.
//!
//! Everything is emitted as fully formed text from explicit paths passed in by
//! the caller. The only runtime parameter inside the artifacts is the secret
//! reference, carried as a literal `${ANTHROPIC_API_KEY}` placeholder for the
//! consuming tool to resolve.

use crate::error::DeckhandError;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Where the setup artifacts land. No hardcoded paths; callers decide.
#[derive(Debug, Clone)]
pub struct SetupPaths {
    /// Target for the MCP client configuration JSON
    pub mcp_config: PathBuf,
    /// Target for the merged VS Code settings JSON
    pub vscode_settings: PathBuf,
    /// Target for the GitHub Actions workflow YAML
    pub workflow: PathBuf,
}

/// One MCP tool-server launch entry
#[derive(Debug, Clone, Serialize)]
pub struct McpServerEntry {
    pub command: String,
    pub args: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GithubIntegration {
    pub enabled: bool,
    pub username: String,
    pub repositories: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeploymentAutomation {
    pub enabled: bool,
    pub auto_review: bool,
    pub model_preference: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClaudePreferences {
    pub default_model: String,
    pub github_integration: GithubIntegration,
    pub deployment_automation: DeploymentAutomation,
}

/// The full MCP client configuration: launch entries plus the preference
/// block. The field casing on the wire follows the consuming tool's format.
#[derive(Debug, Clone, Serialize)]
pub struct McpConfig {
    #[serde(rename = "mcpServers")]
    pub mcp_servers: BTreeMap<String, McpServerEntry>,
    pub claude_preferences: ClaudePreferences,
}

impl McpConfig {
    /// Default configuration launching this binary as the deployment tool
    /// server for the given workspace.
    pub fn for_server(server_command: &str, workspace: &Path) -> Self {
        let mut env = BTreeMap::new();
        env.insert(
            "ANTHROPIC_API_KEY".to_string(),
            "${ANTHROPIC_API_KEY}".to_string(),
        );

        let mut mcp_servers = BTreeMap::new();
        mcp_servers.insert(
            "claude-deployment-tools".to_string(),
            McpServerEntry {
                command: server_command.to_string(),
                args: vec![
                    "serve".to_string(),
                    "--workspace".to_string(),
                    workspace.display().to_string(),
                ],
                env,
            },
        );

        Self {
            mcp_servers,
            claude_preferences: ClaudePreferences {
                default_model: "claude-sonnet-4-20250514".to_string(),
                github_integration: GithubIntegration {
                    enabled: true,
                    username: String::new(),
                    repositories: Vec::new(),
                },
                deployment_automation: DeploymentAutomation {
                    enabled: true,
                    auto_review: true,
                    model_preference: "claude-sonnet-4".to_string(),
                },
            },
        }
    }

    pub fn to_json(&self) -> Result<String, DeckhandError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The fixed Claude/Copilot settings block merged into VS Code settings.
pub fn vscode_settings_block() -> Value {
    json!({
        "github.copilot.enable": {
            "*": true,
            "yaml": true,
            "plaintext": true,
            "markdown": true,
            "python": true,
            "javascript": true,
            "typescript": true
        },
        "github.copilot.advanced": {
            "model": "claude-sonnet-4",
            "listCount": 10,
            "inlineSuggestCount": 3
        },
        "github.copilot.chat.model": "claude-sonnet-4",
        "workbench.editor.enablePreview": false,
        "editor.inlineSuggest.enabled": true,
        "editor.suggestSelection": "first"
    })
}

/// Merge the fixed settings block over existing settings text.
///
/// Malformed existing JSON is logged and dropped; the fixed block is still
/// written over defaults rather than aborting setup.
pub fn merge_vscode_settings(existing: Option<&str>) -> Value {
    let mut settings = match existing.map(serde_json::from_str::<Value>) {
        Some(Ok(Value::Object(map))) => Value::Object(map),
        Some(Ok(other)) => {
            log::warn!("Existing VS Code settings are not an object ({other}); replacing them");
            json!({})
        }
        Some(Err(e)) => {
            log::warn!("Existing VS Code settings are not valid JSON ({e}); replacing them");
            json!({})
        }
        None => json!({}),
    };

    if let (Value::Object(target), Value::Object(block)) =
        (&mut settings, vscode_settings_block())
    {
        for (key, value) in block {
            target.insert(key, value);
        }
    }
    settings
}

/// The CI pipeline definition, emitted verbatim.
pub const WORKFLOW_YAML: &str = r#"name: Claude Deployment Pipeline

on:
  push:
    branches: [ main, develop ]
  pull_request:
    branches: [ main ]
  issues:
    types: [opened, edited]
  workflow_dispatch:
    inputs:
      deployment_task:
        description: 'Deployment task for Claude'
        required: true
        type: string
      model_preference:
        description: 'Claude model to use'
        required: false
        default: 'claude-sonnet-4-20250514'
        type: choice
        options:
          - claude-sonnet-4-20250514
          - claude-3-5-sonnet-20241022

jobs:
  claude-deployment:
    runs-on: ubuntu-latest

    steps:
    - name: Checkout repository
      uses: actions/checkout@v4
      with:
        fetch-depth: 0

    - name: Setup Rust
      uses: dtolnay/rust-toolchain@stable

    - name: Build deployment server
      run: cargo build --release

    - name: Verify Claude API access
      env:
        ANTHROPIC_API_KEY: ${{ secrets.ANTHROPIC_API_KEY }}
      run: |
        ./target/release/deckhand-rs test-api

    - name: Code Review with Claude
      if: github.event_name == 'pull_request'
      env:
        ANTHROPIC_API_KEY: ${{ secrets.ANTHROPIC_API_KEY }}
        GITHUB_TOKEN: ${{ secrets.GITHUB_TOKEN }}
      run: |
        ./target/release/deckhand-rs status

    - name: Deployment Planning
      if: github.event_name == 'workflow_dispatch'
      env:
        ANTHROPIC_API_KEY: ${{ secrets.ANTHROPIC_API_KEY }}
      run: |
        ./target/release/deckhand-rs test-api \
          --prompt "${{ github.event.inputs.deployment_task }}" \
          --model "${{ github.event.inputs.model_preference }}"
"#;

async fn write_with_parents(path: &Path, contents: &str) -> Result<(), DeckhandError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, contents).await?;
    Ok(())
}

/// Write all three setup artifacts.
pub async fn run_setup(
    paths: &SetupPaths,
    server_command: &str,
    workspace: &Path,
) -> Result<(), DeckhandError> {
    // The workflow is static text; make sure it is still well-formed YAML
    // before any file is touched.
    serde_yaml::from_str::<Value>(WORKFLOW_YAML)?;

    let config = McpConfig::for_server(server_command, workspace);
    write_with_parents(&paths.mcp_config, &config.to_json()?).await?;
    log::info!("Created Claude MCP config: {}", paths.mcp_config.display());

    let existing = tokio::fs::read_to_string(&paths.vscode_settings).await.ok();
    let merged = merge_vscode_settings(existing.as_deref());
    write_with_parents(&paths.vscode_settings, &serde_json::to_string_pretty(&merged)?).await?;
    log::info!(
        "Updated VS Code settings: {}",
        paths.vscode_settings.display()
    );

    write_with_parents(&paths.workflow, WORKFLOW_YAML).await?;
    log::info!("Created deployment workflow: {}", paths.workflow.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mcp_config_uses_wire_casing_and_secret_placeholder() {
        let config = McpConfig::for_server("deckhand-rs", Path::new("/work/repo"));
        let text = config.to_json().unwrap();

        assert!(text.contains("\"mcpServers\""));
        assert!(text.contains("\"claude_preferences\""));
        assert!(text.contains("${ANTHROPIC_API_KEY}"));

        let parsed: Value = serde_json::from_str(&text).unwrap();
        let entry = &parsed["mcpServers"]["claude-deployment-tools"];
        assert_eq!(entry["command"], "deckhand-rs");
        assert_eq!(entry["args"][0], "serve");
    }

    #[test]
    fn test_merge_preserves_unrelated_existing_keys() {
        let existing = r#"{"editor.fontSize": 14, "github.copilot.chat.model": "gpt-4"}"#;
        let merged = merge_vscode_settings(Some(existing));

        assert_eq!(merged["editor.fontSize"], 14);
        // Our block wins on conflicts.
        assert_eq!(merged["github.copilot.chat.model"], "claude-sonnet-4");
        assert_eq!(merged["editor.suggestSelection"], "first");
    }

    #[test]
    fn test_merge_falls_back_on_malformed_settings() {
        let merged = merge_vscode_settings(Some("{not json"));
        assert_eq!(merged["github.copilot.chat.model"], "claude-sonnet-4");
    }

    #[test]
    fn test_merge_without_existing_settings() {
        let merged = merge_vscode_settings(None);
        assert_eq!(merged["github.copilot.advanced"]["listCount"], 10);
    }

    #[test]
    fn test_workflow_yaml_parses_with_expected_triggers() {
        let doc: Value = serde_yaml::from_str(WORKFLOW_YAML).unwrap();

        assert_eq!(doc["name"], "Claude Deployment Pipeline");
        assert!(doc["on"]["push"]["branches"].is_array());
        assert_eq!(doc["on"]["issues"]["types"][0], "opened");

        let inputs = &doc["on"]["workflow_dispatch"]["inputs"];
        assert_eq!(inputs["deployment_task"]["type"], "string");
        assert_eq!(inputs["deployment_task"]["required"], true);
        assert_eq!(inputs["model_preference"]["type"], "choice");
        assert_eq!(
            inputs["model_preference"]["default"],
            "claude-sonnet-4-20250514"
        );
    }

    #[tokio::test]
    async fn test_run_setup_writes_all_artifacts() {
        // Per-process directory so concurrent test runs cannot collide.
        let dir =
            std::env::temp_dir().join(format!("deckhand-setup-test-{}", std::process::id()));
        let _ = tokio::fs::remove_dir_all(&dir).await;

        let paths = SetupPaths {
            mcp_config: dir.join("claude-desktop/claude_desktop_config.json"),
            vscode_settings: dir.join("vscode/settings.json"),
            workflow: dir.join(".github/workflows/claude-deployment.yml"),
        };
        run_setup(&paths, "deckhand-rs", Path::new("/work/repo"))
            .await
            .unwrap();

        let config_text = tokio::fs::read_to_string(&paths.mcp_config).await.unwrap();
        assert!(config_text.contains("mcpServers"));
        let workflow_text = tokio::fs::read_to_string(&paths.workflow).await.unwrap();
        assert_eq!(workflow_text, WORKFLOW_YAML);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
