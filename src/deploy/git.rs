// SPDX-License-Identifier: MIT

//! Git diagnostics and push tools wrapping the local `git` binary.

use super::{run_command, DeploymentTool};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_COMMIT_MESSAGE: &str = "Add Claude integration and test scripts";

// --- Repository status ---

pub struct GitStatusTool {
    workspace: PathBuf,
    schema: Value,
}

impl GitStatusTool {
    pub fn new(workspace: PathBuf) -> Self {
        Self {
            workspace,
            schema: json!({
                "type": "object",
                "properties": {}
            }),
        }
    }
}

#[async_trait]
impl DeploymentTool for GitStatusTool {
    fn name(&self) -> &str {
        "git_status"
    }

    fn description(&self) -> &str {
        "Reports git working tree status, configured remotes, and branches for the workspace."
    }

    fn schema(&self) -> &Value {
        &self.schema
    }

    async fn execute(
        &self,
        _arguments: Map<String, Value>,
    ) -> Result<Value, Box<dyn Error + Send + Sync>> {
        let cwd = Some(self.workspace.as_path());
        let status = run_command("git", &["status"], cwd).await?;
        let remotes = run_command("git", &["remote", "-v"], cwd).await?;
        let branches = run_command("git", &["branch", "-a"], cwd).await?;

        Ok(json!({
            "is_repository": status.ok(),
            "status": status,
            "remotes": remotes,
            "branches": branches,
        }))
    }
}

// --- Global configuration ---

pub struct GitConfigTool {
    schema: Value,
}

impl GitConfigTool {
    pub fn new() -> Self {
        Self {
            schema: json!({
                "type": "object",
                "properties": {}
            }),
        }
    }
}

impl Default for GitConfigTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeploymentTool for GitConfigTool {
    fn name(&self) -> &str {
        "git_config_list"
    }

    fn description(&self) -> &str {
        "Shows the installed git version and the global git configuration."
    }

    fn schema(&self) -> &Value {
        &self.schema
    }

    async fn execute(
        &self,
        _arguments: Map<String, Value>,
    ) -> Result<Value, Box<dyn Error + Send + Sync>> {
        let version = run_command("git", &["--version"], None).await?;
        let config = run_command("git", &["config", "--global", "--list"], None).await?;

        Ok(json!({
            "version": version,
            "config": config,
        }))
    }
}

// --- Stage, commit, push ---

pub struct PushUpdatesTool {
    workspace: PathBuf,
    schema: Value,
}

impl PushUpdatesTool {
    pub fn new(workspace: PathBuf) -> Self {
        Self {
            workspace,
            schema: json!({
                "type": "object",
                "properties": {
                    "message": {
                        "type": "string",
                        "description": "Commit message for the staged changes"
                    }
                }
            }),
        }
    }
}

#[async_trait]
impl DeploymentTool for PushUpdatesTool {
    fn name(&self) -> &str {
        "push_updates"
    }

    fn description(&self) -> &str {
        "Stages all changes, commits them with the given message, and pushes to the remote."
    }

    fn schema(&self) -> &Value {
        &self.schema
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
    ) -> Result<Value, Box<dyn Error + Send + Sync>> {
        let message = arguments
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_COMMIT_MESSAGE);
        let cwd = Some(self.workspace.as_path());

        let add = run_command("git", &["add", "."], cwd).await?;
        let commit = run_command("git", &["commit", "-m", message], cwd).await?;
        let push = run_command("git", &["push"], cwd).await?;

        Ok(json!({
            "add": add,
            "commit": commit,
            "push": push,
        }))
    }
}

// --- Factory ---

pub fn create_tools(workspace: PathBuf) -> Vec<Arc<dyn DeploymentTool>> {
    vec![
        Arc::new(GitStatusTool::new(workspace.clone())),
        Arc::new(GitConfigTool::new()),
        Arc::new(PushUpdatesTool::new(workspace)),
    ]
}
