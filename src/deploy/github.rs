// SPDX-License-Identifier: MIT

//! GitHub checks wrapping the local `gh` CLI.
//!
//! The gh binary carries its own authentication; these tools only report what
//! it says about the workspace repository.

use super::{run_command, DeploymentTool};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

/// One tool per read-only `gh` subcommand; they differ only in the arguments
/// passed to the CLI.
pub struct GhCliTool {
    workspace: PathBuf,
    name: &'static str,
    description: &'static str,
    args: &'static [&'static str],
    schema: Value,
}

impl GhCliTool {
    fn new(
        workspace: PathBuf,
        name: &'static str,
        description: &'static str,
        args: &'static [&'static str],
    ) -> Self {
        Self {
            workspace,
            name,
            description,
            args,
            schema: json!({
                "type": "object",
                "properties": {}
            }),
        }
    }
}

#[async_trait]
impl DeploymentTool for GhCliTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn schema(&self) -> &Value {
        &self.schema
    }

    async fn execute(
        &self,
        _arguments: Map<String, Value>,
    ) -> Result<Value, Box<dyn Error + Send + Sync>> {
        let output = run_command("gh", self.args, Some(self.workspace.as_path())).await?;
        Ok(json!({
            "ok": output.ok(),
            "output": output,
        }))
    }
}

// --- Repository bootstrap ---

pub struct RepoCreateTool {
    workspace: PathBuf,
    schema: Value,
}

impl RepoCreateTool {
    pub fn new(workspace: PathBuf) -> Self {
        Self {
            workspace,
            schema: json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Name of the GitHub repository to create"
                    },
                    "visibility": {
                        "type": "string",
                        "description": "Repository visibility: public or private (default: public)"
                    },
                    "remote_url": {
                        "type": "string",
                        "description": "Remote URL to wire up when the repository already exists"
                    }
                },
                "required": ["name"]
            }),
        }
    }
}

#[async_trait]
impl DeploymentTool for RepoCreateTool {
    fn name(&self) -> &str {
        "repo_create"
    }

    fn description(&self) -> &str {
        "Initializes the workspace as a git repository if needed and creates the GitHub repository, pushing the initial commit."
    }

    fn schema(&self) -> &Value {
        &self.schema
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
    ) -> Result<Value, Box<dyn Error + Send + Sync>> {
        let name = arguments
            .get("name")
            .and_then(Value::as_str)
            .ok_or("name is required")?;
        let visibility_flag = match arguments.get("visibility").and_then(Value::as_str) {
            Some("private") => "--private",
            _ => "--public",
        };
        let cwd = Some(self.workspace.as_path());

        // Not a repository yet: initialize and make the first commit.
        let status = run_command("git", &["status"], cwd).await?;
        let initialized = if status.ok() {
            None
        } else {
            let init = run_command("git", &["init"], cwd).await?;
            let add = run_command("git", &["add", "."], cwd).await?;
            let commit = run_command(
                "git",
                &["commit", "-m", "Initial commit with Claude integration"],
                cwd,
            )
            .await?;
            Some(json!({"init": init, "add": add, "commit": commit}))
        };

        let create = run_command(
            "gh",
            &["repo", "create", name, visibility_flag, "--source=.", "--push"],
            cwd,
        )
        .await?;

        // An existing repository is not a failure: wire up the remote and push.
        let fallback = if !create.ok() && create.stderr.to_lowercase().contains("already exists") {
            let remote = match arguments.get("remote_url").and_then(Value::as_str) {
                Some(url) => Some(run_command("git", &["remote", "add", "origin", url], cwd).await?),
                None => None,
            };
            let push = run_command("git", &["push", "-u", "origin", "main"], cwd).await?;
            Some(json!({"remote": remote, "push": push}))
        } else {
            None
        };

        Ok(json!({
            "created": create.ok(),
            "initialized": initialized,
            "create": create,
            "already_exists_fallback": fallback,
        }))
    }
}

// --- Factory ---

pub fn create_tools(workspace: PathBuf) -> Vec<Arc<dyn DeploymentTool>> {
    vec![
        Arc::new(GhCliTool::new(
            workspace.clone(),
            "repo_view",
            "Shows the GitHub repository linked to the workspace.",
            &["repo", "view"],
        )),
        Arc::new(GhCliTool::new(
            workspace.clone(),
            "workflow_list",
            "Lists GitHub Actions workflows registered for the repository.",
            &["workflow", "list"],
        )),
        Arc::new(GhCliTool::new(
            workspace.clone(),
            "secret_list",
            "Lists GitHub Actions secrets configured for the repository.",
            &["secret", "list"],
        )),
        Arc::new(RepoCreateTool::new(workspace)),
    ]
}
