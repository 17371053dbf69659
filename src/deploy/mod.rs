// SPDX-License-Identifier: MIT

//! Deployment toolset: local `git`/`gh` wrappers exposed as named tools.
//!
//! The toolset is an explicit name-to-handler mapping built once at startup.
//! Duplicate names are rejected eagerly; lookups after that are read-only.

pub mod git;
pub mod github;

use crate::error::DeckhandError;
use crate::server::ToolDescriptor;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;

/// Trait for deployment tools callable by name.
///
/// `name()` and `description()` return `&str` and `schema()` returns `&Value`
/// to avoid allocation on every listing; implementations store these values in
/// struct fields.
#[async_trait]
pub trait DeploymentTool: Send + Sync {
    /// Returns the tool name (must be unique within the toolset)
    fn name(&self) -> &str;

    /// Returns a human-readable description of what the tool does
    fn description(&self) -> &str;

    /// Returns the JSON schema for the tool's input parameters
    fn schema(&self) -> &Value;

    /// Execute the tool with the given arguments and return the result
    async fn execute(
        &self,
        arguments: Map<String, Value>,
    ) -> Result<Value, Box<dyn Error + Send + Sync>>;
}

/// Name-to-handler mapping for deployment tools, built once at startup.
pub struct DeploymentToolset {
    // Registration order is the listing order.
    tools: Vec<Arc<dyn DeploymentTool>>,
    index: HashMap<String, usize>,
}

impl DeploymentToolset {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a tool, rejecting duplicate names eagerly.
    pub fn register(&mut self, tool: Arc<dyn DeploymentTool>) -> Result<(), DeckhandError> {
        let name = tool.name().to_string();
        if self.index.contains_key(&name) {
            return Err(DeckhandError::config(format!(
                "duplicate deployment tool name: {name}"
            )));
        }
        self.index.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn DeploymentTool>> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// Descriptors for every registered tool, in registration order.
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools
            .iter()
            .map(|t| ToolDescriptor {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.schema().clone(),
            })
            .collect()
    }
}

impl Default for DeploymentToolset {
    fn default() -> Self {
        Self::new()
    }
}

/// Captured output of one git/gh invocation. A non-zero exit code is data for
/// the caller, not an execution error.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn ok(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run a local command and capture its output.
pub(crate) async fn run_command(
    program: &str,
    args: &[&str],
    cwd: Option<&Path>,
) -> Result<CommandOutput, Box<dyn Error + Send + Sync>> {
    let mut command = Command::new(program);
    command.args(args).stdout(Stdio::piped()).stderr(Stdio::piped());
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    log::debug!("Running: {} {:?} in {:?}", program, args, cwd);
    let output = command.output().await?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        exit_code: output.status.code().unwrap_or(-1),
    })
}

/// Build the default toolset: git diagnostics plus gh repository checks,
/// all rooted at the given workspace directory.
pub fn default_toolset(workspace: PathBuf) -> Result<DeploymentToolset, DeckhandError> {
    let mut toolset = DeploymentToolset::new();
    for tool in git::create_tools(workspace.clone()) {
        toolset.register(tool)?;
    }
    for tool in github::create_tools(workspace) {
        toolset.register(tool)?;
    }
    Ok(toolset)
}
