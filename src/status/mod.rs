// SPDX-License-Identifier: MIT

//! Integration status checks: what git and gh say about the workspace.

use crate::deploy::run_command;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Outcome of one diagnostic command
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub label: String,
    pub ok: bool,
    pub output: String,
}

impl CheckResult {
    fn marker(&self) -> &'static str {
        if self.ok {
            "[+]"
        } else {
            "[X]"
        }
    }
}

/// Collected results of all integration checks
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub workspace: String,
    pub checks: Vec<CheckResult>,
}

impl StatusReport {
    pub fn all_ok(&self) -> bool {
        self.checks.iter().all(|c| c.ok)
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Checking Integration Status ===")?;
        writeln!(f)?;
        writeln!(f, "Working directory: {}", self.workspace)?;
        for check in &self.checks {
            writeln!(f)?;
            writeln!(f, "{} {}:", check.marker(), check.label)?;
            writeln!(f, "{}", check.output)?;
        }
        Ok(())
    }
}

async fn check(label: &str, program: &str, args: &[&str], cwd: &Path) -> CheckResult {
    match run_command(program, args, Some(cwd)).await {
        Ok(output) => CheckResult {
            label: label.to_string(),
            ok: output.ok(),
            output: if output.ok() {
                output.stdout
            } else {
                output.stderr
            },
        },
        // A spawn failure (binary missing) marks the check failed; the report
        // always completes.
        Err(e) => CheckResult {
            label: label.to_string(),
            ok: false,
            output: e.to_string(),
        },
    }
}

/// Truncate long command output for the report, like `gh repo view` dumps.
fn truncate(text: String, limit: usize) -> String {
    if text.chars().count() > limit {
        let cut: String = text.chars().take(limit).collect();
        format!("{cut}...")
    } else {
        text
    }
}

/// Run the full set of integration checks against a workspace directory.
pub async fn run_status_checks(workspace: &Path) -> StatusReport {
    let mut checks = Vec::new();

    checks.push(check("Git repository status", "git", &["status"], workspace).await);

    let mut repo = check("GitHub repository", "gh", &["repo", "view"], workspace).await;
    repo.output = truncate(repo.output, 200);
    checks.push(repo);

    checks.push(check("GitHub Actions workflows", "gh", &["workflow", "list"], workspace).await);
    checks.push(check("GitHub secrets", "gh", &["secret", "list"], workspace).await);

    StatusReport {
        workspace: workspace.display().to_string(),
        checks,
    }
}
