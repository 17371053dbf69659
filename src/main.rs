// SPDX-License-Identifier: MIT

use clap::{Parser, Subcommand};
use deckhand_rs::claude::{ClaudeClient, CompletionModel};
use deckhand_rs::config::ClaudeConfig;
use deckhand_rs::deploy::default_toolset;
use deckhand_rs::server::mcp::McpDeploymentServer;
use deckhand_rs::server::DeploymentServer;
use deckhand_rs::setup::{run_setup, SetupPaths};
use deckhand_rs::status::run_status_checks;
use dotenv::dotenv;
use rmcp::{transport::stdio, ServiceExt};
use std::path::PathBuf;
use std::sync::Arc;

const SMOKE_TEST_PROMPT: &str =
    "Hello! Please respond with 'Claude Sonnet integration working!'";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the MCP deployment server over stdio
    Serve {
        /// Workspace repository the deployment tools operate on
        #[arg(short, long, default_value = ".")]
        workspace: PathBuf,
    },
    /// Write the MCP client config, VS Code settings, and CI workflow
    Setup {
        /// Directory for the MCP client configuration
        #[arg(long)]
        config_dir: Option<PathBuf>,

        /// VS Code settings.json to merge into
        #[arg(long)]
        vscode_settings: Option<PathBuf>,

        /// Workspace repository that receives the workflow file
        #[arg(short, long, default_value = ".")]
        workspace: PathBuf,
    },
    /// Report git/gh integration status for the workspace
    Status {
        #[arg(short, long, default_value = ".")]
        workspace: PathBuf,
    },
    /// One-shot Claude API smoke test
    TestApi {
        /// The prompt to send
        #[arg(short, long)]
        prompt: Option<String>,

        /// Model override for this call
        #[arg(short, long)]
        model: Option<String>,
    },
}

/// Load the Claude config; a missing key is fatal with a clear message.
fn claude_config_or_exit() -> ClaudeConfig {
    match ClaudeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[X] {e}");
            eprintln!("Set ANTHROPIC_API_KEY and retry.");
            std::process::exit(1);
        }
    }
}

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Serve { workspace } => {
            let config = claude_config_or_exit();
            let model_id = config.model.clone();
            let max_tokens = config.max_tokens;

            let toolset = default_toolset(workspace)?;
            let client = Arc::new(ClaudeClient::new(config));
            let server = DeploymentServer::new(toolset, client, model_id, max_tokens);

            log::info!("Starting claude-deployment-tools MCP server on stdio");
            let running = McpDeploymentServer::new(server).serve(stdio()).await?;
            running.waiting().await?;
        }
        Commands::Setup {
            config_dir,
            vscode_settings,
            workspace,
        } => {
            let config_dir =
                config_dir.unwrap_or_else(|| home_dir().join(".config/claude-desktop"));
            let paths = SetupPaths {
                mcp_config: config_dir.join("claude_desktop_config.json"),
                vscode_settings: vscode_settings
                    .unwrap_or_else(|| home_dir().join(".vscode/settings.json")),
                workflow: workspace.join(".github/workflows/claude-deployment.yml"),
            };

            let server_command = std::env::current_exe()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "deckhand-rs".to_string());

            println!("=== Claude MCP Integration Setup ===");
            run_setup(&paths, &server_command, &workspace).await?;
            println!();
            println!("=== Setup Complete ===");
            println!("[+] MCP config: {}", paths.mcp_config.display());
            println!("[+] VS Code settings: {}", paths.vscode_settings.display());
            println!("[+] Deployment workflow: {}", paths.workflow.display());
            println!();
            println!("Next steps:");
            println!("1. Set the ANTHROPIC_API_KEY environment variable");
            println!("2. Restart the Claude desktop app");
            println!("3. Test the integration with: deckhand-rs test-api");
        }
        Commands::Status { workspace } => {
            let report = run_status_checks(&workspace).await;
            print!("{report}");
            if !report.all_ok() {
                std::process::exit(1);
            }
        }
        Commands::TestApi { prompt, model } => {
            let config = claude_config_or_exit();
            let model_id = model.unwrap_or_else(|| config.model.clone());
            let max_tokens = config.max_tokens;
            let prompt = prompt.unwrap_or_else(|| SMOKE_TEST_PROMPT.to_string());

            println!("=== Testing Claude Integration ===");
            let client = ClaudeClient::new(config);
            match client.complete(&prompt, &model_id, max_tokens).await {
                Ok(text) => {
                    println!("[+] Claude API Response: {text}");
                    println!();
                    println!("Claude integration is working.");
                }
                Err(e) => {
                    eprintln!("[X] {e}");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
