// SPDX-License-Identifier: MIT

//! MCP stdio surface for the deployment server.
//!
//! Tool-level failures stay inside the tool result as error text; protocol
//! errors are reserved for transport problems.

use crate::server::{DeploymentServer, ToolCallResult, ToolDescriptor};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, ErrorData, Implementation, ListToolsResult,
    PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::ServerHandler;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct McpDeploymentServer {
    inner: Arc<DeploymentServer>,
}

impl McpDeploymentServer {
    pub fn new(inner: DeploymentServer) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }
}

fn to_rmcp_tool(descriptor: ToolDescriptor) -> Tool {
    let schema = match descriptor.input_schema {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    Tool::new(descriptor.name, descriptor.description, Arc::new(schema))
}

impl ServerHandler for McpDeploymentServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "claude-deployment-tools".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Deployment server with Claude integration. Use claude_code_review, \
                 claude_deployment_planning, claude_error_diagnosis, and \
                 claude_optimize_config for model-backed analysis; the remaining tools \
                 run git/gh checks against the workspace."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        let tools = self
            .inner
            .list_tools()
            .into_iter()
            .map(to_rmcp_tool)
            .collect();
        Ok(ListToolsResult {
            meta: None,
            next_cursor: None,
            tools,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let arguments = request.arguments.unwrap_or_default();
        match self.inner.call_tool(&request.name, arguments).await {
            ToolCallResult::Text(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            ToolCallResult::Error(text) => Ok(CallToolResult::error(vec![Content::text(text)])),
        }
    }
}
