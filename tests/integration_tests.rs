//! Integration tests for the deployment server and the Claude API client.
//!
//! The dispatcher is exercised end-to-end with mock components; the HTTP
//! client is exercised against an ephemeral stub server.

use async_trait::async_trait;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use deckhand_rs::claude::{ClaudeClient, CompletionModel};
use deckhand_rs::config::ClaudeConfig;
use deckhand_rs::deploy::{DeploymentTool, DeploymentToolset};
use deckhand_rs::error::DeckhandError;
use deckhand_rs::server::{DeploymentServer, ToolCallResult};
use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

// ============================================================================
// Mock Components
// ============================================================================

static MOCK_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {}
    })
});

/// Mock completion model that records nothing and returns a fixed reply
struct MockModel {
    reply: String,
}

#[async_trait]
impl CompletionModel for MockModel {
    async fn complete(
        &self,
        _prompt: &str,
        _model: &str,
        _max_tokens: u32,
    ) -> Result<String, DeckhandError> {
        Ok(self.reply.clone())
    }
}

struct VersionTool;

#[async_trait]
impl DeploymentTool for VersionTool {
    fn name(&self) -> &str {
        "server_version"
    }

    fn description(&self) -> &str {
        "Reports the deployment server version"
    }

    fn schema(&self) -> &Value {
        &MOCK_SCHEMA
    }

    async fn execute(
        &self,
        _arguments: Map<String, Value>,
    ) -> Result<Value, Box<dyn Error + Send + Sync>> {
        Ok(json!({"version": env!("CARGO_PKG_VERSION")}))
    }
}

fn make_server(reply: &str) -> DeploymentServer {
    let mut toolset = DeploymentToolset::new();
    toolset.register(Arc::new(VersionTool)).unwrap();
    DeploymentServer::new(
        toolset,
        Arc::new(MockModel {
            reply: reply.to_string(),
        }),
        "claude-3-5-sonnet-20241022",
        4000,
    )
}

fn args(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

// ============================================================================
// Dispatcher end-to-end
// ============================================================================

#[tokio::test]
async fn test_code_review_scenario() {
    let server = make_server("Looks fine.");

    let result = server
        .call_tool(
            "claude_code_review",
            args(json!({"code": "def f(): pass", "language": "python"})),
        )
        .await;

    assert_eq!(
        result,
        ToolCallResult::text("Claude Sonnet 4 Response:\n\nLooks fine.")
    );
}

#[tokio::test]
async fn test_deployment_tool_and_unknown_name_routing() {
    let server = make_server("unused");

    let version = server.call_tool("server_version", Map::new()).await;
    assert!(!version.is_error());
    let parsed: Value = serde_json::from_str(version.as_str()).unwrap();
    assert_eq!(parsed["version"], env!("CARGO_PKG_VERSION"));

    let missing = server.call_tool("time_machine", Map::new()).await;
    assert_eq!(missing, ToolCallResult::error("Tool 'time_machine' not found"));
}

#[tokio::test]
async fn test_list_tools_contains_both_sources() {
    let server = make_server("unused");
    let names: Vec<String> = server.list_tools().into_iter().map(|d| d.name).collect();

    assert_eq!(names.first().map(String::as_str), Some("server_version"));
    assert!(names.contains(&"claude_code_review".to_string()));
    assert!(names.contains(&"claude_optimize_config".to_string()));
}

// ============================================================================
// Claude API client against a stub endpoint
// ============================================================================

async fn spawn_stub(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn stub_config(addr: SocketAddr) -> ClaudeConfig {
    ClaudeConfig {
        api_key: "test-key".to_string(),
        api_url: format!("http://{addr}/v1/messages"),
        model: "claude-3-5-sonnet-20241022".to_string(),
        max_tokens: 100,
    }
}

#[tokio::test]
async fn test_complete_returns_first_text_block() {
    let router = Router::new().route(
        "/v1/messages",
        post(|| async { Json(json!({"content": [{"text": "OK"}]})) }),
    );
    let addr = spawn_stub(router).await;

    let client = ClaudeClient::new(stub_config(addr));
    let text = client
        .complete("ping", "claude-3-5-sonnet-20241022", 100)
        .await
        .unwrap();
    assert_eq!(text, "OK");
}

#[tokio::test]
async fn test_complete_sends_required_headers() {
    let router = Router::new().route(
        "/v1/messages",
        post(|headers: HeaderMap| async move {
            let keyed = headers
                .get("x-api-key")
                .and_then(|v| v.to_str().ok())
                == Some("test-key");
            let versioned = headers.contains_key("anthropic-version");
            if keyed && versioned {
                Json(json!({"content": [{"text": "OK"}]})).into_response()
            } else {
                (StatusCode::UNAUTHORIZED, "missing auth headers").into_response()
            }
        }),
    );
    let addr = spawn_stub(router).await;

    let client = ClaudeClient::new(stub_config(addr));
    let text = client
        .complete("ping", "claude-3-5-sonnet-20241022", 100)
        .await
        .unwrap();
    assert_eq!(text, "OK");
}

#[tokio::test]
async fn test_complete_surfaces_api_error_with_status_and_body() {
    let router = Router::new().route(
        "/v1/messages",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let addr = spawn_stub(router).await;

    let client = ClaudeClient::new(stub_config(addr));
    let err = client
        .complete("ping", "claude-3-5-sonnet-20241022", 100)
        .await
        .unwrap_err();

    match err {
        DeckhandError::Api { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_complete_rejects_malformed_body() {
    let router = Router::new().route(
        "/v1/messages",
        post(|| async { Json(json!({"id": "msg_1", "content": []})) }),
    );
    let addr = spawn_stub(router).await;

    let client = ClaudeClient::new(stub_config(addr));
    let err = client
        .complete("ping", "claude-3-5-sonnet-20241022", 100)
        .await
        .unwrap_err();
    assert!(matches!(err, DeckhandError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_complete_reports_transport_failure() {
    // Port 9 is discard; nothing listens there in CI.
    let config = ClaudeConfig {
        api_key: "test-key".to_string(),
        api_url: "http://127.0.0.1:9/v1/messages".to_string(),
        model: "claude-3-5-sonnet-20241022".to_string(),
        max_tokens: 100,
    };

    let client = ClaudeClient::new(config);
    let err = client
        .complete("ping", "claude-3-5-sonnet-20241022", 100)
        .await
        .unwrap_err();
    assert!(matches!(err, DeckhandError::Http(_)));
}

// ============================================================================
// Dispatcher backed by the HTTP client
// ============================================================================

#[tokio::test]
async fn test_dispatch_through_http_client() {
    let router = Router::new().route(
        "/v1/messages",
        post(|| async { Json(json!({"content": [{"text": "All clear."}]})) }),
    );
    let addr = spawn_stub(router).await;

    let client = Arc::new(ClaudeClient::new(stub_config(addr)));
    let server = DeploymentServer::new(
        DeploymentToolset::new(),
        client,
        "claude-3-5-sonnet-20241022",
        100,
    );

    let result = server
        .call_tool("claude_error_diagnosis", args(json!({"error_log": "it broke"})))
        .await;
    assert_eq!(
        result,
        ToolCallResult::text("Claude Sonnet 4 Response:\n\nAll clear.")
    );
}
