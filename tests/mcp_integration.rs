#![expect(
    clippy::tests_outside_test_module,
    reason = "integration tests are only compiled in test mode"
)]

//! Integration tests for the MCP server surface: handshake, catalog, and
//! tool calls flowing through the protocol layer to a mocked upstream.

use openlibrary_mcp::config::Config;
use openlibrary_mcp::mcp::{McpServer, MessageHandler};
use openlibrary_mcp::tools::ToolRegistry;
use serde_json::{Value, json};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn server_against(upstream: &MockServer) -> Arc<McpServer> {
    let mut config = Config::default();
    config.open_library.base_url = upstream.uri();
    config.dictionary.base_url = upstream.uri();
    config.http.timeout_seconds = 5;

    let registry = ToolRegistry::with_default_tools(&config).expect("registry builds");
    Arc::new(
        McpServer::new(
            "openlibrary-mcp".to_string(),
            "0.1.0".to_string(),
            Arc::new(registry),
        )
        .expect("server builds"),
    )
}

#[tokio::test]
async fn full_session_handshake_list_and_call() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/authors/OL26320A.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "J. R. R. Tolkien",
            "birth_date": "3 January 1892",
            "death_date": "2 September 1973"
        })))
        .mount(&upstream)
        .await;

    let server = server_against(&upstream);
    let handler = MessageHandler::new(Arc::clone(&server));

    // Handshake.
    let init = handler
        .handle_initialize(Some(json!({
            "protocolVersion": "2025-06-18",
            "capabilities": {},
            "clientInfo": {"name": "integration-client", "version": "1.0.0"}
        })))
        .await
        .expect("initialize succeeds");
    assert_eq!(init["serverInfo"]["name"], "openlibrary-mcp");

    // Catalog.
    let listed = handler.handle_list_tools().expect("list succeeds");
    let tools = listed["tools"].as_array().expect("tools array");
    assert_eq!(tools.len(), 9);
    assert!(tools.iter().any(|tool| tool["name"] == "get_author_info"));

    // Call through the protocol layer to the mocked upstream.
    let result = handler
        .handle_call_tool(Some(json!({
            "name": "get_author_info",
            "arguments": {"author_olid": "OL26320A"}
        })))
        .await
        .expect("protocol call succeeds");

    assert_eq!(result["isError"], false);
    let text = result["content"][0]["text"].as_str().expect("text content");
    let record: Value = serde_json::from_str(text).expect("pretty JSON");
    assert_eq!(record["name"], "J. R. R. Tolkien");
    assert_eq!(record["death_date"], "2 September 1973");
}

#[tokio::test]
async fn upstream_failure_stays_in_band() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works/OL1W.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&upstream)
        .await;

    let server = server_against(&upstream);
    let handler = MessageHandler::new(server);

    let result = handler
        .handle_call_tool(Some(json!({
            "name": "get_work_info",
            "arguments": {"work_olid": "OL1W"}
        })))
        .await
        .expect("protocol call still succeeds");

    assert_eq!(result["isError"], true);
    assert_eq!(
        result["content"][0]["text"],
        "Work not found. Status Code: 500"
    );
}

#[tokio::test]
async fn call_tool_result_uses_mcp_field_names() {
    let upstream = MockServer::start().await;
    let server = server_against(&upstream);
    let handler = MessageHandler::new(server);

    let result = handler
        .handle_call_tool(Some(json!({"name": "missing_tool"})))
        .await
        .expect("protocol call succeeds");

    // Wire names, not Rust names: isError and typed text content.
    let object = result.as_object().expect("object");
    assert!(object.contains_key("isError"));
    assert_eq!(result["content"][0]["type"], "text");
}
