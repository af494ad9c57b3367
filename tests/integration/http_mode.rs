//! Round trips through the HTTP tool endpoint.

use std::sync::Arc;

use project_catalog_mcp::catalog::CerebroClient;
use project_catalog_mcp::mcp::ToolHandlers;
use project_catalog_mcp::mcp::http::{HttpToolResponse, serve_on};
use project_catalog_mcp::service::ProjectService;
use project_catalog_mcp::test_utils::fixtures;
use reqwest::StatusCode;
use serde_json::json;
use tokio::net::TcpListener;

use crate::stub::StubCatalog;

/// Start the HTTP endpoint at `/mcp` backed by `stub`; returns its URL.
async fn start_server(stub: &StubCatalog) -> String {
    let client = CerebroClient::new(&stub.config()).unwrap();
    let handlers = Arc::new(ToolHandlers::new(ProjectService::new(client)));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        serve_on(listener, handlers, "/mcp").await.unwrap();
    });
    format!("http://{addr}/mcp")
}

#[tokio::test]
async fn test_dependencies_over_http() {
    let stub = StubCatalog::builder()
        .root(&fixtures::project(1, "Checkout"), &fixtures::edges(1, &[8]), &[])
        .project(&fixtures::project(8, "Billing"))
        .start()
        .await;
    let url = start_server(&stub).await;

    let response = reqwest::Client::new()
        .post(&url)
        .json(&json!({"tool": "project_get_dependencies", "arguments": {"project_permalink": "checkout"}}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: HttpToolResponse = response.json().await.unwrap();
    assert!(body.success);
    let text = body.data.unwrap().first_text().unwrap().to_string();
    assert!(text.starts_with("# Dependencies for Project: Checkout\n"));
    assert!(text.contains("### 1. Billing"));
}

#[tokio::test]
async fn test_http_error_statuses() {
    let stub = StubCatalog::builder().start().await;
    let url = start_server(&stub).await;
    let http = reqwest::Client::new();

    let get = http.get(&url).send().await.unwrap();
    assert_eq!(get.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body: HttpToolResponse = get.json().await.unwrap();
    assert_eq!(body.error.as_deref(), Some("Only POST method is allowed"));

    let garbage = http.post(&url).body("not json").send().await.unwrap();
    assert_eq!(garbage.status(), StatusCode::BAD_REQUEST);

    let unknown = http.post(&url).json(&json!({"tool": "nope"})).send().await.unwrap();
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    let body: HttpToolResponse = unknown.json().await.unwrap();
    assert_eq!(body.error.as_deref(), Some("Tool not found: nope"));

    let missing = http
        .post(&url)
        .json(&json!({"tool": "project_get_details", "arguments": {"project_permalink": "ghost"}}))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: HttpToolResponse = missing.json().await.unwrap();
    assert!(!body.success);
    assert_eq!(body.error.as_deref(), Some("Tool execution failed: project not found: ghost"));
}

#[tokio::test]
async fn test_other_paths_are_not_served() {
    let stub = StubCatalog::builder().start().await;
    let url = start_server(&stub).await;

    let response = reqwest::Client::new()
        .post(url.replace("/mcp", "/other"))
        .json(&json!({"tool": "project_get_details"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(stub.requests().is_empty());
}
