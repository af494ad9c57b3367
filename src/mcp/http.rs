//! Plain HTTP tool endpoint.
//!
//! A single route accepts `POST` bodies of the form
//! `{"tool": "<name>", "arguments": {...}}` and answers with
//! `{"success": bool, "data"?: <tool result>, "error"?: "<message>"}`.
//!
//! | Condition | Status | Error |
//! |-----------|--------|-------|
//! | method other than `POST` | 405 | `Only POST method is allowed` |
//! | unparsable body | 400 | `Failed to parse request: ...` |
//! | unknown tool | 404 | `Tool not found: <name>` |
//! | tool failure | 500 | `Tool execution failed: ...` |

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Json, Router};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::routing::any;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpListener;
use tracing::{info, warn};

use super::handlers::ToolHandlers;
use super::protocol::ToolCallResult;
use crate::catalog::ProjectCatalog;
use crate::constants::{TOOL_PROJECT_DEPENDENCIES, TOOL_PROJECT_DETAILS};
use crate::core::CatalogError;
use crate::validation::ToolRequest;

/// Body of an HTTP tool call.
#[derive(Debug, Deserialize)]
pub struct HttpToolRequest {
    pub tool: String,
    #[serde(default)]
    pub arguments: Value,
}

/// Body of every HTTP response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpToolResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ToolCallResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HttpToolResponse {
    fn ok(data: ToolCallResult) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Router serving the tool endpoint at `endpoint`.
pub fn router<C>(handlers: Arc<ToolHandlers<C>>, endpoint: &str) -> Router
where
    C: ProjectCatalog + 'static,
{
    Router::new().route(endpoint, any(handle_tool_call::<C>)).with_state(handlers)
}

/// Bind `addr` and serve the tool endpoint until the server fails.
pub async fn serve<C>(handlers: Arc<ToolHandlers<C>>, addr: &str, endpoint: &str) -> Result<()>
where
    C: ProjectCatalog + 'static,
{
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    serve_on(listener, handlers, endpoint).await
}

/// Serve the tool endpoint on an already bound listener.
pub async fn serve_on<C>(
    listener: TcpListener,
    handlers: Arc<ToolHandlers<C>>,
    endpoint: &str,
) -> Result<()>
where
    C: ProjectCatalog + 'static,
{
    let local = listener.local_addr().context("failed to read listener address")?;
    info!("Project MCP server starting HTTP mode on {}", local);
    info!("Send POST requests to http://{}{}", local, endpoint);
    info!("Available tools: {}, {}", TOOL_PROJECT_DETAILS, TOOL_PROJECT_DEPENDENCIES);

    axum::serve(listener, router(handlers, endpoint)).await.context("HTTP server error")
}

async fn handle_tool_call<C: ProjectCatalog>(
    State(handlers): State<Arc<ToolHandlers<C>>>,
    method: Method,
    body: Bytes,
) -> (StatusCode, Json<HttpToolResponse>) {
    let (status, response) = execute(&handlers, &method, &body).await;
    (status, Json(response))
}

/// Evaluate one HTTP tool call.
pub async fn execute<C: ProjectCatalog>(
    handlers: &ToolHandlers<C>,
    method: &Method,
    body: &[u8],
) -> (StatusCode, HttpToolResponse) {
    if method != Method::POST {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            HttpToolResponse::failure("Only POST method is allowed"),
        );
    }

    let request: HttpToolRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                HttpToolResponse::failure(format!("Failed to parse request: {e}")),
            );
        }
    };

    let parsed = match ToolRequest::parse(&request.tool, &request.arguments) {
        Ok(parsed) => parsed,
        Err(err @ CatalogError::ToolNotFound { .. }) => {
            return (StatusCode::NOT_FOUND, HttpToolResponse::failure(err.to_string()));
        }
        Err(err) => return tool_failure(&request.tool, &err),
    };

    match handlers.call(&parsed).await {
        Ok(text) => (StatusCode::OK, HttpToolResponse::ok(ToolCallResult::text(text))),
        Err(err) => tool_failure(&request.tool, &err),
    }
}

fn tool_failure(tool: &str, err: &CatalogError) -> (StatusCode, HttpToolResponse) {
    warn!("Tool {} failed: {}", tool, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        HttpToolResponse::failure(format!("Tool execution failed: {err}")),
    )
}
