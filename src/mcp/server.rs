//! MCP server over stdio.
//!
//! Newline-delimited JSON-RPC messages are read from the input and each
//! response is written as one line to the output. Notifications are processed
//! without a reply. Logging goes to stderr through `tracing`; stdout carries
//! only protocol traffic.

use anyhow::Result;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use super::handlers::ToolHandlers;
use super::protocol::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, InitializeResult, JSONRPC_VERSION,
    JsonRpcRequest, JsonRpcResponse, METHOD_NOT_FOUND, PARSE_ERROR, ServerCapabilities, ServerInfo,
    ToolCallParams, ToolsCapability, ToolsListResult,
};
use super::tools::get_tools;
use crate::catalog::ProjectCatalog;
use crate::constants::{MCP_PROTOCOL_VERSION, SERVER_NAME};

/// Longest message prefix written to the debug log.
const LOG_PREVIEW_LEN: usize = 100;

pub struct McpServer<C> {
    handlers: ToolHandlers<C>,
}

impl<C: ProjectCatalog> McpServer<C> {
    pub const fn new(handlers: ToolHandlers<C>) -> Self {
        Self { handlers }
    }

    /// Serve on the process's stdin and stdout until stdin closes.
    pub async fn run_stdio(&self) -> Result<()> {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        self.serve(stdin, tokio::io::stdout()).await
    }

    /// Serve messages from `reader`, writing responses to `writer`, until EOF.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Project MCP server started in stdio mode");
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            debug!("<- {}", preview(&line));

            let Some(response) = self.handle_message(&line).await else {
                continue;
            };
            let out = serde_json::to_string(&response)?;
            debug!("-> {}", preview(&out));

            writer.write_all(out.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }

        info!("Project MCP server shutting down");
        Ok(())
    }

    /// Handle one JSON-RPC message. Returns `None` for notifications.
    pub async fn handle_message(&self, msg: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(msg) {
            Ok(value) => value,
            Err(e) => return Some(JsonRpcResponse::error(None, PARSE_ERROR, e.to_string())),
        };
        // Absent and null ids look the same after deserializing
        let null_id = value.get("id").is_some_and(Value::is_null);
        let req: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(req) => req,
            Err(e) => return Some(JsonRpcResponse::error(None, INVALID_REQUEST, e.to_string())),
        };

        if req.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                req.id,
                INVALID_REQUEST,
                format!("Unsupported jsonrpc version: {:?}", req.jsonrpc),
            ));
        }
        if null_id {
            return Some(JsonRpcResponse::error(None, INVALID_REQUEST, "Request id must not be null"));
        }

        if req.is_notification() {
            debug!("Notification {}", req.method);
            return None;
        }

        let id = req.id.clone();
        let response = match req.method.as_str() {
            "initialize" => to_response(id, &initialize_result()),
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "tools/list" => to_response(id, &ToolsListResult { tools: get_tools() }),
            "tools/call" => {
                let params: ToolCallParams = match serde_json::from_value(req.params) {
                    Ok(params) => params,
                    Err(e) => return Some(JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string())),
                };
                match self.handlers.handle(&params.name, &params.arguments).await {
                    Ok(result) => to_response(id, &result),
                    Err(err) => {
                        warn!("{}", err);
                        JsonRpcResponse::error(id, INVALID_PARAMS, err.to_string())
                    }
                }
            }
            other => JsonRpcResponse::error(id, METHOD_NOT_FOUND, format!("Unknown method: {other}")),
        };

        Some(response)
    }
}

fn initialize_result() -> InitializeResult {
    InitializeResult {
        protocol_version: MCP_PROTOCOL_VERSION.into(),
        capabilities: ServerCapabilities {
            tools: ToolsCapability {
                list_changed: false,
            },
        },
        server_info: ServerInfo {
            name: SERVER_NAME.into(),
            version: env!("CARGO_PKG_VERSION").into(),
        },
    }
}

fn to_response<T: serde::Serialize>(id: Option<Value>, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(v) => JsonRpcResponse::success(id, v),
        Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, format!("Serialization error: {e}")),
    }
}

fn preview(line: &str) -> String {
    match line.char_indices().nth(LOG_PREVIEW_LEN) {
        Some((end, _)) => format!("{}...", &line[..end]),
        None => line.to_string(),
    }
}
