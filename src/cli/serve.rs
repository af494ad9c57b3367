//! Run the MCP server.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::CliConfig;
use crate::catalog::CerebroClient;
use crate::config::Config;
use crate::mcp::{self, McpServer, ToolHandlers};
use crate::service::ProjectService;

/// Serve MCP over stdio, or over HTTP.
#[derive(Args, Debug, Default)]
pub struct ServeCommand {
    /// Serve the HTTP tool endpoint instead of stdio (also `HTTP_MODE=true`)
    #[arg(long)]
    pub http: bool,
}

impl ServeCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let config = cli.load_settings().await?;
        let handlers = build_handlers(&config)?;

        if self.http || config.http_mode {
            let addr = config.listen_addr();
            mcp::http::serve(Arc::new(handlers), &addr, &config.mcp_endpoint).await
        } else {
            info!("Set HTTP_MODE=true or pass --http to serve over HTTP instead");
            McpServer::new(handlers).run_stdio().await
        }
    }
}

/// Wire the catalog client, service and dispatcher from `config`.
pub fn build_handlers(config: &Config) -> Result<ToolHandlers<CerebroClient>> {
    let client = CerebroClient::new(config)?;
    let service = ProjectService::new(client).with_max_concurrency(config.max_concurrency);
    Ok(ToolHandlers::new(service).with_request_timeout(config.request_timeout))
}
