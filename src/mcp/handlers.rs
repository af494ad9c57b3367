//! Tool dispatch.
//!
//! [`ToolHandlers`] turns a validated [`ToolRequest`] into a service call under a
//! fresh [`RequestContext`] and returns the rendered markdown.

use std::time::Duration;

use serde_json::Value;
use tracing::{info, warn};

use super::protocol::ToolCallResult;
use crate::catalog::ProjectCatalog;
use crate::core::{CatalogError, RequestContext};
use crate::service::ProjectService;
use crate::validation::ToolRequest;

#[derive(Debug, Clone)]
pub struct ToolHandlers<C> {
    service: ProjectService<C>,
    request_timeout: Option<Duration>,
}

impl<C: ProjectCatalog> ToolHandlers<C> {
    pub const fn new(service: ProjectService<C>) -> Self {
        Self {
            service,
            request_timeout: None,
        }
    }

    /// Deadline applied to every tool call.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub const fn service(&self) -> &ProjectService<C> {
        &self.service
    }

    /// Context for one tool call.
    pub fn request_context(&self) -> RequestContext {
        let ctx = RequestContext::background();
        match self.request_timeout {
            Some(timeout) => ctx.with_timeout(timeout),
            None => ctx,
        }
    }

    /// Execute a validated request and return its markdown.
    ///
    /// # Errors
    ///
    /// Returns the service error; per-dependency failures are rendered, not returned.
    pub async fn call(&self, request: &ToolRequest) -> Result<String, CatalogError> {
        let ctx = self.request_context();
        info!("Calling tool: {} ({})", request.tool_name(), request.permalink());

        match request {
            ToolRequest::ProjectDetails(permalink) => {
                self.service.project_details(&ctx, permalink).await.map(|details| details.text)
            }
            ToolRequest::ProjectDependencies(permalink) => {
                self.service.project_dependencies(&ctx, permalink).await.map(|deps| deps.text)
            }
        }
    }

    /// Parse and execute a raw tool call.
    ///
    /// Unknown tools are the only error surfaced to the caller; every other
    /// failure becomes an `isError` result carrying the error text.
    ///
    /// # Errors
    ///
    /// [`CatalogError::ToolNotFound`] for unknown tool names.
    pub async fn handle(&self, name: &str, arguments: &Value) -> Result<ToolCallResult, CatalogError> {
        let request = match ToolRequest::parse(name, arguments) {
            Ok(request) => request,
            Err(err @ CatalogError::ToolNotFound { .. }) => return Err(err),
            Err(err) => {
                warn!("Rejected {} call: {}", name, err);
                return Ok(ToolCallResult::error(err.to_string()));
            }
        };

        match self.call(&request).await {
            Ok(text) => Ok(ToolCallResult::text(text)),
            Err(err) => {
                warn!("Tool {} failed: {}", name, err);
                Ok(ToolCallResult::error(err.to_string()))
            }
        }
    }
}
