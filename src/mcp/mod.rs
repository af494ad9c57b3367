//! Model Context Protocol surface.
//!
//! Two transports share one [`ToolHandlers`] dispatcher:
//!
//! - [`McpServer`]: JSON-RPC 2.0 over stdio (the default);
//! - [`http`]: a single `POST` endpoint taking `{"tool", "arguments"}` bodies.
//!
//! Both expose the `project_get_details` and `project_get_dependencies` tools
//! defined in [`tools`].

pub mod handlers;
pub mod http;
pub mod protocol;
pub mod server;
pub mod tools;

pub use handlers::ToolHandlers;
pub use server::McpServer;
