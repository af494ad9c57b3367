//! Integration test suite for the project catalog MCP server
//!
//! These tests run the real [`CerebroClient`](project_catalog_mcp::catalog::CerebroClient)
//! and the compiled `project-mcp` binary against a local stub of the catalog
//! API. No external network access is needed.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **catalog_http**: query encoding, authentication and error mapping of the HTTP client
//! - **http_mode**: round trips through the HTTP tool endpoint
//! - **cli**: command-line behavior of the binary
//! - **stub**: the in-process catalog stub shared by the other modules

mod catalog_http;
mod cli;
mod http_mode;
mod stub;
