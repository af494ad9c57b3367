//! Project catalog MCP server
//!
//! A Model Context Protocol server answering two questions about projects in the
//! Cerebro catalog: "what is this project?" and "what does it depend on?". The
//! answers are markdown reports built from catalog lookups.
//!
//! # Architecture Overview
//!
//! A tool call flows through these layers:
//!
//! 1. [`mcp`] receives the call over stdio JSON-RPC or the HTTP endpoint;
//! 2. [`validation`] turns the raw arguments into a typed request, once;
//! 3. [`service`] performs the permalink lookup through a [`catalog::ProjectCatalog`];
//! 4. [`resolver`] resolves every outgoing dependency edge concurrently;
//! 5. [`report`] renders the outcome as markdown.
//!
//! Every lookup runs under a [`core::RequestContext`] carrying cancellation and
//! an optional deadline.
//!
//! ## Dependency Resolution
//!
//! For a project with N outgoing edges the resolver issues N lookups at once
//! (optionally capped) and returns exactly N results in edge order. A failed
//! lookup affects only its own entry, and a dangling reference is reported as
//! "not found" rather than as a failure.
//!
//! # Core Modules
//!
//! - [`catalog`] - Catalog access trait and the Cerebro HTTP client
//! - [`cli`] - Command-line interface
//! - [`config`] - Layered configuration (defaults, TOML file, environment)
//! - [`constants`] - Endpoints, timeouts and protocol identifiers
//! - [`core`] - Error taxonomy and request contexts
//! - [`mcp`] - MCP protocol types, tool dispatch and transports
//! - [`models`] - Catalog records
//! - [`report`] - Markdown rendering
//! - [`resolver`] - Concurrent dependency resolution
//! - [`service`] - Project operations behind the tools
//! - [`validation`] - Boundary validation of tool and CLI input
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Serve MCP over stdio (default)
//! CEREBRO_TOKEN=... project-mcp
//!
//! # Serve the HTTP endpoint
//! CEREBRO_TOKEN=... project-mcp serve --http
//!
//! # Query once from a terminal
//! CEREBRO_TOKEN=... project-mcp dependencies checkout
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod mcp;
pub mod models;
pub mod report;
pub mod resolver;
pub mod service;
pub mod validation;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
