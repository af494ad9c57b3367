//! Global constants used throughout the project catalog server.
//!
//! This module contains catalog endpoints, timeout durations, query fragments
//! and protocol identifiers that are used across multiple modules. Defining
//! them centrally keeps the wire-level strings in one discoverable place.

use std::time::Duration;

/// Default Cerebro projects endpoint.
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://cerebro.zende.sk/projects.json";

/// Default timeout for a single catalog HTTP request (30 seconds).
///
/// Applied by the HTTP client to the whole request, from connect until the
/// body has been read.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Default listen address for HTTP mode.
///
/// A leading `:` means "all interfaces", see [`crate::config::Config::listen_addr`].
pub const DEFAULT_SERVER_PORT: &str = ":8080";

/// Default path of the HTTP tool endpoint.
pub const DEFAULT_MCP_ENDPOINT: &str = "/mcp";

/// Environment variable holding the Cerebro API token.
pub const TOKEN_ENV_VAR: &str = "CEREBRO_TOKEN";

/// Environment variable pointing at an explicit configuration file.
pub const CONFIG_PATH_ENV_VAR: &str = "PROJECT_MCP_CONFIG";

/// Directory name under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "project-mcp";

/// File name of the optional configuration file.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Inlined attributes requested for every permalink lookup.
pub const PROJECT_INLINES: &[&str] = &[
    "project_repository_urls",
    "project_stakeholder_owner_name",
    "project_stakeholder_oncall_name",
    "link_deployment_url",
    "link_deployment_urls",
];

/// Include that attaches the project's outgoing dependency edges.
pub const DEPENDENCIES_INCLUDE: &str = "dependent_project_dependencies";

/// Include that attaches repositories linked to the project.
pub const REPOSITORIES_INCLUDE: &str = "project_repositories";

/// Name reported in the MCP `initialize` handshake.
pub const SERVER_NAME: &str = "project-mcp-server";

/// MCP protocol revision spoken over stdio.
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// Tool returning the details of one project.
pub const TOOL_PROJECT_DETAILS: &str = "project_get_details";

/// Tool returning the resolved dependencies of one project.
pub const TOOL_PROJECT_DEPENDENCIES: &str = "project_get_dependencies";

/// Name of the single argument both tools accept.
pub const PERMALINK_ARGUMENT: &str = "project_permalink";
