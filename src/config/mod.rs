//! Runtime configuration for the project catalog server.
//!
//! Configuration is layered, later layers winning:
//!
//! 1. built-in defaults from [`crate::constants`];
//! 2. the optional TOML file (see [`ConfigFile`]);
//! 3. environment variables.
//!
//! | File key | Environment | Default |
//! |----------|-------------|---------|
//! | `token` | `CEREBRO_TOKEN` | required |
//! | `base_url` | `CEREBRO_API_BASE_URL` | `https://cerebro.zende.sk/projects.json` |
//! | `http_timeout_secs` | `CEREBRO_HTTP_TIMEOUT_SECS` | `30` |
//! | `server_port` | `SERVER_PORT` | `:8080` |
//! | `mcp_endpoint` | `MCP_ENDPOINT` | `/mcp` |
//! | `http_mode` | `HTTP_MODE` | `false` (`HTTP_MODE=true` enables) |
//! | `max_concurrency` | `DEPENDENCY_CONCURRENCY` | unbounded |
//! | `request_timeout_secs` | `REQUEST_TIMEOUT_SECS` | none |
//!
//! Environment lookups go through a closure so tests never touch the process
//! environment.
//!
//! # Example
//!
//! ```rust,no_run
//! use project_catalog_mcp::config::{Config, ConfigFile};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let file = ConfigFile::discover(None).await?;
//! let config = Config::from_sources(file, |key| std::env::var(key).ok())?;
//! println!("catalog at {}", config.catalog_base_url);
//! # Ok(())
//! # }
//! ```

mod file;

pub use file::ConfigFile;

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CATALOG_BASE_URL, DEFAULT_HTTP_TIMEOUT, DEFAULT_MCP_ENDPOINT, DEFAULT_SERVER_PORT,
    TOKEN_ENV_VAR,
};
use crate::core::CatalogError;

/// Fully resolved configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Projects endpoint of the catalog
    pub catalog_base_url: String,
    /// Per-request HTTP timeout
    pub http_timeout: Duration,
    /// Listen address for HTTP mode, Go-style (`:8080`) or `host:port`
    pub server_port: String,
    /// Path of the HTTP tool endpoint
    pub mcp_endpoint: String,
    /// Serve over HTTP instead of stdio
    pub http_mode: bool,
    /// Cap on concurrent dependency lookups; `None` is unbounded
    pub max_concurrency: Option<NonZeroUsize>,
    /// Deadline applied to each tool call or CLI command
    pub request_timeout: Option<Duration>,
    token: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("catalog_base_url", &self.catalog_base_url)
            .field("http_timeout", &self.http_timeout)
            .field("server_port", &self.server_port)
            .field("mcp_endpoint", &self.mcp_endpoint)
            .field("http_mode", &self.http_mode)
            .field("max_concurrency", &self.max_concurrency)
            .field("request_timeout", &self.request_timeout)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Build a configuration with defaults and the given token.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            catalog_base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            server_port: DEFAULT_SERVER_PORT.to_string(),
            mcp_endpoint: DEFAULT_MCP_ENDPOINT.to_string(),
            http_mode: false,
            max_concurrency: None,
            request_timeout: None,
            token: token.into(),
        }
    }

    /// Merge the file layer and the environment layer over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] when no token is configured or a numeric
    /// value does not parse.
    pub fn from_sources<F>(file: ConfigFile, env: F) -> Result<Self, CatalogError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset, matching how the catalog token was always read.
        let env = |key: &str| env(key).filter(|value| !value.is_empty());

        let token = env(TOKEN_ENV_VAR)
            .or(file.token)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                CatalogError::config(format!("{TOKEN_ENV_VAR} environment variable is required"))
            })?;

        let mut config = Self::with_token(token);

        if let Some(url) = env("CEREBRO_API_BASE_URL").or(file.base_url) {
            config.catalog_base_url = url;
        }
        if let Some(secs) = parse_env(&env, "CEREBRO_HTTP_TIMEOUT_SECS")?.or(file.http_timeout_secs) {
            config.http_timeout = Duration::from_secs(secs);
        }
        if let Some(port) = env("SERVER_PORT").or(file.server_port) {
            config.server_port = port;
        }
        if let Some(endpoint) = env("MCP_ENDPOINT").or(file.mcp_endpoint) {
            config.mcp_endpoint = endpoint;
        }
        config.http_mode = match env("HTTP_MODE") {
            Some(value) => value == "true",
            None => file.http_mode.unwrap_or(false),
        };
        config.max_concurrency = parse_env::<usize, _>(&env, "DEPENDENCY_CONCURRENCY")?
            .or(file.max_concurrency)
            .and_then(NonZeroUsize::new);
        config.request_timeout = parse_env(&env, "REQUEST_TIMEOUT_SECS")?
            .or(file.request_timeout_secs)
            .map(Duration::from_secs);

        Ok(config)
    }

    /// The catalog API token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Socket address to bind in HTTP mode.
    ///
    /// A bare `:port` binds all interfaces.
    #[must_use]
    pub fn listen_addr(&self) -> String {
        if self.server_port.starts_with(':') {
            format!("0.0.0.0{}", self.server_port)
        } else {
            self.server_port.clone()
        }
    }
}

fn parse_env<T, F>(env: &F, key: &str) -> Result<Option<T>, CatalogError>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    env(key)
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|e| CatalogError::config(format!("invalid {key} value '{value}': {e}")))
        })
        .transpose()
}
