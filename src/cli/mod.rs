//! Command-line interface for the project catalog MCP server.
//!
//! # Available Commands
//!
//! - `serve` - Run the MCP server over stdio, or over HTTP with `--http` (default)
//! - `details` - Print the details of one project
//! - `dependencies` - Print the resolved dependencies of one project
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Only log errors
//! - `--config` - Path to a TOML configuration file
//!
//! Logs always go to stderr; stdout carries MCP traffic or the rendered report.
//!
//! # Example
//!
//! ```bash
//! # Serve over stdio for an MCP client
//! project-mcp
//!
//! # Serve over HTTP on the configured port
//! project-mcp serve --http
//!
//! # One-off lookups
//! project-mcp details billing
//! project-mcp dependencies checkout --max-concurrency 8 --timeout 20
//! ```

mod lookup;
mod serve;


use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, ConfigFile};
use crate::constants::CONFIG_PATH_ENV_VAR;

/// Runtime configuration derived from the global flags.
///
/// Kept separate from [`Cli`] so tests can drive command execution without
/// touching process-wide state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Explicit configuration file from `--config`
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            config_path: None,
        }
    }

    /// Load the layered [`Config`].
    ///
    /// The file comes from `--config`, else `PROJECT_MCP_CONFIG`, else the
    /// default location when it exists.
    ///
    /// # Errors
    ///
    /// Fails when an explicit file is missing or invalid, or when no token is
    /// configured.
    pub async fn load_settings(&self) -> Result<Config> {
        let explicit = self
            .config_path
            .clone()
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV_VAR).map(PathBuf::from));
        let file = ConfigFile::discover(explicit.as_deref()).await?;
        Ok(Config::from_sources(file, |key| std::env::var(key).ok())?)
    }
}

/// Initialize the global tracing subscriber on stderr.
///
/// `RUST_LOG` takes precedence over `level`.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// MCP server exposing project catalog lookups.
#[derive(Parser)]
#[command(
    name = "project-mcp",
    about = "MCP server for project catalog details and dependencies",
    version,
    long_about = "Serves project_get_details and project_get_dependencies over MCP, backed by the Cerebro project catalog."
)]
pub struct Cli {
    /// Command to execute (defaults to `serve`)
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to a configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the MCP server
    Serve(serve::ServeCommand),

    /// Print the details of a project
    Details(lookup::DetailsCommand),

    /// Print the resolved dependencies of a project
    Dependencies(lookup::DependenciesCommand),
}

impl Cli {
    /// Execute the parsed command with configuration from the global flags.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Build the [`CliConfig`] for these flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: log_level.to_string(),
            config_path: self.config.clone(),
        }
    }

    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Some(Commands::Serve(cmd)) => cmd.execute(&config).await,
            None => serve::ServeCommand::default().execute(&config).await,
            Some(Commands::Details(cmd)) => cmd.execute(&config).await,
            Some(Commands::Dependencies(cmd)) => cmd.execute(&config).await,
        }
    }
}
