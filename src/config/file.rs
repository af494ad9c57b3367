//! Optional TOML configuration file.
//!
//! ```toml
//! token = "cerebro-api-token"        # never commit this file
//! base_url = "https://cerebro.zende.sk/projects.json"
//! http_timeout_secs = 30
//! server_port = ":8080"
//! mcp_endpoint = "/mcp"
//! http_mode = false
//! max_concurrency = 16
//! request_timeout_secs = 120
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};

/// Every key is optional; unset keys fall through to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcp_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrency: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// Default location: `<platform config dir>/project-mcp/config.toml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Read and parse a configuration file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not valid TOML for this schema.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Fails on invalid TOML or unknown keys.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load the file at `explicit` if given, else the default path when it exists.
    ///
    /// A missing default file yields an empty configuration; a missing explicit
    /// file is an error.
    ///
    /// # Errors
    ///
    /// Fails if the chosen file cannot be read or parsed.
    pub async fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path).await;
        }

        match Self::default_path() {
            Some(path) if fs::try_exists(&path).await.unwrap_or(false) => Self::load(&path).await,
            _ => Ok(Self::default()),
        }
    }
}
