//! Server configuration loaded from TOML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use web_search::SearchConfig;

use crate::error::{Result, ServerError};

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "MCP_WEB_SEARCH_CONFIG";

/// Top-level configuration for the server process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Upstream endpoints, headers and limits for the search core.
    pub search: SearchConfig,
    /// Deadline applied to every tool call, in seconds.
    pub call_timeout_seconds: u64,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            call_timeout_seconds: 30,
            log_filter: "info".to_owned(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(path, &content)
    }

    /// Load configuration from the resolved path, or defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`] if the file exists but is invalid.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Like [`load`](Self::load) with an explicit path.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`] if the file exists but cannot be read
    /// or is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        match Self::from_file(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                Ok(config)
            }
            Err(ServerError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file; using defaults");
                Ok(Self::default())
            }
            Err(ServerError::Io(e)) => Err(ServerError::Config(format!(
                "{}: cannot read config file: {e}",
                path.display()
            ))),
            Err(e) => Err(e),
        }
    }

    /// Config path from `MCP_WEB_SEARCH_CONFIG`, else the default location.
    pub fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_config_path)
    }

    /// Returns the default config file path: `<config dir>/mcp-web-search/config.toml`.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mcp-web-search")
            .join("config.toml")
    }

    /// Per-call deadline as a [`Duration`].
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_seconds)
    }

    /// Check the configuration before anything is built from it.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.call_timeout_seconds == 0 {
            return Err(ServerError::Config(
                "call_timeout_seconds must be greater than zero".into(),
            ));
        }
        self.search
            .validate()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Parse and validate `content`, naming `origin` in any error.
    fn from_toml(origin: &Path, content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ServerError::Config(format!("{}: {e}", origin.display())))?;
        config.validate().map_err(|e| match e {
            ServerError::Config(reason) => {
                ServerError::Config(format!("{}: {reason}", origin.display()))
            }
            other => other,
        })?;
        Ok(config)
    }
}
