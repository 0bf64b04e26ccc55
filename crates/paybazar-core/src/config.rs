//! Panel configuration.
//!
//! Configuration comes from a TOML file; the API base URL can also be
//! supplied or overridden through the environment, which is how deploys
//! point a build at a different backend without editing the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable overriding the API base URL.
pub const ENV_API_BASE_URL: &str = "PAYBAZAAR_API_BASE_URL";

/// Panel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Base URL prefix for every outbound request.
    pub api_base_url: String,

    /// Path of the persisted session file.
    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,
}

impl PanelConfig {
    /// Loads configuration, preferring the environment override.
    ///
    /// Reads `path` when it exists, then applies [`ENV_API_BASE_URL`] on
    /// top. With no file at all, the environment variable alone is
    /// enough.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed, or when
    /// no source provides an API base URL.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            Self {
                api_base_url: String::new(),
                session_file: default_session_file(),
            }
        };

        if let Ok(base_url) = std::env::var(ENV_API_BASE_URL) {
            if !base_url.trim().is_empty() {
                config.api_base_url = base_url;
            }
        }

        if config.api_base_url.trim().is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }

        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }
}

fn default_session_file() -> PathBuf {
    // ${XDG_RUNTIME_DIR}/paybazar/session.json, falling back to /tmp.
    std::env::var("XDG_RUNTIME_DIR").map_or_else(
        |_| PathBuf::from("/tmp/paybazar/session.json"),
        |runtime_dir| {
            PathBuf::from(runtime_dir)
                .join("paybazar")
                .join("session.json")
        },
    )
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading the configuration file.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// No source provided an API base URL.
    #[error(
        "no API base URL configured: set api_base_url in the config file or {ENV_API_BASE_URL}"
    )]
    MissingBaseUrl,
}
