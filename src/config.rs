//! Client configuration.
//!
//! This module holds the fixed configuration every request issued
//! through the wrapper shares: the API base address, the request
//! timeout, and the login route the 401 handler redirects to.
//!
//! An optional override file is read from
//! `~/.config/jobscope/config.json`.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "jobscope";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default API origin plus versioned path prefix.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/v1";

/// HTTP request timeout in milliseconds, applied uniformly to every
/// request issued through the client.
const REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Route the 401 handler redirects to.
const LOGIN_ROUTE: &str = "/login";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine {0} directory")]
    MissingDirectory(&'static str),

    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Shared configuration for the API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// HTTP origin plus path prefix for all API calls.
    pub base_url: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
    /// Route the 401 handler redirects to.
    pub login_route: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(REQUEST_TIMEOUT_MS),
            login_route: LOGIN_ROUTE.to_string(),
        }
    }
}

/// On-disk override file. Absent fields fall back to the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct ConfigFile {
    base_url: Option<String>,
    login_route: Option<String>,
}

impl ClientConfig {
    /// Load the config file if present, falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            let file: ConfigFile = serde_json::from_str(&contents)?;
            if let Some(base_url) = file.base_url {
                config.base_url = base_url;
            }
            if let Some(login_route) = file.login_route {
                config.login_route = login_route;
            }
        }
        Ok(config)
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::MissingDirectory("config"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory the session file lives in.
    pub fn cache_dir() -> Result<PathBuf, ConfigError> {
        let cache_dir = dirs::cache_dir().ok_or(ConfigError::MissingDirectory("cache"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}
