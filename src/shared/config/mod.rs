//! Application configuration module
//!
//! Provides the validated [`AppConfig`] and the builder that layers its
//! sources: built-in defaults, an optional TOML file, then environment
//! variables.
//!
//! ```toml
//! # $CONFIG_DIR/vidtube/config.toml
//! server_url = "https://api.vidtube.example"
//! api_prefix = "/api/v1"
//! request_timeout_secs = 10
//! page_size = 12
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Default backend origin
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";
/// Default path prefix of every endpoint
pub const DEFAULT_API_PREFIX: &str = "/api/v1";
/// Requests without a response after this long count as network failures
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Default page size for paginated feeds
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Environment variable overriding the server URL
pub const ENV_API_URL: &str = "VIDTUBE_API_URL";
/// Environment variable overriding the request timeout, in seconds
pub const ENV_TIMEOUT_SECS: &str = "VIDTUBE_TIMEOUT_SECS";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend origin, without trailing slash
    pub server_url: String,
    /// Path prefix placed between the origin and each endpoint
    pub api_prefix: String,
    /// Fixed request deadline
    pub request_timeout: Duration,
    /// Items requested per page
    pub page_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(self.server_url.clone()));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "page_size",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Path of the per-user config file, if the platform has a config dir
    pub fn default_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vidtube").join("config.toml"))
    }
}

/// On-disk form of the configuration; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    server_url: Option<String>,
    api_prefix: Option<String>,
    request_timeout_secs: Option<u64>,
    page_size: Option<u32>,
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_url: Option<String>,
    api_prefix: Option<String>,
    request_timeout: Option<Duration>,
    page_size: Option<u32>,
}

impl AppConfigBuilder {
    /// Set the server URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    /// Set the API path prefix
    pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = Some(prefix.into());
        self
    }

    /// Set the request deadline
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the page size
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Layer values from a TOML file over what is already set
    pub fn merge_file(mut self, path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let file: FileConfig = toml::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!("Loaded configuration from {}", path.display());

        if let Some(url) = file.server_url {
            self.server_url = Some(url);
        }
        if let Some(prefix) = file.api_prefix {
            self.api_prefix = Some(prefix);
        }
        if let Some(secs) = file.request_timeout_secs {
            self.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(size) = file.page_size {
            self.page_size = Some(size);
        }
        Ok(self)
    }

    /// Layer values from the environment over what is already set
    pub fn merge_env(mut self) -> Result<Self, ConfigError> {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            self.server_url = Some(url);
        }
        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                warn!("Invalid {ENV_TIMEOUT_SECS} value: {e}");
                ConfigError::InvalidValue {
                    key: ENV_TIMEOUT_SECS,
                    message: e.to_string(),
                }
            })?;
            self.request_timeout = Some(Duration::from_secs(secs));
        }
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            server_url: self
                .server_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.server_url),
            api_prefix: self
                .api_prefix
                .map(normalize_prefix)
                .unwrap_or(defaults.api_prefix),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            page_size: self.page_size.unwrap_or(defaults.page_size),
        };
        config.validate()?;
        Ok(config)
    }
}

fn normalize_prefix(prefix: String) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
    #[error("cannot read {path}: {message}")]
    Io { path: PathBuf, message: String },
    #[error("cannot parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}
