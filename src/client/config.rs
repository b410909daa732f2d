use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Client configuration: the validated [`AppConfig`] plus the session token.
#[derive(Debug, Clone, Default)]
pub struct Config {
    app: AppConfig,
    token: Option<String>,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        Ok(Self {
            app: builder.build()?,
            token: None,
        })
    }

    /// Defaults, then the per-user config file if present, then environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = AppConfig::builder();
        if let Some(path) = AppConfig::default_file_path().filter(|p| p.is_file()) {
            builder = builder.merge_file(&path)?;
        }
        Self::with_builder(builder.merge_env()?)
    }

    /// Like [`Config::load`] but with an explicit config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::with_builder(AppConfig::builder().merge_file(path)?.merge_env()?)
    }

    /// Set the bearer token
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Get the bearer token
    pub fn get_token(&self) -> Option<&String> {
        self.token.as_ref()
    }

    /// Clear the token (logout)
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        let url = format!("{}{}{}", self.app.server_url, self.app.api_prefix, path);
        debug!("Resolved endpoint {}", url);
        url
    }

    pub fn server_url(&self) -> &str {
        &self.app.server_url
    }

    pub fn request_timeout(&self) -> Duration {
        self.app.request_timeout
    }

    pub fn page_size(&self) -> u32 {
        self.app.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.server_url(), "http://localhost:8000");
        assert!(config.get_token().is_none());
        assert_eq!(config.page_size(), 10);
    }

    #[test]
    fn test_set_token() {
        let mut config = Config::new();
        config.set_token(Some("test_token".to_string()));
        assert_eq!(config.get_token(), Some(&"test_token".to_string()));
    }

    #[test]
    fn test_clear_token() {
        let mut config = Config::new();
        config.set_token(Some("test_token".to_string()));
        config.clear_token();
        assert!(config.get_token().is_none());
    }

    #[test]
    fn test_api_url() {
        let config = Config::new();
        let url = config.api_url("/users/login");
        assert_eq!(url, "http://localhost:8000/api/v1/users/login");
    }

    #[test]
    fn test_api_url_without_prefix() {
        let config =
            Config::with_builder(AppConfig::builder().server_url("https://x.io/").api_prefix(""))
                .unwrap();
        assert_eq!(config.api_url("/videos"), "https://x.io/videos");
    }
}
