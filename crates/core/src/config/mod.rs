//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (STAGEHOST_*)
//! 2. TOML config file (if STAGEHOST_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (STAGEHOST_*)
/// 2. TOML config file (if STAGEHOST_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the remote system of record.
    ///
    /// Set via STAGEHOST_API_URL environment variable.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Bearer token sent to the remote system of record.
    ///
    /// Set via STAGEHOST_API_TOKEN environment variable.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Path to the SQLite replica database.
    ///
    /// Set via STAGEHOST_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Delay between the end of one sync cycle and the start of the next.
    ///
    /// Set via STAGEHOST_SYNC_INTERVAL_MS environment variable.
    #[serde(default = "default_sync_interval_ms")]
    pub sync_interval_ms: u64,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via STAGEHOST_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via STAGEHOST_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./stagehost.sqlite")
}

fn default_sync_interval_ms() -> u64 {
    300_000 // 5 minutes
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_user_agent() -> String {
    "stagehost/0.1".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_token: None,
            db_path: default_db_path(),
            sync_interval_ms: default_sync_interval_ms(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Sync interval as Duration for the engine scheduler.
    pub fn sync_interval(&self) -> Duration {
        Duration::from_millis(self.sync_interval_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `STAGEHOST_`
    /// 2. TOML file from `STAGEHOST_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("STAGEHOST_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("STAGEHOST_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Base URL of the remote store, required before the engine can start.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the API URL is not set.
    pub fn require_api_url(&self) -> Result<&str, ConfigError> {
        self.api_url.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "api_url".into(),
            hint: "Set STAGEHOST_API_URL environment variable".into(),
        })
    }

    /// Bearer token for the remote store, required before the engine can start.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the API token is not set.
    pub fn require_api_token(&self) -> Result<&str, ConfigError> {
        self.api_token.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "api_token".into(),
            hint: "Set STAGEHOST_API_TOKEN environment variable".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.db_path, PathBuf::from("./stagehost.sqlite"));
        assert_eq!(config.user_agent, "stagehost/0.1");
        assert_eq!(config.sync_interval_ms, 300_000);
        assert_eq!(config.timeout_ms, 20_000);
        assert!(config.api_url.is_none());
        assert!(config.api_token.is_none());
    }

    #[test]
    fn test_durations() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(20_000));
        assert_eq!(config.sync_interval(), Duration::from_secs(300));
    }

    #[test]
    fn test_require_api_token_missing() {
        let config = AppConfig::default();
        let result = config.require_api_token();
        assert!(matches!(result, Err(ConfigError::Missing { .. })));
    }

    #[test]
    fn test_require_api_url_present() {
        let config = AppConfig { api_url: Some("https://api.example.com".into()), ..Default::default() };
        assert_eq!(config.require_api_url().unwrap(), "https://api.example.com");
    }

    #[test]
    fn test_toml_layer_overrides_defaults() {
        let figment = Figment::from(Serialized::defaults(AppConfig::default())).merge(Toml::string(
            r#"
            api_url = "https://api.example.com"
            sync_interval_ms = 60000
            "#,
        ));
        let config: AppConfig = figment.extract().unwrap();
        assert_eq!(config.api_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.sync_interval_ms, 60_000);
        assert_eq!(config.timeout_ms, 20_000);
    }
}
