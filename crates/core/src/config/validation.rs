//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `sync_interval_ms` is below 1 second or above 24 hours
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` is empty
    /// - `api_url` is set but is not an http(s) URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sync_interval_ms < 1_000 {
            return Err(ConfigError::Invalid {
                field: "sync_interval_ms".into(),
                reason: "must be at least 1000ms".into(),
            });
        }
        if self.sync_interval_ms > 86_400_000 {
            return Err(ConfigError::Invalid {
                field: "sync_interval_ms".into(),
                reason: "must not exceed 24 hours (86400000ms)".into(),
            });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if let Some(url) = &self.api_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            return Err(ConfigError::Invalid { field: "api_url".into(), reason: "must be an http(s) URL".into() });
        }

        if self.timeout_ms > self.sync_interval_ms {
            tracing::warn!(
                timeout_ms = self.timeout_ms,
                sync_interval_ms = self.sync_interval_ms,
                "HTTP timeout is longer than the sync interval; \
                 slow cycles will run back to back"
            );
        }

        Ok(())
    }
}
