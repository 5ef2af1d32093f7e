//! Remote client error types.

use std::sync::Arc;

/// Errors from the remote content store client.
///
/// A non-success HTTP status is not an error here; it comes back inside the
/// response so the caller can decide.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RemoteError {
    /// Base URL is not an absolute http(s) URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// A configured header name or value is not valid HTTP.
    #[error("invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// A 2xx body that is not the expected JSON.
    #[error("parse error for {path}: {message}")]
    Parse { path: String, message: String },
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { RemoteError::Timeout } else { RemoteError::Network(Arc::new(err)) }
    }
}

impl From<RemoteError> for stagehost_core::Error {
    fn from(err: RemoteError) -> Self {
        stagehost_core::Error::Remote(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RemoteError::InvalidBaseUrl("ftp://x".to_string());
        assert!(err.to_string().contains("invalid base URL"));

        let err = RemoteError::Parse { path: "/artists".into(), message: "expected value".into() };
        assert_eq!(err.to_string(), "parse error for /artists: expected value");
    }

    #[test]
    fn test_into_core_error() {
        let err: stagehost_core::Error = RemoteError::Timeout.into();
        assert!(matches!(err, stagehost_core::Error::Remote(_)));
        assert!(err.to_string().starts_with("REMOTE_ERROR"));
    }
}
