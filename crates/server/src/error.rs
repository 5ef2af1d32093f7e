//! Structured errors for the stagehost tools.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Lookup failures of the `site_info` tool.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Host was empty after normalization.
    #[error("INVALID_INPUT: missing host")]
    MissingHost,

    #[error("NOT_FOUND: artist not found for host {0}")]
    ArtistNotFound(String),

    #[error("NOT_FOUND: artist description not found for {0}")]
    DescriptionNotFound(String),

    #[error("NOT_FOUND: artist socials not found for {0}")]
    SocialsNotFound(String),
}

impl From<SiteError> for McpError {
    fn from(err: SiteError) -> Self {
        let code = match &err {
            SiteError::MissingHost => -32602,
            SiteError::ArtistNotFound(_) | SiteError::DescriptionNotFound(_) | SiteError::SocialsNotFound(_) => -32001,
        };

        McpError { code: ErrorCode(code), message: err.to_string().into(), data: None }
    }
}
