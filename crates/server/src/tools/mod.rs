//! MCP tool implementations.
//!
//! Every tool reads the local replica only; none of them reach the remote.

pub mod artist_list;
pub mod site_info;
pub mod sync_status;

pub use artist_list::{ArtistListParams, artist_list_impl};
pub use site_info::{SiteInfoParams, site_info_impl};
pub use sync_status::{SyncStatusParams, sync_status_impl};

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;
use stagehost_core::Error;

/// Render a tool output as pretty JSON text content.
fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}
