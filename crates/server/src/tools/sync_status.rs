//! sync_status tool implementation.
//!
//! Reports the engine lifecycle state, replica row counts and the outcome of
//! the last cycle.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use stagehost_core::store::StoreCounts;
use stagehost_core::{SyncEngine, SyncReport, SyncState};

use super::json_result;

/// Parameters for the sync_status tool (none).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SyncStatusParams {}

/// Output from the sync_status tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SyncStatusOutput {
    pub state: SyncState,
    pub interval_ms: u64,
    pub counts: StoreCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_report: Option<SyncReport>,
}

/// Implementation of the sync_status tool.
pub async fn sync_status_impl(engine: &SyncEngine, _params: SyncStatusParams) -> Result<CallToolResult, McpError> {
    let counts = engine.query().counts().await?;

    json_result(&SyncStatusOutput {
        state: engine.state(),
        interval_ms: engine.interval().as_millis() as u64,
        counts,
        last_report: engine.last_report().await,
    })
}
