//! Engine lifecycle state and cycle reports.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Engine lifecycle state.
///
/// ```text
/// Uninitialized → Initializing → Ready ⇄ Syncing
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    /// Constructed, `ready()` not yet called.
    Uninitialized,
    /// Running the first cycle inside `ready()`.
    Initializing,
    /// Idle between cycles; the scheduler is armed.
    Ready,
    /// A scheduled or manual cycle is running.
    Syncing,
}

impl std::fmt::Display for SyncState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Initializing => write!(f, "initializing"),
            Self::Ready => write!(f, "ready"),
            Self::Syncing => write!(f, "syncing"),
        }
    }
}

/// How a cycle ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// Every artist was processed. Individual artists may still have failed.
    Completed,
    /// The artist collection could not be fetched or was empty; nothing local changed.
    Aborted { reason: String },
    /// An error ended the cycle after the wipe; rows committed so far remain.
    Failed { reason: String },
}

/// Summary of one sync cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SyncReport {
    pub outcome: SyncOutcome,
    /// Artists whose row and sub-resources were committed.
    pub artists_written: usize,
    /// Artists whose row or content transaction failed.
    pub artists_failed: usize,
    /// Sub-resources dropped because their fetch failed or returned nothing.
    pub sub_resources_skipped: usize,
    /// RFC 3339 start time.
    pub started_at: String,
    pub elapsed_ms: u64,
    /// Replica fingerprint after a completed cycle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

impl SyncReport {
    pub(crate) fn started() -> Self {
        Self {
            outcome: SyncOutcome::Completed,
            artists_written: 0,
            artists_failed: 0,
            sub_resources_skipped: 0,
            started_at: chrono::Utc::now().to_rfc3339(),
            elapsed_ms: 0,
            fingerprint: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.outcome == SyncOutcome::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display() {
        assert_eq!(SyncState::Initializing.to_string(), "initializing");
        assert_eq!(SyncState::Syncing.to_string(), "syncing");
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(SyncOutcome::Aborted { reason: "empty".into() }).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "aborted", "reason": "empty"}));

        let json = serde_json::to_value(SyncOutcome::Completed).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "completed"}));
    }
}
