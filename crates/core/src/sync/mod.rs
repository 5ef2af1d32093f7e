//! Replica synchronization.
//!
//! [`SyncEngine`] keeps the local [`StoreDb`](crate::store::StoreDb) in step with
//! a [`RemoteSource`] by running full-refresh cycles on a fixed delay.

pub mod engine;
pub mod source;
pub mod state;

#[cfg(test)]
pub(crate) mod mock;

pub use engine::SyncEngine;
pub use source::{RemoteResponse, RemoteSource};
pub use state::{SyncOutcome, SyncReport, SyncState};
