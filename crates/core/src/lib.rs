//! Core types and shared functionality for stagehost.
//!
//! This crate provides:
//! - Local replica store with SQLite backend
//! - Sync engine that mirrors the remote content store
//! - Read-only query facade for the serving layer
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod query;
pub mod store;
pub mod sync;

pub use config::AppConfig;
pub use error::Error;
pub use query::SiteQuery;
pub use store::{Artist, ArtistContent, Description, LatestReleases, Shop, Social, StoreDb, Webmail};
pub use sync::{RemoteResponse, RemoteSource, SyncEngine, SyncOutcome, SyncReport, SyncState};
