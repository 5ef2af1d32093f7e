//! SQLite-backed local replica of the remote content store.
//!
//! This module provides the durable mirror that the sync engine writes and
//! the query layer reads, using SQLite with async access via tokio-rusqlite.
//! It supports:
//!
//! - Idempotent schema migrations, so restarts are safe
//! - Insert-or-replace writes keyed by primary id
//! - Per-artist transactional writes
//! - Decode-or-default handling of JSON columns
//! - Best-effort host resolution by website

mod columns;
pub mod connection;
pub mod content;
pub mod digest;
pub mod host;
pub mod migrations;

mod artists;
mod descriptions;
mod releases;
mod shops;
mod socials;

pub use crate::Error;

pub use artists::{Artist, Webmail};
pub use connection::StoreDb;
pub use content::{ArtistContent, StoreCounts};
pub use descriptions::Description;
pub use host::normalize_host;
pub use releases::LatestReleases;
pub use shops::Shop;
pub use socials::Social;
