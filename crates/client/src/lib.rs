//! Client code for stagehost.
//!
//! This crate provides the HTTP client for the remote content store. It
//! implements [`stagehost_core::RemoteSource`] so the sync engine can pull
//! artists and their sub-resources from it.

pub mod remote;

pub use remote::{RemoteClient, RemoteConfig, RemoteError};
