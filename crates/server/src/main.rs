//! stagehost server entry point.
//!
//! Boots the replica (config, store, remote client, sync engine), waits for the
//! first sync cycle, then serves the read tools over MCP on stdio.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use stagehost_client::{RemoteClient, RemoteConfig};
use stagehost_core::{AppConfig, StoreDb, SyncEngine};
use tracing_subscriber::EnvFilter;

mod error;
mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    let remote = RemoteClient::new(RemoteConfig::from_app_config(&config)?)?;
    let store = StoreDb::open(&config.db_path).await?;

    tracing::info!(
        db_path = %config.db_path.display(),
        interval_ms = config.sync_interval_ms,
        "starting stagehost"
    );

    let engine = SyncEngine::new(store, Arc::new(remote), config.sync_interval());
    engine.ready().await;

    tracing::info!("serving MCP on stdio transport");

    let handler = handler::StageHostServer::new(engine);
    let server = serve_server(handler, stdio()).await?;

    server.waiting().await?;

    Ok(())
}
