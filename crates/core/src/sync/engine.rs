//! Sync engine: periodic full-refresh of the local replica.
//!
//! The engine owns the store's write path. Each cycle pulls the whole artist
//! collection, wipes the replica, and rewrites it artist by artist. A failed
//! or empty artist fetch aborts the cycle before anything is deleted.

use super::source::{RemoteResponse, RemoteSource};
use super::state::{SyncOutcome, SyncReport, SyncState};
use crate::Error;
use crate::query::SiteQuery;
use crate::store::{ArtistContent, StoreDb};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::{OnceCell, RwLock, watch};

/// Mirrors the remote content store into a [`StoreDb`].
///
/// Cheap to clone; clones share the same state, scheduler and store.
#[derive(Clone)]
pub struct SyncEngine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    store: StoreDb,
    source: Arc<dyn RemoteSource>,
    interval: Duration,
    syncing: AtomicBool,
    init: OnceCell<()>,
    state: watch::Sender<SyncState>,
    last_report: RwLock<Option<SyncReport>>,
}

/// Clears the single-flight flag when a cycle ends, even on panic.
struct CycleGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("state", &self.state())
            .field("interval", &self.inner.interval)
            .finish_non_exhaustive()
    }
}

impl SyncEngine {
    /// Create an engine. Nothing runs until [`SyncEngine::ready`] is awaited.
    pub fn new(store: StoreDb, source: Arc<dyn RemoteSource>, interval: Duration) -> Self {
        let (state, _) = watch::channel(SyncState::Uninitialized);
        Self {
            inner: Arc::new(EngineInner {
                store,
                source,
                interval,
                syncing: AtomicBool::new(false),
                init: OnceCell::new(),
                state,
                last_report: RwLock::new(None),
            }),
        }
    }

    /// Run the first cycle and arm the scheduler, exactly once.
    ///
    /// The first caller blocks until the first cycle finishes (successfully or
    /// not). Every other caller, concurrent or later, waits on the same
    /// one-shot initialization and never starts another.
    pub async fn ready(&self) {
        self.inner
            .init
            .get_or_init(|| async {
                tracing::info!("replica initializing");

                if self.run_exclusive(SyncState::Initializing).await.is_none() {
                    // A manual cycle got there first; wait for it instead.
                    let mut rx = self.subscribe();
                    if let Err(e) = rx.wait_for(|state| *state != SyncState::Syncing).await {
                        tracing::warn!(error = %e, "state channel closed while waiting for manual sync");
                    }
                }

                self.spawn_scheduler();
                self.inner.state.send_replace(SyncState::Ready);
                tracing::info!(interval_ms = self.inner.interval.as_millis() as u64, "replica ready");
            })
            .await;
    }

    /// Run one cycle now.
    ///
    /// Returns `None` without doing anything if a cycle is already running.
    pub async fn sync_now(&self) -> Option<SyncReport> {
        self.run_exclusive(SyncState::Syncing).await
    }

    /// Read-only view over the replica for the serving layer.
    pub fn query(&self) -> SiteQuery {
        SiteQuery::new(self.inner.store.clone())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SyncState {
        *self.inner.state.borrow()
    }

    /// Watch lifecycle state changes.
    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.inner.state.subscribe()
    }

    /// Report of the most recent finished cycle.
    pub async fn last_report(&self) -> Option<SyncReport> {
        self.inner.last_report.read().await.clone()
    }

    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    /// Fixed-delay loop: the next delay starts when the previous cycle ends.
    fn spawn_scheduler(&self) {
        let engine = self.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(engine.inner.interval).await;
                if engine.sync_now().await.is_none() {
                    tracing::debug!("scheduled sync skipped, another cycle is running");
                }
            }
        });
    }

    async fn run_exclusive(&self, during: SyncState) -> Option<SyncReport> {
        if self
            .inner
            .syncing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("sync already in progress");
            return None;
        }
        let _guard = CycleGuard { flag: &self.inner.syncing };

        self.inner.state.send_replace(during);
        let report = self.run_cycle().await;
        *self.inner.last_report.write().await = Some(report.clone());

        let after = match during {
            SyncState::Initializing => SyncState::Initializing,
            _ if self.inner.init.initialized() => SyncState::Ready,
            _ => SyncState::Uninitialized,
        };
        self.inner.state.send_replace(after);

        Some(report)
    }

    async fn run_cycle(&self) -> SyncReport {
        let start = Instant::now();
        let mut report = SyncReport::started();
        tracing::info!("sync started");

        if let Err(e) = self.fetch_and_store(&mut report).await {
            report.outcome = SyncOutcome::Failed { reason: e.to_string() };
        }
        report.elapsed_ms = start.elapsed().as_millis() as u64;

        match &report.outcome {
            SyncOutcome::Completed => {
                report.fingerprint = match self.inner.store.fingerprint().await {
                    Ok(fp) => Some(fp),
                    Err(e) => {
                        tracing::warn!(error = %e, "could not fingerprint replica");
                        None
                    }
                };
                tracing::info!(
                    artists = report.artists_written,
                    failed = report.artists_failed,
                    skipped = report.sub_resources_skipped,
                    elapsed_ms = report.elapsed_ms,
                    "sync completed"
                );
            }
            SyncOutcome::Aborted { reason } => {
                tracing::warn!(reason = %reason, "sync aborted, keeping existing replica");
            }
            SyncOutcome::Failed { reason } => {
                tracing::warn!(reason = %reason, artists = report.artists_written, "sync failed part way");
            }
        }

        report
    }

    async fn fetch_and_store(&self, report: &mut SyncReport) -> Result<(), Error> {
        let store = &self.inner.store;

        let artists = match self.inner.source.fetch_artists().await {
            Ok(resp) if !resp.is_success() => {
                report.outcome = SyncOutcome::Aborted { reason: format!("artist fetch returned status {}", resp.status) };
                return Ok(());
            }
            Ok(resp) => resp.body.unwrap_or_default(),
            Err(e) => {
                report.outcome = SyncOutcome::Aborted { reason: format!("artist fetch failed: {e}") };
                return Ok(());
            }
        };

        if artists.is_empty() {
            report.outcome = SyncOutcome::Aborted { reason: "remote returned no artists".into() };
            return Ok(());
        }

        let deleted = store.clear_all().await?;
        tracing::debug!(deleted, incoming = artists.len(), "replica cleared");

        for artist in &artists {
            if let Err(e) = store.upsert_artist(artist).await {
                tracing::warn!(artist_id = %artist.id, error = %e, "failed to store artist");
                report.artists_failed += 1;
                continue;
            }

            let (content, skipped) = self.fetch_content(&artist.id).await;
            report.sub_resources_skipped += skipped;

            if content.is_empty() {
                tracing::debug!(artist_id = %artist.id, "no sub-resources to write");
                report.artists_written += 1;
                continue;
            }

            match store.write_artist_content(&artist.id, content).await {
                Ok(()) => report.artists_written += 1,
                Err(e) => {
                    tracing::warn!(artist_id = %artist.id, error = %e, "artist content rolled back");
                    report.artists_failed += 1;
                }
            }
        }

        Ok(())
    }

    /// Fetch one artist's four sub-resources concurrently.
    ///
    /// Returns the accepted content and how many sub-resources were dropped.
    /// Every kept entity is stamped with `artist_id`.
    async fn fetch_content(&self, artist_id: &str) -> (ArtistContent, usize) {
        let source = &self.inner.source;
        let (description, socials, shop, latest) = tokio::join!(
            source.fetch_description(artist_id),
            source.fetch_socials(artist_id),
            source.fetch_shop(artist_id),
            source.fetch_latest_releases(artist_id),
        );

        let mut skipped = 0;
        let description = success_body(artist_id, "description", description, &mut skipped);
        let socials = success_body(artist_id, "socials", socials, &mut skipped);
        let shop = success_body(artist_id, "shop", shop, &mut skipped);
        let latest_releases = success_body(artist_id, "latest_releases", latest, &mut skipped);

        let content = ArtistContent {
            description: description.map(|mut d| {
                d.artist_id = artist_id.to_string();
                d
            }),
            socials: socials
                .unwrap_or_default()
                .into_iter()
                .map(|mut s| {
                    s.artist_id = artist_id.to_string();
                    s
                })
                .collect(),
            shop: shop.map(|mut s| {
                s.artist_id = artist_id.to_string();
                s
            }),
            latest_releases,
        };

        (content, skipped)
    }
}

fn success_body<T>(
    artist_id: &str, resource: &'static str, result: Result<RemoteResponse<T>, Error>, skipped: &mut usize,
) -> Option<T> {
    let body = match result {
        Ok(resp) => {
            let status = resp.status;
            let body = resp.into_success_body();
            if body.is_none() {
                tracing::debug!(artist_id, resource, status, "sub-resource not available");
            }
            body
        }
        Err(e) => {
            tracing::warn!(artist_id, resource, error = %e, "sub-resource fetch failed");
            None
        }
    };
    if body.is_none() {
        *skipped += 1;
    }
    body
}
