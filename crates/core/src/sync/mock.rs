//! In-memory remote source for engine tests.

use super::source::{RemoteResponse, RemoteSource};
use crate::Error;
use crate::store::{Artist, Description, LatestReleases, Shop, Social};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::sync::Notify;

#[derive(Debug, Default, Clone)]
pub(crate) struct Catalog {
    pub artists: Vec<Artist>,
    pub descriptions: HashMap<String, Description>,
    pub socials: HashMap<String, Vec<Social>>,
    pub shops: HashMap<String, Shop>,
    pub releases: HashMap<String, LatestReleases>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outage {
    None,
    ArtistsDown,
    ArtistsStatus(u16),
    SubResourceDown(&'static str),
}

/// Holds the artist fetch until `release` is notified.
struct Gate {
    started: Arc<Notify>,
    release: Arc<Notify>,
}

pub(crate) struct MockSource {
    catalog: Mutex<Catalog>,
    outage: Mutex<Outage>,
    gate: Mutex<Option<Gate>>,
    artist_calls: AtomicUsize,
    call_times: Mutex<Vec<Instant>>,
}

impl MockSource {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Mutex::new(catalog),
            outage: Mutex::new(Outage::None),
            gate: Mutex::new(None),
            artist_calls: AtomicUsize::new(0),
            call_times: Mutex::new(Vec::new()),
        }
    }

    pub fn set_catalog(&self, catalog: Catalog) {
        *self.catalog.lock().unwrap() = catalog;
    }

    pub fn set_outage(&self, outage: Outage) {
        *self.outage.lock().unwrap() = outage;
    }

    pub fn set_gate(&self, started: Arc<Notify>, release: Arc<Notify>) {
        *self.gate.lock().unwrap() = Some(Gate { started, release });
    }

    pub fn clear_gate(&self) {
        *self.gate.lock().unwrap() = None;
    }

    /// When each artist fetch started, in call order.
    pub fn call_times(&self) -> Vec<Instant> {
        self.call_times.lock().unwrap().clone()
    }

    pub fn artist_calls(&self) -> usize {
        self.artist_calls.load(Ordering::SeqCst)
    }

    fn outage(&self) -> Outage {
        *self.outage.lock().unwrap()
    }

    fn sub_resource<T: Clone>(
        &self, resource: &'static str, pick: impl FnOnce(&Catalog) -> Option<T>,
    ) -> Result<RemoteResponse<T>, Error> {
        if self.outage() == Outage::SubResourceDown(resource) {
            return Err(Error::Remote(format!("{resource}: connection reset")));
        }
        let catalog = self.catalog.lock().unwrap();
        Ok(match pick(&catalog) {
            Some(body) => RemoteResponse::ok(body),
            None => RemoteResponse::empty(404),
        })
    }
}

#[async_trait]
impl RemoteSource for MockSource {
    async fn fetch_artists(&self) -> Result<RemoteResponse<Vec<Artist>>, Error> {
        self.call_times.lock().unwrap().push(Instant::now());
        self.artist_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self
            .gate
            .lock()
            .unwrap()
            .as_ref()
            .map(|g| (g.started.clone(), g.release.clone()));
        if let Some((started, release)) = gate {
            started.notify_one();
            release.notified().await;
        }

        match self.outage() {
            Outage::ArtistsDown => Err(Error::Remote("connection refused".into())),
            Outage::ArtistsStatus(status) => Ok(RemoteResponse::empty(status)),
            _ => Ok(RemoteResponse::ok(self.catalog.lock().unwrap().artists.clone())),
        }
    }

    async fn fetch_description(&self, artist_id: &str) -> Result<RemoteResponse<Description>, Error> {
        self.sub_resource("description", |c| c.descriptions.get(artist_id).cloned())
    }

    async fn fetch_socials(&self, artist_id: &str) -> Result<RemoteResponse<Vec<Social>>, Error> {
        self.sub_resource("socials", |c| Some(c.socials.get(artist_id).cloned().unwrap_or_default()))
    }

    async fn fetch_shop(&self, artist_id: &str) -> Result<RemoteResponse<Shop>, Error> {
        self.sub_resource("shop", |c| c.shops.get(artist_id).cloned())
    }

    async fn fetch_latest_releases(&self, artist_id: &str) -> Result<RemoteResponse<LatestReleases>, Error> {
        self.sub_resource("latest_releases", |c| c.releases.get(artist_id).cloned())
    }
}
