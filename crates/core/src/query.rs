//! Read-only view of the replica for the serving layer.
//!
//! Every method reads only the local store. No call here touches the
//! network, so answers come back at local-disk latency even while the remote
//! is unreachable. Methods are async only because the store runs on its own
//! worker thread.

use crate::Error;
use crate::store::{Artist, Description, LatestReleases, Shop, Social, StoreCounts, StoreDb};

#[derive(Clone, Debug)]
pub struct SiteQuery {
    store: StoreDb,
}

impl SiteQuery {
    pub fn new(store: StoreDb) -> Self {
        Self { store }
    }

    /// Resolve an artist from a request host or website fragment.
    pub async fn get_artist_by_website(&self, host: &str) -> Result<Option<Artist>, Error> {
        self.store.get_artist_by_website(host).await
    }

    pub async fn get_description(&self, artist_id: &str) -> Result<Option<Description>, Error> {
        self.store.get_description(artist_id).await
    }

    pub async fn get_socials(&self, artist_id: &str) -> Result<Vec<Social>, Error> {
        self.store.get_socials(artist_id).await
    }

    pub async fn get_shop(&self, artist_id: &str) -> Result<Option<Shop>, Error> {
        self.store.get_shop(artist_id).await
    }

    pub async fn get_latest_releases(&self, artist_id: &str) -> Result<Option<LatestReleases>, Error> {
        self.store.get_latest_releases(artist_id).await
    }

    /// All artists in insertion order.
    pub async fn get_all_artists(&self) -> Result<Vec<Artist>, Error> {
        self.store.get_all_artists().await
    }

    /// Row counts per mirrored table.
    pub async fn counts(&self) -> Result<StoreCounts, Error> {
        self.store.counts().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ArtistContent;

    async fn seeded() -> SiteQuery {
        let store = StoreDb::open_in_memory().await.unwrap();
        store
            .upsert_artist(&Artist {
                id: "a1".into(),
                name: "Echo".into(),
                website: Some("https://www.echo.band".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        store
            .write_artist_content(
                "a1",
                ArtistContent {
                    description: Some(Description { id: "d1".into(), artist_id: "a1".into(), ..Default::default() }),
                    socials: vec![Social { id: "s1".into(), artist_id: "a1".into(), ..Default::default() }],
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        SiteQuery::new(store)
    }

    #[tokio::test]
    async fn test_resolves_host_then_content() {
        let query = seeded().await;

        let artist = query.get_artist_by_website("echo.band").await.unwrap().unwrap();
        assert_eq!(artist.name, "Echo");
        assert!(query.get_description(&artist.id).await.unwrap().is_some());
        assert_eq!(query.get_socials(&artist.id).await.unwrap().len(), 1);
        assert!(query.get_shop(&artist.id).await.unwrap().is_none());
        assert!(query.get_latest_releases(&artist.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_host() {
        let query = seeded().await;
        assert!(query.get_artist_by_website("nobody.example").await.unwrap().is_none());
        assert!(query.get_artist_by_website("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_counts() {
        let query = seeded().await;
        let counts = query.counts().await.unwrap();
        assert_eq!(counts.artists, 1);
        assert_eq!(counts.descriptions, 1);
        assert_eq!(counts.socials, 1);
        assert_eq!(counts.shops, 0);
        assert_eq!(query.get_all_artists().await.unwrap().len(), 1);
    }
}
