//! Remote source abstraction for sync cycles.

use crate::Error;
use crate::store::{Artist, Description, LatestReleases, Shop, Social};
use async_trait::async_trait;

/// Uniform result of one remote fetch: the HTTP status plus the decoded body.
///
/// A non-success status is not an error at this level; the caller decides
/// whether it aborts the enclosing operation.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteResponse<T> {
    pub status: u16,
    pub body: Option<T>,
}

impl<T> RemoteResponse<T> {
    pub fn new(status: u16, body: Option<T>) -> Self {
        Self { status, body }
    }

    /// 200 response carrying `body`.
    pub fn ok(body: T) -> Self {
        Self { status: 200, body: Some(body) }
    }

    /// Response with a status and no body.
    pub fn empty(status: u16) -> Self {
        Self { status, body: None }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Convert the body, keeping the status.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RemoteResponse<U> {
        RemoteResponse { status: self.status, body: self.body.map(f) }
    }

    /// The body, but only when the status was a success.
    pub fn into_success_body(self) -> Option<T> {
        if self.is_success() { self.body } else { None }
    }
}

/// The remote system of record, one fetch per entity collection.
///
/// Implementations must not retry; a cycle treats every call as a single
/// attempt.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch the full artist collection.
    async fn fetch_artists(&self) -> Result<RemoteResponse<Vec<Artist>>, Error>;

    /// Fetch the description of one artist.
    async fn fetch_description(&self, artist_id: &str) -> Result<RemoteResponse<Description>, Error>;

    /// Fetch the social profiles of one artist.
    async fn fetch_socials(&self, artist_id: &str) -> Result<RemoteResponse<Vec<Social>>, Error>;

    /// Fetch the shop of one artist.
    async fn fetch_shop(&self, artist_id: &str) -> Result<RemoteResponse<Shop>, Error>;

    /// Fetch the latest youtube/spotify releases of one artist.
    async fn fetch_latest_releases(&self, artist_id: &str) -> Result<RemoteResponse<LatestReleases>, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_body() {
        assert_eq!(RemoteResponse::ok(3).into_success_body(), Some(3));
        assert_eq!(RemoteResponse::new(404, Some(3)).into_success_body(), None);
        assert_eq!(RemoteResponse::<u8>::empty(204).into_success_body(), None);
    }

    #[test]
    fn test_is_success_range() {
        assert!(RemoteResponse::<()>::empty(200).is_success());
        assert!(RemoteResponse::<()>::empty(299).is_success());
        assert!(!RemoteResponse::<()>::empty(301).is_success());
        assert!(!RemoteResponse::<()>::empty(500).is_success());
    }
}
