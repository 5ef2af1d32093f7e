//! Remote content store client.
//!
//! Thin JSON-over-HTTP client for the system of record the replica mirrors.
//!
//! ### Behavior
//!
//! - **Authentication**: static headers (typically `Authorization: Bearer`)
//!   are validated once and sent with every request.
//! - **No retries**: each call is a single attempt; the sync cycle decides
//!   what a failure means.
//! - **Status handling**: a non-2xx status is returned with no body instead of
//!   as an error. An empty 2xx body or JSON `null` also yields no body.
//!
//! ### Endpoints
//!
//! | Resource        | Path                                          |
//! |-----------------|-----------------------------------------------|
//! | artists         | `GET /artists`                                |
//! | description     | `GET /descriptions?artistId=<id>`             |
//! | socials         | `GET /socials?artistId=<id>`                  |
//! | shop            | `GET /shops?artistId=<id>`                    |
//! | latest releases | `GET /music-platforms?latest=true&artistId=<id>` |

pub mod dto;
pub mod error;

pub use error::RemoteError;

use async_trait::async_trait;
use dto::{ApiArtist, ApiDescription, ApiLatestReleases, ApiShop, ApiSocial};
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use stagehost_core::config::ConfigError;
use stagehost_core::{AppConfig, Artist, Description, LatestReleases, RemoteResponse, RemoteSource, Shop, Social};
use std::time::{Duration, Instant};

const ARTISTS_PATH: &str = "/artists";
const DESCRIPTIONS_PATH: &str = "/descriptions";
const SOCIALS_PATH: &str = "/socials";
const SHOPS_PATH: &str = "/shops";
const MUSIC_PLATFORMS_PATH: &str = "/music-platforms";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_millis(20_000);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "stagehost/0.1";

/// Remote client configuration.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,
    /// Headers sent with every request.
    pub headers: Vec<(String, String)>,
    /// Request timeout (default: 20s).
    pub timeout: Duration,
    /// User-agent string (default: stagehost/0.x).
    pub user_agent: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            headers: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl RemoteConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Default::default() }
    }

    /// Add `Authorization: Bearer <token>` to every request.
    pub fn with_bearer_token(mut self, token: &str) -> Self {
        self.headers
            .push((header::AUTHORIZATION.as_str().to_string(), format!("Bearer {token}")));
        self
    }

    /// Build from application config.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the API URL or token is not set.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let base_url = config.require_api_url()?;
        let token = config.require_api_token()?;
        Ok(Self { timeout: config.timeout(), user_agent: config.user_agent.clone(), ..Self::new(base_url) }
            .with_bearer_token(token))
    }
}

/// HTTP client for the remote content store.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    /// Create a client, validating the base URL and headers up front.
    pub fn new(config: RemoteConfig) -> Result<Self, RemoteError> {
        let parsed = url::Url::parse(&config.base_url).map_err(|e| RemoteError::InvalidBaseUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(RemoteError::InvalidBaseUrl(format!("unsupported scheme: {}", parsed.scheme())));
        }

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        for (name, value) in &config.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| RemoteError::InvalidHeader { name: name.clone(), reason: e.to_string() })?;
            let mut header_value = HeaderValue::from_str(value)
                .map_err(|e| RemoteError::InvalidHeader { name: name.clone(), reason: e.to_string() })?;
            if header_name == header::AUTHORIZATION {
                header_value.set_sensitive(true);
            }
            headers.insert(header_name, header_value);
        }

        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .default_headers(headers)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()?;

        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    /// Issue one GET and decode the JSON body.
    ///
    /// Never retries. See the module docs for how statuses map to the result.
    pub async fn get<T: DeserializeOwned>(
        &self, path: &str, query: &[(&str, &str)],
    ) -> Result<RemoteResponse<T>, RemoteError> {
        let start = Instant::now();
        let url = format!("{}{}", self.base_url, path);

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::debug!(path, status = status.as_u16(), "remote returned non-success status");
            return Ok(RemoteResponse::empty(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        let body = decode_body::<T>(path, &bytes)?;

        tracing::debug!(
            path,
            status = status.as_u16(),
            bytes = bytes.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "remote request completed"
        );

        Ok(RemoteResponse::new(status.as_u16(), body))
    }

    async fn get_for_artist<T: DeserializeOwned>(
        &self, path: &str, artist_id: &str,
    ) -> Result<RemoteResponse<T>, RemoteError> {
        self.get(path, &[("artistId", artist_id)]).await
    }
}

/// Decode a 2xx body; empty or `null` means no body.
fn decode_body<T: DeserializeOwned>(path: &str, bytes: &[u8]) -> Result<Option<T>, RemoteError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<Option<T>>(bytes)
        .map_err(|e| RemoteError::Parse { path: path.to_string(), message: e.to_string() })
}

#[async_trait]
impl RemoteSource for RemoteClient {
    async fn fetch_artists(&self) -> Result<RemoteResponse<Vec<Artist>>, stagehost_core::Error> {
        let response = self.get::<Vec<ApiArtist>>(ARTISTS_PATH, &[]).await?;
        Ok(response.map(|raw| raw.into_iter().map(Artist::from).collect()))
    }

    async fn fetch_description(&self, artist_id: &str) -> Result<RemoteResponse<Description>, stagehost_core::Error> {
        let response = self.get_for_artist::<ApiDescription>(DESCRIPTIONS_PATH, artist_id).await?;
        Ok(response.map(Description::from))
    }

    async fn fetch_socials(&self, artist_id: &str) -> Result<RemoteResponse<Vec<Social>>, stagehost_core::Error> {
        let response = self.get_for_artist::<Vec<ApiSocial>>(SOCIALS_PATH, artist_id).await?;
        Ok(response.map(|raw| raw.into_iter().map(Social::from).collect()))
    }

    async fn fetch_shop(&self, artist_id: &str) -> Result<RemoteResponse<Shop>, stagehost_core::Error> {
        let response = self.get_for_artist::<ApiShop>(SHOPS_PATH, artist_id).await?;
        Ok(response.map(Shop::from))
    }

    async fn fetch_latest_releases(
        &self, artist_id: &str,
    ) -> Result<RemoteResponse<LatestReleases>, stagehost_core::Error> {
        let response = self
            .get::<ApiLatestReleases>(MUSIC_PLATFORMS_PATH, &[("latest", "true"), ("artistId", artist_id)])
            .await?;
        Ok(response.map(LatestReleases::from))
    }
}
