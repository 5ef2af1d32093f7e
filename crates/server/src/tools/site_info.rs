//! site_info tool implementation.
//!
//! Resolves the artist behind a site host and returns everything a site
//! needs to render: artist, description, socials, shop and latest releases.

use crate::error::SiteError;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use stagehost_core::store::normalize_host;
use stagehost_core::{Artist, Description, LatestReleases, Shop, SiteQuery, Social};

use super::json_result;

/// Parameters for the site_info tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SiteInfoParams {
    /// Request host or website, e.g. `www.example.com` or `https://example.com/`.
    pub host: String,
}

/// Output from the site_info tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteInfoOutput {
    pub artist: Artist,
    pub description: Description,
    pub socials: Vec<Social>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop: Option<Shop>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_releases: Option<LatestReleases>,
}

/// Implementation of the site_info tool.
///
/// An artist without a description or without socials is reported as not
/// found. Webmail passwords are never returned.
pub async fn site_info_impl(query: &SiteQuery, params: SiteInfoParams) -> Result<CallToolResult, McpError> {
    let host = normalize_host(&params.host);
    if host.is_empty() {
        return Err(SiteError::MissingHost.into());
    }

    let mut artist = query
        .get_artist_by_website(&host)
        .await?
        .ok_or_else(|| SiteError::ArtistNotFound(host.clone()))?;
    artist.webmail.password.clear();

    let description = query
        .get_description(&artist.id)
        .await?
        .ok_or_else(|| SiteError::DescriptionNotFound(artist.id.clone()))?;

    let socials = query.get_socials(&artist.id).await?;
    if socials.is_empty() {
        return Err(SiteError::SocialsNotFound(artist.id.clone()).into());
    }

    let shop = query.get_shop(&artist.id).await?;
    let latest_releases = query.get_latest_releases(&artist.id).await?;

    tracing::debug!(host = %host, artist_id = %artist.id, "site resolved");

    json_result(&SiteInfoOutput { artist, description, socials, shop, latest_releases })
}
