//! artist_list tool implementation.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use stagehost_core::{Artist, SiteQuery};

use super::json_result;

/// Parameters for the artist_list tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ArtistListParams {
    /// Return at most this many artists.
    pub limit: Option<usize>,
}

/// One mirrored artist, without credentials.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArtistSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl From<Artist> for ArtistSummary {
    fn from(artist: Artist) -> Self {
        Self { id: artist.id, name: artist.name, kind: artist.kind, website: artist.website }
    }
}

/// Output from the artist_list tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArtistListOutput {
    /// Artists in replica insertion order.
    pub artists: Vec<ArtistSummary>,
    /// Number of artists in the replica, before `limit`.
    pub total: usize,
}

/// Implementation of the artist_list tool.
pub async fn artist_list_impl(query: &SiteQuery, params: ArtistListParams) -> Result<CallToolResult, McpError> {
    let artists = query.get_all_artists().await?;
    let total = artists.len();

    let artists = artists
        .into_iter()
        .take(params.limit.unwrap_or(usize::MAX))
        .map(ArtistSummary::from)
        .collect();

    json_result(&ArtistListOutput { artists, total })
}
