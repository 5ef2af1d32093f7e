//! Raw response types of the remote content store and their normalization.
//!
//! The remote sends `null` for arrays and objects it has no value for. These
//! types absorb that before anything reaches the replica models.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use stagehost_core::{Artist, Description, LatestReleases, Shop, Social, Webmail};

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Raw artist from `GET /artists`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiArtist {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub webmail: ApiWebmail,
    #[serde(default, deserialize_with = "null_as_default")]
    pub logos: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub favicons: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiWebmail {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDescription {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artist_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_gallery: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSocial {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artist_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiShop {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artist_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub website: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_gallery: Vec<String>,
    #[serde(default)]
    pub shop_feed: Value,
}

/// Raw body of `GET /music-platforms?latest=true`.
#[derive(Debug, Default, Deserialize)]
pub struct ApiLatestReleases {
    #[serde(default)]
    pub youtube: Option<Value>,
    #[serde(default)]
    pub spotify: Option<Value>,
}

impl From<ApiArtist> for Artist {
    fn from(raw: ApiArtist) -> Self {
        Artist {
            id: raw.id,
            name: raw.name,
            kind: raw.kind,
            website: raw.website,
            webmail: Webmail { url: raw.webmail.url, email: raw.webmail.email, password: raw.webmail.password },
            logos: raw.logos,
            favicons: raw.favicons,
        }
    }
}

impl From<ApiDescription> for Description {
    fn from(raw: ApiDescription) -> Self {
        Description {
            id: raw.id,
            artist_id: raw.artist_id,
            description: raw.description,
            image_gallery: raw.image_gallery,
        }
    }
}

impl From<ApiSocial> for Social {
    fn from(raw: ApiSocial) -> Self {
        Social { id: raw.id, artist_id: raw.artist_id, name: raw.name, description: raw.description, url: raw.url }
    }
}

impl From<ApiShop> for Shop {
    fn from(raw: ApiShop) -> Self {
        Shop {
            id: raw.id,
            artist_id: raw.artist_id,
            name: raw.name,
            website: raw.website,
            image_gallery: raw.image_gallery,
            shop_feed: raw.shop_feed,
        }
    }
}

impl From<ApiLatestReleases> for LatestReleases {
    fn from(raw: ApiLatestReleases) -> Self {
        LatestReleases { youtube: raw.youtube, spotify: raw.spotify }
    }
}
