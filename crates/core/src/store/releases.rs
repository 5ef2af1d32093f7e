//! Latest-release snapshots.

use super::columns::{decode_or_default, encode_optional};
use super::connection::StoreDb;
use crate::Error;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_rusqlite::{params, rusqlite};

/// Latest release per platform. Payloads are opaque and forwarded verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LatestReleases {
    #[serde(default)]
    pub youtube: Option<Value>,
    #[serde(default)]
    pub spotify: Option<Value>,
}

pub(crate) fn upsert_latest_releases_row(
    conn: &rusqlite::Connection, artist_id: &str, latest: &LatestReleases,
) -> Result<(), Error> {
    let youtube = encode_optional("youtube", latest.youtube.as_ref())?;
    let spotify = encode_optional("spotify", latest.spotify.as_ref())?;
    conn.execute(
        "INSERT INTO latest_releases (artistId, youtube, spotify)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(artistId) DO UPDATE SET
            youtube = excluded.youtube,
            spotify = excluded.spotify",
        params![artist_id, youtube, spotify],
    )?;
    Ok(())
}

impl StoreDb {
    /// Insert or update the latest releases of an artist.
    ///
    /// A missing platform payload is stored as NULL.
    pub async fn upsert_latest_releases(&self, artist_id: &str, latest: &LatestReleases) -> Result<(), Error> {
        let artist_id = artist_id.to_string();
        let latest = latest.clone();
        self.conn
            .call(move |conn| -> Result<(), Error> { upsert_latest_releases_row(conn, &artist_id, &latest) })
            .await
            .map_err(Error::from)
    }

    /// Get the latest releases of an artist.
    ///
    /// Returns None when no row exists. A payload that fails to decode reads
    /// back as None for that platform.
    pub async fn get_latest_releases(&self, artist_id: &str) -> Result<Option<LatestReleases>, Error> {
        let artist_id = artist_id.to_string();
        self.conn
            .call(move |conn| -> Result<Option<LatestReleases>, Error> {
                let result = conn.query_row(
                    "SELECT youtube, spotify FROM latest_releases WHERE artistId = ?1",
                    params![artist_id],
                    |row| {
                        Ok(LatestReleases {
                            youtube: decode_or_default("latest_releases", "youtube", row.get(0)?),
                            spotify: decode_or_default("latest_releases", "spotify", row.get(1)?),
                        })
                    },
                );

                match result {
                    Ok(latest) => Ok(Some(latest)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }
}
