//! Social profile rows.

use super::connection::StoreDb;
use crate::Error;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::{params, rusqlite};

/// A social network profile linked from an artist site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Social {
    pub id: String,
    #[serde(default)]
    pub artist_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
}

pub(crate) fn upsert_social_row(conn: &rusqlite::Connection, social: &Social) -> Result<(), Error> {
    conn.execute(
        "INSERT INTO socials (id, artistId, name, description, url)
        VALUES (?1, ?2, ?3, ?4, ?5)
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            description = excluded.description,
            url = excluded.url",
        params![&social.id, &social.artist_id, &social.name, &social.description, &social.url],
    )?;
    Ok(())
}

impl StoreDb {
    /// Insert or update a social profile keyed by its `id`.
    pub async fn upsert_social(&self, social: &Social) -> Result<(), Error> {
        let social = social.clone();
        self.conn
            .call(move |conn| -> Result<(), Error> { upsert_social_row(conn, &social) })
            .await
            .map_err(Error::from)
    }

    /// Get all social profiles of an artist, in the order they were mirrored.
    pub async fn get_socials(&self, artist_id: &str) -> Result<Vec<Social>, Error> {
        let artist_id = artist_id.to_string();
        self.conn
            .call(move |conn| -> Result<Vec<Social>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT id, artistId, name, description, url
                     FROM socials WHERE artistId = ?1 ORDER BY rowid",
                )?;

                let socials = stmt
                    .query_map(params![artist_id], |row| {
                        Ok(Social {
                            id: row.get(0)?,
                            artist_id: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                            name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                            description: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                            url: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                        })
                    })?
                    .collect::<rusqlite::Result<Vec<_>>>()?;

                Ok(socials)
            })
            .await
            .map_err(Error::from)
    }
}
