//! Artist description rows.

use super::columns::{decode_or_default, encode};
use super::connection::StoreDb;
use crate::Error;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::{params, rusqlite};

/// Free-text profile of an artist plus its image gallery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Description {
    pub id: String,
    pub artist_id: String,
    #[serde(default)]
    pub description: String,
    /// Image keys; the first one is the banner/avatar source.
    #[serde(default)]
    pub image_gallery: Vec<String>,
}

impl Description {
    /// The canonical banner/avatar image, if the gallery has one.
    pub fn banner(&self) -> Option<&str> {
        self.image_gallery.first().map(String::as_str)
    }
}

pub(crate) fn upsert_description_row(conn: &rusqlite::Connection, desc: &Description) -> Result<(), Error> {
    let gallery = encode("imageGallery", &desc.image_gallery)?;
    conn.execute(
        "INSERT INTO descriptions (id, artistId, description, imageGallery)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT(id) DO UPDATE SET
            description = excluded.description,
            imageGallery = excluded.imageGallery",
        params![&desc.id, &desc.artist_id, &desc.description, gallery],
    )?;
    Ok(())
}

impl StoreDb {
    /// Insert or update a description keyed by its `id`.
    pub async fn upsert_description(&self, desc: &Description) -> Result<(), Error> {
        let desc = desc.clone();
        self.conn
            .call(move |conn| -> Result<(), Error> { upsert_description_row(conn, &desc) })
            .await
            .map_err(Error::from)
    }

    /// Get the description of an artist.
    ///
    /// Returns None if the artist has no mirrored description.
    pub async fn get_description(&self, artist_id: &str) -> Result<Option<Description>, Error> {
        let artist_id = artist_id.to_string();
        self.conn
            .call(move |conn| -> Result<Option<Description>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT id, artistId, description, imageGallery
                     FROM descriptions WHERE artistId = ?1
                     ORDER BY rowid LIMIT 1",
                )?;

                let result = stmt.query_row(params![artist_id], |row| {
                    Ok(Description {
                        id: row.get(0)?,
                        artist_id: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                        description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                        image_gallery: decode_or_default("descriptions", "imageGallery", row.get(3)?),
                    })
                });

                match result {
                    Ok(d) => Ok(Some(d)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }
}
