//! Shop rows.

use super::columns::{decode_or_default, encode};
use super::connection::StoreDb;
use crate::Error;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_rusqlite::{params, rusqlite};

/// An artist's merchandise shop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub id: String,
    #[serde(default)]
    pub artist_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub image_gallery: Vec<String>,
    /// Product feed reference, forwarded verbatim.
    #[serde(default)]
    pub shop_feed: Value,
}

pub(crate) fn upsert_shop_row(conn: &rusqlite::Connection, shop: &Shop) -> Result<(), Error> {
    let gallery = encode("imageGallery", &shop.image_gallery)?;
    let feed = encode("shopFeed", &shop.shop_feed)?;
    conn.execute(
        "INSERT INTO shops (id, artistId, name, website, imageGallery, shopFeed)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            website = excluded.website,
            imageGallery = excluded.imageGallery,
            shopFeed = excluded.shopFeed",
        params![&shop.id, &shop.artist_id, &shop.name, &shop.website, gallery, feed],
    )?;
    Ok(())
}

impl StoreDb {
    /// Insert or update a shop keyed by its `id`.
    pub async fn upsert_shop(&self, shop: &Shop) -> Result<(), Error> {
        let shop = shop.clone();
        self.conn
            .call(move |conn| -> Result<(), Error> { upsert_shop_row(conn, &shop) })
            .await
            .map_err(Error::from)
    }

    /// Get the shop of an artist.
    pub async fn get_shop(&self, artist_id: &str) -> Result<Option<Shop>, Error> {
        let artist_id = artist_id.to_string();
        self.conn
            .call(move |conn| -> Result<Option<Shop>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT id, artistId, name, website, imageGallery, shopFeed
                     FROM shops WHERE artistId = ?1
                     ORDER BY rowid LIMIT 1",
                )?;

                let result = stmt.query_row(params![artist_id], |row| {
                    Ok(Shop {
                        id: row.get(0)?,
                        artist_id: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                        name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                        website: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                        image_gallery: decode_or_default("shops", "imageGallery", row.get(4)?),
                        shop_feed: decode_or_default("shops", "shopFeed", row.get(5)?),
                    })
                });

                match result {
                    Ok(s) => Ok(Some(s)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }
}
