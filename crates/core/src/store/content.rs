//! Whole-artist writes and table-wide maintenance.
//!
//! The sync engine writes each artist's sub-resources through
//! [`StoreDb::write_artist_content`] so readers never see half an artist.

use super::connection::StoreDb;
use super::descriptions::upsert_description_row;
use super::releases::upsert_latest_releases_row;
use super::shops::upsert_shop_row;
use super::socials::upsert_social_row;
use super::{Description, LatestReleases, Shop, Social};
use crate::Error;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Every mirrored table, parents first.
pub(crate) const TABLES: &[&str] = &["artists", "descriptions", "socials", "shops", "latest_releases"];

/// Sub-resources fetched for one artist in one cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtistContent {
    pub description: Option<Description>,
    pub socials: Vec<Social>,
    pub shop: Option<Shop>,
    pub latest_releases: Option<LatestReleases>,
}

impl ArtistContent {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.socials.is_empty() && self.shop.is_none() && self.latest_releases.is_none()
    }
}

/// Row count per mirrored table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StoreCounts {
    pub artists: u64,
    pub descriptions: u64,
    pub socials: u64,
    pub shops: u64,
    pub latest_releases: u64,
}

impl StoreDb {
    /// Write all sub-resources of one artist in a single transaction.
    ///
    /// If any statement fails the transaction is rolled back and none of the
    /// artist's sub-resources from this call are visible.
    pub async fn write_artist_content(&self, artist_id: &str, content: ArtistContent) -> Result<(), Error> {
        let artist_id = artist_id.to_string();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                let tx = conn.transaction()?;

                if let Some(desc) = &content.description {
                    upsert_description_row(&tx, desc)?;
                }
                for social in &content.socials {
                    upsert_social_row(&tx, social)?;
                }
                if let Some(shop) = &content.shop {
                    upsert_shop_row(&tx, shop)?;
                }
                if let Some(latest) = &content.latest_releases {
                    upsert_latest_releases_row(&tx, &artist_id, latest)?;
                }

                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Delete every row from every mirrored table.
    ///
    /// Returns the number of deleted rows.
    pub async fn clear_all(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let tx = conn.transaction()?;
                let mut deleted = 0u64;
                for table in TABLES {
                    deleted += tx.execute(&format!("DELETE FROM {table}"), [])? as u64;
                }
                tx.commit()?;
                Ok(deleted)
            })
            .await
            .map_err(Error::from)
    }

    /// Count rows in every mirrored table.
    pub async fn counts(&self) -> Result<StoreCounts, Error> {
        self.conn
            .call(|conn| -> Result<StoreCounts, Error> {
                let count = |table: &str| -> Result<u64, Error> {
                    let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
                    Ok(n as u64)
                };
                Ok(StoreCounts {
                    artists: count("artists")?,
                    descriptions: count("descriptions")?,
                    socials: count("socials")?,
                    shops: count("shops")?,
                    latest_releases: count("latest_releases")?,
                })
            })
            .await
            .map_err(Error::from)
    }
}
