//! Artist rows and host resolution.

use super::columns::{decode_or_default, encode};
use super::connection::StoreDb;
use super::host::{normalize_host, serves_subdomain};
use crate::Error;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::rusqlite::{self, OptionalExtension};
use tokio_rusqlite::params;

const ARTIST_COLUMNS: &str =
    "id, name, type, website, webmail_url, webmail_email, webmail_password, logos, favicons";

/// The content owner every other mirrored entity is scoped to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Site domain used to resolve inbound hosts; not necessarily unique.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub webmail: Webmail,
    /// Logo asset keys, in display order.
    #[serde(default)]
    pub logos: Vec<String>,
    /// Favicon asset keys, in preference order.
    #[serde(default)]
    pub favicons: Vec<String>,
}

/// Webmail credentials attached to an artist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Webmail {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub(crate) fn upsert_artist_row(conn: &rusqlite::Connection, artist: &Artist) -> Result<(), Error> {
    let logos = encode("logos", &artist.logos)?;
    let favicons = encode("favicons", &artist.favicons)?;

    conn.execute(
        "INSERT INTO artists (
            id, name, type, website,
            webmail_url, webmail_email, webmail_password,
            logos, favicons
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            type = excluded.type,
            website = excluded.website,
            webmail_url = excluded.webmail_url,
            webmail_email = excluded.webmail_email,
            webmail_password = excluded.webmail_password,
            logos = excluded.logos,
            favicons = excluded.favicons",
        params![
            &artist.id,
            &artist.name,
            &artist.kind,
            &artist.website,
            &artist.webmail.url,
            &artist.webmail.email,
            &artist.webmail.password,
            logos,
            favicons,
        ],
    )?;
    Ok(())
}

fn artist_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Artist> {
    Ok(Artist {
        id: row.get(0)?,
        name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        kind: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        website: row.get::<_, Option<String>>(3)?.filter(|w| !w.is_empty()),
        webmail: Webmail {
            url: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            email: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
            password: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
        },
        logos: decode_or_default("artists", "logos", row.get(7)?),
        favicons: decode_or_default("artists", "favicons", row.get(8)?),
    })
}

impl StoreDb {
    /// Insert or update an artist.
    ///
    /// Uses UPSERT semantics keyed by `id`.
    pub async fn upsert_artist(&self, artist: &Artist) -> Result<(), Error> {
        let artist = artist.clone();
        self.conn
            .call(move |conn| -> Result<(), Error> { upsert_artist_row(conn, &artist) })
            .await
            .map_err(Error::from)
    }

    /// Resolve an inbound host to the artist serving it.
    ///
    /// The host is normalized first (scheme, `www.` and trailing slash
    /// stripped, lower-cased). The first artist, in insertion order, whose
    /// website contains it wins; failing that, the first artist whose website
    /// host it equals or is a subdomain of. An empty host matches nothing.
    pub async fn get_artist_by_website(&self, host_fragment: &str) -> Result<Option<Artist>, Error> {
        let needle = normalize_host(host_fragment);
        if needle.is_empty() {
            return Ok(None);
        }

        self.conn
            .call(move |conn| -> Result<Option<Artist>, Error> {
                let by_substring = conn
                    .query_row(
                        &format!(
                            "SELECT {ARTIST_COLUMNS} FROM artists
                             WHERE instr(lower(website), ?1) > 0
                             ORDER BY rowid LIMIT 1"
                        ),
                        params![needle],
                        artist_from_row,
                    )
                    .optional()?;
                if by_substring.is_some() {
                    return Ok(by_substring);
                }

                let mut stmt = conn.prepare(
                    "SELECT rowid, website FROM artists
                     WHERE website IS NOT NULL AND website != ''
                     ORDER BY rowid",
                )?;
                let websites = stmt
                    .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
                    .collect::<rusqlite::Result<Vec<_>>>()?;

                let Some(rowid) = websites
                    .into_iter()
                    .find(|(_, website)| serves_subdomain(website, &needle))
                    .map(|(rowid, _)| rowid)
                else {
                    return Ok(None);
                };

                let artist = conn.query_row(
                    &format!("SELECT {ARTIST_COLUMNS} FROM artists WHERE rowid = ?1"),
                    params![rowid],
                    artist_from_row,
                )?;
                Ok(Some(artist))
            })
            .await
            .map_err(Error::from)
    }

    /// Get every mirrored artist in insertion order.
    pub async fn get_all_artists(&self) -> Result<Vec<Artist>, Error> {
        self.conn
            .call(|conn| -> Result<Vec<Artist>, Error> {
                let mut stmt = conn.prepare(&format!("SELECT {ARTIST_COLUMNS} FROM artists ORDER BY rowid"))?;
                let artists = stmt
                    .query_map([], artist_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(artists)
            })
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_artist(id: &str, website: Option<&str>) -> Artist {
        Artist {
            id: id.to_string(),
            name: format!("Artist {id}"),
            kind: "band".to_string(),
            website: website.map(str::to_string),
            webmail: Webmail {
                url: "https://mail.example.com".to_string(),
                email: "band@example.com".to_string(),
                password: "secret".to_string(),
            },
            logos: vec!["a.png".to_string(), "b.png".to_string()],
            favicons: vec!["favicon.ico".to_string()],
        }
    }

    #[tokio::test]
    async fn test_upsert_and_list() {
        let db = StoreDb::open_in_memory().await.unwrap();
        let artist = make_artist("a1", Some("example.com"));
        db.upsert_artist(&artist).await.unwrap();

        let all = db.get_all_artists().await.unwrap();
        assert_eq!(all, vec![artist]);
    }

    #[tokio::test]
    async fn test_logos_keep_order() {
        let db = StoreDb::open_in_memory().await.unwrap();
        db.upsert_artist(&make_artist("a1", None)).await.unwrap();

        let all = db.get_all_artists().await.unwrap();
        assert_eq!(all[0].logos, vec!["a.png".to_string(), "b.png".to_string()]);
    }

    #[tokio::test]
    async fn test_upsert_replaces_fields() {
        let db = StoreDb::open_in_memory().await.unwrap();
        db.upsert_artist(&make_artist("a1", Some("old.com"))).await.unwrap();

        let mut updated = make_artist("a1", Some("new.com"));
        updated.logos = vec!["c.png".to_string()];
        db.upsert_artist(&updated).await.unwrap();

        let all = db.get_all_artists().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].website.as_deref(), Some("new.com"));
        assert_eq!(all[0].logos, vec!["c.png".to_string()]);
    }

    #[tokio::test]
    async fn test_host_resolution() {
        let db = StoreDb::open_in_memory().await.unwrap();
        db.upsert_artist(&make_artist("a1", Some("example.com"))).await.unwrap();
        db.upsert_artist(&make_artist("a2", Some("other.org"))).await.unwrap();

        for needle in ["https://www.Example.com/", "EXAMPLE.COM", "sub.example.com"] {
            let found = db.get_artist_by_website(needle).await.unwrap();
            assert_eq!(found.map(|a| a.id).as_deref(), Some("a1"), "lookup {needle}");
        }

        assert!(db.get_artist_by_website("unknown.net").await.unwrap().is_none());
        assert!(db.get_artist_by_website("https://").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_host_resolution_with_path_and_port() {
        let db = StoreDb::open_in_memory().await.unwrap();
        db.upsert_artist(&make_artist("a1", Some("https://www.example.com/en"))).await.unwrap();
        db.upsert_artist(&make_artist("a2", Some("https://band.org:8443"))).await.unwrap();

        let found = db.get_artist_by_website("sub.example.com").await.unwrap();
        assert_eq!(found.map(|a| a.id).as_deref(), Some("a1"));
        let found = db.get_artist_by_website("shop.band.org").await.unwrap();
        assert_eq!(found.map(|a| a.id).as_deref(), Some("a2"));
    }

    #[tokio::test]
    async fn test_host_resolution_substring_beats_subdomain() {
        let db = StoreDb::open_in_memory().await.unwrap();
        db.upsert_artist(&make_artist("a1", Some("example.com"))).await.unwrap();
        db.upsert_artist(&make_artist("a2", Some("https://shop.example.com"))).await.unwrap();

        let found = db.get_artist_by_website("shop.example.com").await.unwrap().unwrap();
        assert_eq!(found.id, "a2");
    }

    #[tokio::test]
    async fn test_host_resolution_skips_artists_without_website() {
        let db = StoreDb::open_in_memory().await.unwrap();
        db.upsert_artist(&make_artist("a0", None)).await.unwrap();
        db.upsert_artist(&make_artist("a1", Some("example.com"))).await.unwrap();

        let found = db.get_artist_by_website("example.com").await.unwrap().unwrap();
        assert_eq!(found.id, "a1");
    }

    #[tokio::test]
    async fn test_host_resolution_prefers_first_inserted() {
        let db = StoreDb::open_in_memory().await.unwrap();
        db.upsert_artist(&make_artist("a1", Some("foo.com"))).await.unwrap();
        db.upsert_artist(&make_artist("a2", Some("sub.foo.com"))).await.unwrap();

        let found = db.get_artist_by_website("foo.com").await.unwrap().unwrap();
        assert_eq!(found.id, "a1");
    }

    #[tokio::test]
    async fn test_malformed_logos_default_to_empty() {
        let db = StoreDb::open_in_memory().await.unwrap();
        db.upsert_artist(&make_artist("a1", None)).await.unwrap();
        db.conn
            .call(|conn| conn.execute("UPDATE artists SET logos = '[broken', favicons = NULL", []))
            .await
            .unwrap();

        let all = db.get_all_artists().await.unwrap();
        assert!(all[0].logos.is_empty());
        assert!(all[0].favicons.is_empty());
    }
}
