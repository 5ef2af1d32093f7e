//! Content fingerprint of the whole replica.

use super::connection::StoreDb;
use super::content::TABLES;
use crate::Error;
use sha2::{Digest, Sha256};
use tokio_rusqlite::rusqlite;

const UNIT_SEPARATOR: u8 = 0x1f;
const RECORD_SEPARATOR: u8 = 0x1e;

/// Feed every row of `table`, ordered by its first column, into `hasher`.
fn hash_table(conn: &rusqlite::Connection, table: &str, hasher: &mut Sha256) -> Result<(), Error> {
    let mut stmt = conn.prepare(&format!("SELECT * FROM {table} ORDER BY 1"))?;
    let columns = stmt.column_count();

    hasher.update(table.as_bytes());
    hasher.update([RECORD_SEPARATOR]);

    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        for idx in 0..columns {
            match row.get::<_, Option<String>>(idx)? {
                Some(value) => {
                    hasher.update([1u8]);
                    hasher.update(value.as_bytes());
                }
                None => hasher.update([0u8]),
            }
            hasher.update([UNIT_SEPARATOR]);
        }
        hasher.update([RECORD_SEPARATOR]);
    }
    Ok(())
}

impl StoreDb {
    /// SHA-256 over every row of every mirrored table in primary-key order.
    ///
    /// Two replicas with byte-identical rows have the same fingerprint.
    pub async fn fingerprint(&self) -> Result<String, Error> {
        self.conn
            .call(|conn| -> Result<String, Error> {
                let mut hasher = Sha256::new();
                for table in TABLES {
                    hash_table(conn, table, &mut hasher)?;
                }
                Ok(hex::encode(hasher.finalize()))
            })
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Artist, Social};

    #[tokio::test]
    async fn test_fingerprint_stability() {
        let db = StoreDb::open_in_memory().await.unwrap();
        db.upsert_artist(&Artist { id: "a1".into(), name: "Echo".into(), ..Default::default() })
            .await
            .unwrap();

        let first = db.fingerprint().await.unwrap();
        let second = db.fingerprint().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn test_fingerprint_tracks_changes() {
        let db = StoreDb::open_in_memory().await.unwrap();
        let empty = db.fingerprint().await.unwrap();

        db.upsert_social(&Social { id: "s1".into(), artist_id: "a1".into(), ..Default::default() })
            .await
            .unwrap();
        let with_social = db.fingerprint().await.unwrap();
        assert_ne!(empty, with_social);

        db.clear_all().await.unwrap();
        assert_eq!(db.fingerprint().await.unwrap(), empty);
    }

    #[tokio::test]
    async fn test_fingerprint_ignores_insertion_order() {
        let a = StoreDb::open_in_memory().await.unwrap();
        let b = StoreDb::open_in_memory().await.unwrap();
        let one = Artist { id: "a1".into(), ..Default::default() };
        let two = Artist { id: "a2".into(), ..Default::default() };

        a.upsert_artist(&one).await.unwrap();
        a.upsert_artist(&two).await.unwrap();
        b.upsert_artist(&two).await.unwrap();
        b.upsert_artist(&one).await.unwrap();

        assert_eq!(a.fingerprint().await.unwrap(), b.fingerprint().await.unwrap());
    }
}
