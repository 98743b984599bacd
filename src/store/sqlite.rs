use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use rusqlite_migration::{Migrations, M};
use sha2::{Digest, Sha256};

use crate::app::{GazetteError, Result};
use crate::store::{PageCache, PAGE_TTL_SECS};

/// SQLite-backed TTL page cache.
///
/// Rows are keyed by the SHA-256 of the URL; `fetched_at` is unix seconds.
pub struct SqliteCache {
    conn: Mutex<Connection>,
    ttl_secs: i64,
}

impl SqliteCache {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_ttl(Connection::open(path)?, PAGE_TTL_SECS)
    }

    pub fn in_memory() -> Result<Self> {
        Self::with_ttl(Connection::open_in_memory()?, PAGE_TTL_SECS)
    }

    pub fn with_ttl(conn: Connection, ttl_secs: i64) -> Result<Self> {
        let cache = Self {
            conn: Mutex::new(conn),
            ttl_secs,
        };
        cache.run_migrations()?;
        Ok(cache)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.lock()?;
        migrations
            .to_latest(&mut conn)
            .map_err(|_| GazetteError::Cache(rusqlite::Error::InvalidQuery))?;

        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            GazetteError::Cache(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(e.to_string()),
            ))
        })
    }

    /// Deterministic row key for a URL.
    pub fn cache_key(url: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl PageCache for SqliteCache {
    fn get(&self, url: &str) -> Result<Option<Vec<u8>>> {
        let conn = self.lock()?;
        let cutoff = Utc::now().timestamp() - self.ttl_secs;

        let row = conn
            .query_row(
                "SELECT body FROM pages WHERE key = ?1 AND fetched_at >= ?2",
                params![Self::cache_key(url), cutoff],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;

        Ok(row)
    }

    fn put(&self, url: &str, body: &[u8]) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO pages (key, url, body, fetched_at) VALUES (?1, ?2, ?3, ?4)",
            params![Self::cache_key(url), url, body, Utc::now().timestamp()],
        )?;
        Ok(())
    }

    fn purge_expired(&self) -> Result<usize> {
        let conn = self.lock()?;
        let cutoff = Utc::now().timestamp() - self.ttl_secs;
        let removed = conn.execute("DELETE FROM pages WHERE fetched_at < ?1", params![cutoff])?;
        Ok(removed)
    }

    fn flush(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute_batch("PRAGMA optimize")?;
        Ok(())
    }
}
