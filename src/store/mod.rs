pub mod sqlite;

use crate::app::Result;

pub use sqlite::SqliteCache;

/// Default page time-to-live: entries expire one hour after insertion.
pub const PAGE_TTL_SECS: i64 = 3600;

/// Transport-level page cache with time-to-live expiry.
///
/// Lifecycle: init (open and migrate) → purge-expired (process start and
/// explicit refresh) → flush (teardown).
pub trait PageCache {
    /// An unexpired cached body, or `None` on miss/expiry.
    fn get(&self, url: &str) -> Result<Option<Vec<u8>>>;
    fn put(&self, url: &str, body: &[u8]) -> Result<()>;
    /// Drop expired entries; returns how many were removed.
    fn purge_expired(&self) -> Result<usize>;
    fn flush(&self) -> Result<()>;
}
