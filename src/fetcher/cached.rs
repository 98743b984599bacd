use std::sync::Arc;

use tracing::debug;

use crate::app::Result;
use crate::fetcher::Fetcher;
use crate::store::{PageCache, SqliteCache};

/// Transport fetcher backed by the TTL page cache.
///
/// `fetch` serves unexpired cached bodies without touching the network;
/// `fetch_fresh` always goes out and overwrites the cached entry. Refresh
/// uses the fresh path for index pages only, so unexpired article pages
/// keep their cache entries.
pub struct CachedFetcher {
    inner: Arc<dyn Fetcher + Send + Sync>,
    cache: Arc<SqliteCache>,
}

impl CachedFetcher {
    pub fn new(inner: Arc<dyn Fetcher + Send + Sync>, cache: Arc<SqliteCache>) -> Self {
        Self { inner, cache }
    }

    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        if let Some(body) = self.cache.get(url)? {
            debug!(url, bytes = body.len(), "page cache hit");
            return Ok(body);
        }
        self.fetch_fresh(url).await
    }

    pub async fn fetch_fresh(&self, url: &str) -> Result<Vec<u8>> {
        let body = self.inner.fetch(url).await?;
        self.cache.put(url, &body)?;
        debug!(url, bytes = body.len(), "fetched and cached");
        Ok(body)
    }
}
