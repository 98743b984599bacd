pub mod cached;
pub mod http_fetcher;

pub use cached::CachedFetcher;
pub use http_fetcher::HttpFetcher;

use async_trait::async_trait;

use crate::app::Result;

/// Transport abstraction: fetch one page's body bytes.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
