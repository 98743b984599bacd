use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{GazetteError, Result};
use crate::config::Config;
use crate::domain::Source;
use crate::fetcher::{CachedFetcher, Fetcher, HttpFetcher};
use crate::listing::ListingFetcher;
use crate::store::SqliteCache;

pub struct AppContext {
    pub config: Config,
    pub sources: Vec<Source>,
    pub cache: Arc<SqliteCache>,
    pub fetcher: Arc<CachedFetcher>,
    pub listing: ListingFetcher,
}

impl AppContext {
    pub fn new(config: Config, cache_path: Option<PathBuf>) -> Result<Self> {
        let cache_path = match cache_path {
            Some(p) => p,
            None => Self::default_cache_path()?,
        };
        let cache = Arc::new(SqliteCache::new(&cache_path)?);
        Self::wire(config, cache)
    }

    pub fn in_memory(config: Config) -> Result<Self> {
        let cache = Arc::new(SqliteCache::in_memory()?);
        Self::wire(config, cache)
    }

    fn wire(config: Config, cache: Arc<SqliteCache>) -> Result<Self> {
        let sources = config
            .sources()
            .map_err(|e| GazetteError::Config(e.to_string()))?;

        let http: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new());
        let fetcher = Arc::new(CachedFetcher::new(http, cache.clone()));
        let listing = ListingFetcher::new(fetcher.clone());

        Ok(Self {
            config,
            sources,
            cache,
            fetcher,
            listing,
        })
    }

    fn default_cache_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| GazetteError::Config("Could not find data directory".into()))?;
        let gazette_dir = data_dir.join("gazette");
        std::fs::create_dir_all(&gazette_dir)?;
        Ok(gazette_dir.join("pages.db"))
    }
}
