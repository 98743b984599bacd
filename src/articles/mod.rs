//! Article store: owns the listed stubs and memoizes extraction.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::app::{GazetteError, Result};
use crate::domain::{ArticleState, ArticleStub, Document};
use crate::extract::{extract, Extraction};
use crate::fetcher::CachedFetcher;

/// Owns one [`ArticleStub`] per listed article.
///
/// `select` parses lazily on first selection and memoizes the document;
/// `reset` replaces the collection wholesale on refresh, so parsed content
/// never survives a refresh even for a URL that reappears.
pub struct ArticleStore {
    fetcher: Arc<CachedFetcher>,
    stubs: Vec<ArticleStub>,
}

impl ArticleStore {
    pub fn new(fetcher: Arc<CachedFetcher>) -> Self {
        Self {
            fetcher,
            stubs: Vec::new(),
        }
    }

    pub fn stubs(&self) -> &[ArticleStub] {
        &self.stubs
    }

    pub fn get(&self, index: usize) -> Option<&ArticleStub> {
        self.stubs.get(index)
    }

    pub fn len(&self) -> usize {
        self.stubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stubs.is_empty()
    }

    pub fn reset(&mut self, stubs: Vec<ArticleStub>) {
        self.stubs = stubs;
    }

    /// Return the document for the stub at `index`, fetching and extracting
    /// on first selection. Failures are recorded on the stub but never
    /// memoized, so a failed stub is retried on the next selection.
    pub async fn select(&mut self, index: usize) -> Result<Document> {
        let fetcher = self.fetcher.clone();
        let stub = self
            .stubs
            .get_mut(index)
            .ok_or(GazetteError::NoSuchArticle(index + 1))?;

        if let ArticleState::Parsed(document) = &stub.state {
            debug!(url = %stub.url, "returning memoized document");
            return Ok(document.clone());
        }

        match parse_stub(&fetcher, stub).await {
            Ok(Extraction {
                document,
                diagnostics,
            }) => {
                if !diagnostics.is_clean() {
                    debug!(
                        skipped = diagnostics.skipped_nodes,
                        empty = diagnostics.empty_paragraphs,
                        url = %stub.url,
                        "extraction diagnostics"
                    );
                }
                stub.state = ArticleState::Parsed(document.clone());
                Ok(document)
            }
            Err(err) => {
                warn!(error = %err, url = %stub.url, "article parse failed");
                stub.state = ArticleState::Failed(err.to_string());
                Err(err)
            }
        }
    }
}

async fn parse_stub(fetcher: &CachedFetcher, stub: &ArticleStub) -> Result<Extraction> {
    let body = fetcher.fetch(stub.url.as_str()).await?;
    let html = String::from_utf8_lossy(&body);
    Ok(extract(&html, &stub.url)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::Fetcher;
    use crate::store::SqliteCache;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use url::Url;

    const ARTICLE: &str = "<html><body>\
        <p>ignored</p>\
        <p>Home</p>\
        <p>My Title</p>\
        <p>Byx Jane Doe</p>\
        <p>NPR.org, 2024-03-02 · Intro text.</p>\
        <p>Body text.</p>\
        </body></html>";

    /// Counts fetches; fails the first `fail_first` calls with an HTTP-shaped
    /// error stand-in.
    struct ScriptedFetcher {
        calls: AtomicUsize,
        fail_first: usize,
        body: Vec<u8>,
    }

    impl ScriptedFetcher {
        fn new(body: &str, fail_first: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_first,
                body: body.as_bytes().to_vec(),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Fetcher for ScriptedFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.fail_first {
                return Err(GazetteError::Config(format!("scripted failure for {url}")));
            }
            Ok(self.body.clone())
        }
    }

    fn store_with(fetcher: Arc<ScriptedFetcher>) -> ArticleStore {
        let cache = Arc::new(SqliteCache::in_memory().unwrap());
        let cached = Arc::new(CachedFetcher::new(fetcher, cache));
        let mut store = ArticleStore::new(cached);
        store.reset(vec![ArticleStub::new(
            "My Title",
            Url::parse("https://text.npr.org/1234").unwrap(),
            "text.npr.org",
        )]);
        store
    }

    #[tokio::test]
    async fn test_select_memoizes_after_first_fetch() {
        let fetcher = Arc::new(ScriptedFetcher::new(ARTICLE, 0));
        let mut store = store_with(fetcher.clone());

        let first = store.select(0).await.unwrap();
        let second = store.select(0).await.unwrap();

        assert_eq!(fetcher.calls(), 1);
        assert_eq!(first, second);
        assert!(matches!(store.get(0).unwrap().state, ArticleState::Parsed(_)));
    }

    #[tokio::test]
    async fn test_failure_is_not_memoized() {
        let fetcher = Arc::new(ScriptedFetcher::new(ARTICLE, 1));
        let mut store = store_with(fetcher.clone());

        assert!(store.select(0).await.is_err());
        assert!(store.get(0).unwrap().is_failed());

        // Retried on the next selection.
        let document = store.select(0).await.unwrap();
        assert_eq!(fetcher.calls(), 2);
        assert_eq!(document.title.as_deref(), Some("My Title"));
    }

    #[tokio::test]
    async fn test_reset_discards_parsed_documents() {
        let fetcher = Arc::new(ScriptedFetcher::new(ARTICLE, 0));
        let mut store = store_with(fetcher.clone());

        store.select(0).await.unwrap();
        store.reset(vec![ArticleStub::new(
            "My Title",
            Url::parse("https://text.npr.org/1234").unwrap(),
            "text.npr.org",
        )]);

        assert!(matches!(
            store.get(0).unwrap().state,
            ArticleState::Unparsed
        ));
        // Same URL, fresh stub: extraction runs again (the transport cache
        // may still serve the bytes, but the document is rebuilt).
        store.select(0).await.unwrap();
        assert!(matches!(store.get(0).unwrap().state, ArticleState::Parsed(_)));
    }

    #[tokio::test]
    async fn test_select_out_of_range() {
        let fetcher = Arc::new(ScriptedFetcher::new(ARTICLE, 0));
        let mut store = store_with(fetcher);
        assert!(matches!(
            store.select(5).await,
            Err(GazetteError::NoSuchArticle(6))
        ));
    }
}
