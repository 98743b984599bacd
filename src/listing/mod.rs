//! Index-page listing: turns a source's front page into ordered article stubs.

use std::sync::Arc;

use scraper::{Html, Selector};
use thiserror::Error;
use tracing::{info, warn};

use crate::app::Result;
use crate::domain::{ArticleStub, Source};
use crate::fetcher::CachedFetcher;

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("index page has no list container")]
    NoListContainer,
}

/// One refresh round across every configured source.
///
/// A failing source contributes zero stubs and bumps `failed_sources`; the
/// others still load.
#[derive(Debug, Default)]
pub struct ListingRound {
    pub stubs: Vec<ArticleStub>,
    pub failed_sources: usize,
}

/// Fetches index pages and extracts article stubs from them.
pub struct ListingFetcher {
    fetcher: Arc<CachedFetcher>,
}

impl ListingFetcher {
    pub fn new(fetcher: Arc<CachedFetcher>) -> Self {
        Self { fetcher }
    }

    /// List one source. `fresh` bypasses the transport cache; refresh uses it
    /// so index pages are always re-fetched while article pages keep their
    /// cached entries.
    pub async fn list(&self, source: &Source, fresh: bool) -> Result<Vec<ArticleStub>> {
        let body = if fresh {
            self.fetcher.fetch_fresh(source.base.as_str()).await?
        } else {
            self.fetcher.fetch(source.base.as_str()).await?
        };
        let html = String::from_utf8_lossy(&body);
        Ok(parse_listing(&html, source)?)
    }

    /// List every source, degrading per-source on failure.
    pub async fn list_all(&self, sources: &[Source], fresh: bool) -> ListingRound {
        let results =
            futures::future::join_all(sources.iter().map(|s| self.list(s, fresh))).await;

        let mut round = ListingRound::default();
        for (source, result) in sources.iter().zip(results) {
            match result {
                Ok(stubs) => round.stubs.extend(stubs),
                Err(e) => {
                    warn!(error = %e, source = %source.name, "listing failed");
                    round.failed_sources += 1;
                }
            }
        }
        round
    }
}

/// Extract `(label, absolute URL)` stubs from an index page.
///
/// The page's single list container is its first `ul`; each `li` holds the
/// article label and a relative link resolved against the source base.
pub fn parse_listing(html: &str, source: &Source) -> std::result::Result<Vec<ArticleStub>, ListingError> {
    let dom = Html::parse_document(html);
    let list_selector = Selector::parse("body ul").unwrap();
    let item_selector = Selector::parse("li").unwrap();
    let anchor_selector = Selector::parse("a[href]").unwrap();

    let list = dom
        .select(&list_selector)
        .next()
        .ok_or(ListingError::NoListContainer)?;

    let mut stubs = Vec::new();
    for item in list.select(&item_selector) {
        let label = item.text().collect::<String>().trim().to_string();
        let Some(anchor) = item.select(&anchor_selector).next() else {
            warn!(source = %source.name, label, "list item without a link, skipping");
            continue;
        };
        let href = anchor.value().attr("href").unwrap_or_default();
        match source.base.join(href) {
            Ok(url) => stubs.push(ArticleStub::new(label, url, source.name.as_str())),
            Err(e) => warn!(error = %e, href, "unresolvable article link, skipping"),
        }
    }

    info!(count = stubs.len(), source = %source.name, "indexed articles");
    Ok(stubs)
}
