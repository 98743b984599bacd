use url::Url;

use crate::domain::Document;

/// Parse lifecycle of a listed article.
///
/// A stub moves `Unparsed -> Parsed` at most once between refreshes; a
/// failed extraction is recorded but never memoized, so `Failed` stubs are
/// retried on the next selection.
#[derive(Debug, Clone, Default)]
pub enum ArticleState {
    #[default]
    Unparsed,
    Parsed(Document),
    Failed(String),
}

/// A listed-but-not-yet-fetched article reference.
///
/// Created by the listing fetcher; its state is advanced only by the
/// article store, and the whole collection is replaced wholesale on refresh.
#[derive(Debug, Clone)]
pub struct ArticleStub {
    pub label: String,
    pub url: Url,
    pub source_name: String,
    pub state: ArticleState,
}

impl ArticleStub {
    pub fn new(label: impl Into<String>, url: Url, source_name: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url,
            source_name: source_name.into(),
            state: ArticleState::Unparsed,
        }
    }

    pub fn document(&self) -> Option<&Document> {
        match &self.state {
            ArticleState::Parsed(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, ArticleState::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub() -> ArticleStub {
        ArticleStub::new(
            "Headline",
            Url::parse("https://text.npr.org/1234").unwrap(),
            "text.npr.org",
        )
    }

    #[test]
    fn test_new_stub_is_unparsed() {
        let stub = stub();
        assert!(matches!(stub.state, ArticleState::Unparsed));
        assert!(stub.document().is_none());
        assert!(!stub.is_failed());
    }

    #[test]
    fn test_parsed_stub_exposes_document() {
        let mut stub = stub();
        stub.state = ArticleState::Parsed(Document::default());
        assert!(stub.document().is_some());
    }

    #[test]
    fn test_failed_stub() {
        let mut stub = stub();
        stub.state = ArticleState::Failed("timeout".into());
        assert!(stub.is_failed());
        assert!(stub.document().is_none());
    }
}
