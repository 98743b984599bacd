use url::Url;

/// A configured news source: the base URL of one plain-HTML index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub base: Url,
}

impl Source {
    pub fn new(base: Url) -> Self {
        let name = base.host_str().unwrap_or("unknown").to_string();
        Self { name, base }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_derived_from_host() {
        let source = Source::new(Url::parse("https://text.npr.org").unwrap());
        assert_eq!(source.name, "text.npr.org");
    }

    #[test]
    fn test_base_keeps_path() {
        let source = Source::new(Url::parse("https://lite.cnn.com/en").unwrap());
        assert_eq!(source.base.as_str(), "https://lite.cnn.com/en");
        assert_eq!(source.name, "lite.cnn.com");
    }
}
