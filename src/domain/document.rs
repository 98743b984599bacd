/// Visual style of a single run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Bold,
    Italic,
    Underline,
}

/// A contiguous span of text sharing one style.
///
/// A run carrying a `link` index is always styled [`Style::Underline`] and is
/// immediately followed, within the same text block, by a bold `[N]` marker
/// run pointing at the same [`LinkTable`] entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub style: Style,
    pub link: Option<usize>,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, Style::Plain)
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::styled(text, Style::Bold)
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self::styled(text, Style::Italic)
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
            link: None,
        }
    }

    /// An underlined run tied to a link table entry.
    pub fn linked(text: impl Into<String>, index: usize) -> Self {
        Self {
            text: text.into(),
            style: Style::Underline,
            link: Some(index),
        }
    }
}

/// A renderable unit of an article: a horizontal rule or a styled paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Divider { glyph: char },
    Text { runs: Vec<Run> },
}

impl Block {
    pub fn divider(glyph: char) -> Self {
        Block::Divider { glyph }
    }

    pub fn text(runs: Vec<Run>) -> Self {
        Block::Text { runs }
    }
}

/// Per-document table of link targets, keyed by 1-based insertion order.
///
/// Indices are contiguous, start at 1, and are never reused or reset within
/// a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkTable {
    urls: Vec<String>,
}

impl LinkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a link target and return its 1-based index.
    pub fn push(&mut self, url: impl Into<String>) -> usize {
        self.urls.push(url.into());
        self.urls.len()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.urls.get(i))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Iterate `(index, url)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.urls.iter().enumerate().map(|(i, u)| (i + 1, u.as_str()))
    }
}

/// The normalized result of extracting one article page.
///
/// Built once per article stub and immutable thereafter; a refresh discards
/// the owning stub rather than mutating its document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub blocks: Vec<Block>,
    pub links: LinkTable,
}

impl Document {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(Untitled)")
    }
}
