//! Positional HTML-to-document extractor for text-only news pages.
//!
//! Sources like text.npr.org publish articles as a flat `<p>` sequence with a
//! fixed positional layout (masthead, home link, title, byline, dateline,
//! body) instead of semantic markup. The extractor is a per-source adapter
//! honoring that contract; porting to another source means writing a new
//! adapter, not changing the [`Document`] model.

use chrono::NaiveDate;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, trace};
use url::Url;

use crate::domain::{Block, Document, Run};

/// Byline paragraphs start with a fixed-width source label ("By ").
const AUTHOR_PREFIX_CHARS: usize = 3;
/// Dateline paragraphs lead with the site name. Adapter-specific constant,
/// tied to this source's exact label text.
const DATELINE_PREFIX: &str = "NPR.org, ";
/// Separates the dateline from the lead sentence.
const DATELINE_SEPARATOR: &str = " · ";
/// Second-paragraph text that marks a navigation-index page; anything else
/// marks a program page, which carries no dateline.
const HOME_MARKER: &str = "Home";

/// The positional prefix: paragraphs 0..=4 are structural, the rest is body.
const STRUCTURAL_PARAGRAPHS: usize = 5;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("article body could not be located")]
    NoBody,

    #[error("article has {0} paragraphs, expected at least {STRUCTURAL_PARAGRAPHS}")]
    TruncatedBody(usize),
}

/// Non-fatal extraction counters. Never abort extraction; callers log them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Child nodes with no style mapping that were skipped.
    pub skipped_nodes: usize,
    /// Body paragraphs that yielded no renderable content.
    pub empty_paragraphs: usize,
}

impl Diagnostics {
    pub fn is_clean(&self) -> bool {
        self.skipped_nodes == 0 && self.empty_paragraphs == 0
    }
}

/// A successfully extracted document plus its diagnostics.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub document: Document,
    pub diagnostics: Diagnostics,
}

/// Closed dispatch over the child node shapes the body walk understands,
/// derived once from the raw tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    Text,
    Bold,
    Italic,
    Link,
    Rule,
    Unrecognized,
}

impl NodeKind {
    fn of(node: &Node) -> Self {
        match node {
            Node::Text(_) => NodeKind::Text,
            Node::Element(el) => match el.name() {
                "b" | "strong" | "h3" => NodeKind::Bold,
                "i" | "em" => NodeKind::Italic,
                "a" => NodeKind::Link,
                "hr" => NodeKind::Rule,
                _ => NodeKind::Unrecognized,
            },
            _ => NodeKind::Unrecognized,
        }
    }
}

/// Extract a [`Document`] from a fetched article page.
///
/// Pure and deterministic: `base` is the article's own URL, used only to
/// resolve relative link targets. Fails only when the structural paragraph
/// prefix cannot be read; unrecognized markup degrades to [`Diagnostics`].
pub fn extract(html: &str, base: &Url) -> Result<Extraction, ExtractError> {
    let dom = Html::parse_document(html);
    let body_selector = Selector::parse("body").unwrap();
    let paragraph_selector = Selector::parse("p").unwrap();

    let body = dom
        .select(&body_selector)
        .next()
        .ok_or(ExtractError::NoBody)?;
    let paragraphs: Vec<ElementRef> = body.select(&paragraph_selector).collect();
    if paragraphs.len() < STRUCTURAL_PARAGRAPHS {
        return Err(ExtractError::TruncatedBody(paragraphs.len()));
    }

    let mut document = Document::default();
    let mut diagnostics = Diagnostics::default();
    let mut program_page = false;

    for (i, paragraph) in paragraphs.iter().enumerate() {
        match i {
            // Masthead; discarded, but keeps the article visually separated.
            0 => document.blocks.push(Block::divider('-')),
            // Mode marker, consumed for control flow only.
            1 => program_page = paragraph_text(paragraph) != HOME_MARKER,
            2 => {
                let title = paragraph_text(paragraph);
                document
                    .blocks
                    .push(Block::text(vec![Run::bold(title.clone())]));
                document.blocks.push(Block::divider('-'));
                document.title = Some(title);
            }
            3 => {
                let text = paragraph_text(paragraph);
                let author: String = text.chars().skip(AUTHOR_PREFIX_CHARS).collect();
                let author = author.trim().to_string();
                document
                    .blocks
                    .push(Block::text(vec![Run::bold(format!("By {author}"))]));
                document.author = Some(author);
            }
            4 => dateline_paragraph(paragraph, &mut document, program_page),
            _ => body_paragraph(paragraph, &mut document, &mut diagnostics, base),
        }
    }

    Ok(Extraction {
        document,
        diagnostics,
    })
}

/// `P[4]`: `"NPR.org, <date> · <lead sentence>"` on navigation-index pages,
/// an arbitrary byline on program pages (which get no date block).
fn dateline_paragraph(paragraph: &ElementRef, document: &mut Document, program_page: bool) {
    let text = paragraph_text(paragraph);
    let (left, right) = text
        .split_once(DATELINE_SEPARATOR)
        .unwrap_or((text.as_str(), ""));

    if !program_page {
        let date = normalize_date(left.strip_prefix(DATELINE_PREFIX).unwrap_or(left));
        document
            .blocks
            .push(Block::text(vec![Run::bold(date.clone())]));
        document.date = Some(date);
    }

    document.blocks.push(Block::divider('—'));
    document.blocks.push(Block::text(vec![Run::plain(right)]));
}

/// `P[5..]`: generic body paragraph. Walks children in document order,
/// accumulating styled runs; emits nothing for paragraphs with no renderable
/// content.
fn body_paragraph(
    paragraph: &ElementRef,
    document: &mut Document,
    diagnostics: &mut Diagnostics,
    base: &Url,
) {
    // Markup artifact: text but no structural content.
    if paragraph.children().next().is_none() && !paragraph_text(paragraph).is_empty() {
        return;
    }

    let mut line: Vec<Run> = Vec::new();
    for child in paragraph.children() {
        let kind = NodeKind::of(child.value());
        match kind {
            NodeKind::Text => {
                if let Some(text) = child.value().as_text() {
                    if !text.trim().is_empty() {
                        line.push(Run::plain(&**text));
                    }
                }
            }
            // A rule cuts across the paragraph regardless of the line buffer.
            NodeKind::Rule => document.blocks.push(Block::divider('—')),
            NodeKind::Unrecognized => {
                diagnostics.skipped_nodes += 1;
                trace!(node = ?child.value(), "skipping unrecognized child node");
            }
            NodeKind::Bold | NodeKind::Italic | NodeKind::Link => {
                let Some(el) = ElementRef::wrap(child) else {
                    continue;
                };
                let text: String = el.text().collect();
                if text.trim().is_empty() {
                    continue;
                }
                match kind {
                    NodeKind::Bold => line.push(Run::bold(text)),
                    NodeKind::Italic => line.push(Run::italic(text)),
                    NodeKind::Link => {
                        let target = link_target(&el, base);
                        let index = document.links.push(target);
                        line.push(Run::linked(text, index));
                        line.push(Run::bold(format!("[{index}]")));
                    }
                    _ => unreachable!("only styled element kinds reach here"),
                }
            }
        }
    }

    if line.is_empty() {
        diagnostics.empty_paragraphs += 1;
        debug!("body paragraph yielded no renderable content");
    } else {
        document.blocks.push(Block::divider('-'));
        document.blocks.push(Block::text(line));
    }
}

/// Resolve an anchor's target to an absolute URL. Already-absolute hrefs are
/// kept verbatim; relative ones are joined against the article URL; anything
/// unresolvable is recorded as-is rather than dropped, so link numbering
/// stays contiguous.
fn link_target(anchor: &ElementRef, base: &Url) -> String {
    match anchor.value().attr("href") {
        Some(href) if Url::parse(href).is_ok() => href.to_string(),
        Some(href) => base
            .join(href)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| href.to_string()),
        None => String::new(),
    }
}

fn paragraph_text(paragraph: &ElementRef) -> String {
    paragraph.text().collect()
}

/// The source writes long-form dates ("March 2, 2024"); normalize those to
/// ISO-8601 and pass anything else through verbatim.
fn normalize_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw.trim(), "%B %d, %Y")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Style;

    fn base() -> Url {
        Url::parse("https://text.npr.org/1234").unwrap()
    }

    fn page(paragraphs: &[&str]) -> String {
        let body: String = paragraphs.iter().map(|p| format!("<p>{p}</p>")).collect();
        format!("<html><body>{body}</body></html>")
    }

    fn extract_page(paragraphs: &[&str]) -> Extraction {
        extract(&page(paragraphs), &base()).unwrap()
    }

    const PREFIX: [&str; 5] = [
        "ignored",
        "Home",
        "My Title",
        "Byx Jane Doe",
        "NPR.org, 2024-03-02 · Intro text.",
    ];

    #[test]
    fn test_scenario_full_document() {
        let mut paragraphs = PREFIX.to_vec();
        paragraphs.push(r#"Body <b>bold</b> and <a href="http://x">link</a>."#);
        let Extraction {
            document,
            diagnostics,
        } = extract_page(&paragraphs);

        assert_eq!(document.title.as_deref(), Some("My Title"));
        assert_eq!(document.author.as_deref(), Some("Jane Doe"));
        assert_eq!(document.date.as_deref(), Some("2024-03-02"));
        assert_eq!(document.links.get(1), Some("http://x"));
        assert_eq!(document.links.len(), 1);
        assert!(diagnostics.is_clean());

        assert_eq!(
            document.blocks,
            vec![
                Block::divider('-'),
                Block::text(vec![Run::bold("My Title")]),
                Block::divider('-'),
                Block::text(vec![Run::bold("By Jane Doe")]),
                Block::text(vec![Run::bold("2024-03-02")]),
                Block::divider('—'),
                Block::text(vec![Run::plain("Intro text.")]),
                Block::divider('-'),
                Block::text(vec![
                    Run::plain("Body "),
                    Run::bold("bold"),
                    Run::plain(" and "),
                    Run::linked("link", 1),
                    Run::bold("[1]"),
                    Run::plain("."),
                ]),
            ]
        );
    }

    #[test]
    fn test_link_numbering_is_contiguous_and_ordered() {
        let mut paragraphs = PREFIX.to_vec();
        paragraphs.push(r#"<a href="http://a.example/">A</a> then <a href="/b">B</a>"#);
        let doc = extract_page(&paragraphs).document;

        assert_eq!(doc.links.get(1), Some("http://a.example/"));
        assert_eq!(doc.links.get(2), Some("https://text.npr.org/b"));

        let Block::Text { runs } = doc.blocks.last().unwrap() else {
            panic!("expected a text block");
        };
        let linked: Vec<_> = runs.iter().filter_map(|r| r.link).collect();
        assert_eq!(linked, vec![1, 2]);
    }

    #[test]
    fn test_program_variant_suppresses_date() {
        let paragraphs = [
            "ignored",
            "Morning Edition",
            "My Title",
            "Byx Jane Doe",
            "Heard on Morning Edition · Lead sentence.",
        ];
        let doc = extract_page(&paragraphs).document;

        assert_eq!(doc.date, None);
        assert!(doc
            .blocks
            .contains(&Block::text(vec![Run::plain("Lead sentence.")])));
        // No bold date block between the byline and the em-dash divider.
        assert_eq!(
            doc.blocks[3..5],
            [
                Block::text(vec![Run::bold("By Jane Doe")]),
                Block::divider('—'),
            ]
        );
    }

    #[test]
    fn test_navigation_variant_extracts_date() {
        let paragraphs = [
            "ignored",
            "Home",
            "My Title",
            "Byx Jane Doe",
            "NPR.org, 2024-01-01 · Lead sentence.",
        ];
        let doc = extract_page(&paragraphs).document;

        assert_eq!(doc.date.as_deref(), Some("2024-01-01"));
        assert_eq!(
            doc.blocks.last(),
            Some(&Block::text(vec![Run::plain("Lead sentence.")]))
        );
    }

    #[test]
    fn test_long_form_date_normalized_to_iso() {
        let paragraphs = [
            "ignored",
            "Home",
            "My Title",
            "Byx Jane Doe",
            "NPR.org, March 2, 2024 · Lead.",
        ];
        let doc = extract_page(&paragraphs).document;
        assert_eq!(doc.date.as_deref(), Some("2024-03-02"));
    }

    #[test]
    fn test_missing_separator_keeps_empty_lead() {
        let paragraphs = ["ignored", "Home", "My Title", "Byx Jane Doe", "NPR.org, 2024-01-01"];
        let doc = extract_page(&paragraphs).document;
        assert_eq!(doc.date.as_deref(), Some("2024-01-01"));
        assert_eq!(doc.blocks.last(), Some(&Block::text(vec![Run::plain("")])));
    }

    #[test]
    fn test_empty_body_paragraph_is_diagnostic_not_error() {
        let mut paragraphs = PREFIX.to_vec();
        paragraphs.push("");
        let Extraction {
            document,
            diagnostics,
        } = extract_page(&paragraphs);

        assert_eq!(diagnostics.empty_paragraphs, 1);
        // Nothing emitted beyond the structural prefix.
        assert_eq!(document.blocks.len(), 7);
    }

    #[test]
    fn test_unknown_tag_is_skipped_with_diagnostic() {
        let mut paragraphs = PREFIX.to_vec();
        paragraphs.push("<span>skip me</span>plain text");
        let Extraction {
            document,
            diagnostics,
        } = extract_page(&paragraphs);

        assert_eq!(diagnostics.skipped_nodes, 1);
        assert_eq!(
            document.blocks.last(),
            Some(&Block::text(vec![Run::plain("plain text")]))
        );
    }

    #[test]
    fn test_italic_and_strong_styles() {
        let mut paragraphs = PREFIX.to_vec();
        paragraphs.push("<strong>loud</strong> <em>soft</em>");
        let doc = extract_page(&paragraphs).document;

        let Some(Block::Text { runs }) = doc.blocks.last() else {
            panic!("expected a text block");
        };
        assert_eq!(runs[0], Run::bold("loud"));
        assert_eq!(runs[1].style, Style::Italic);
        assert_eq!(runs[1].text, "soft");
    }

    #[test]
    fn test_anchor_without_visible_text_allocates_nothing() {
        let mut paragraphs = PREFIX.to_vec();
        paragraphs.push(r#"before <a href="http://x"></a> after"#);
        let doc = extract_page(&paragraphs).document;
        assert!(doc.links.is_empty());
    }

    #[test]
    fn test_too_few_paragraphs_fails() {
        let html = page(&["ignored", "Home", "My Title"]);
        let err = extract(&html, &base()).unwrap_err();
        assert!(matches!(err, ExtractError::TruncatedBody(3)));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let mut paragraphs = PREFIX.to_vec();
        paragraphs.push(r#"Body <a href="http://x">link</a>"#);
        let html = page(&paragraphs);
        let first = extract(&html, &base()).unwrap();
        let second = extract(&html, &base()).unwrap();
        assert_eq!(first.document, second.document);
        assert_eq!(first.diagnostics, second.diagnostics);
    }
}
