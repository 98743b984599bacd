//! # Gazette
//!
//! A terminal reader for plain-HTML news indexes (text.npr.org and
//! compatible "lite" sites).
//!
//! ## Architecture
//!
//! Gazette follows a modular pipeline architecture:
//!
//! ```text
//! Listing → Article Store → Extractor → TUI
//! ```
//!
//! - [`listing`]: index-page fetching and stub extraction
//! - [`extract`]: positional HTML-to-document extraction
//! - [`articles`]: lazy, memoizing article store
//! - [`tui`]: terminal user interface built with ratatui
//!
//! Pages are fetched through a transport-level TTL cache ([`store`]); an
//! entry expires one hour after insertion and expired entries are purged at
//! startup and on refresh.
//!
//! ## Quick Start
//!
//! ```bash
//! # Browse interactively
//! gazette
//!
//! # List articles
//! gazette list
//!
//! # Print article 3 to stdout
//! gazette read 3
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together all components:
/// transport cache, fetcher, listing.
pub mod app;

/// Article store: owns the listed stubs, parses lazily, memoizes documents.
pub mod articles;

/// Command-line interface using clap.
///
/// - `list` - List articles from the configured sources
/// - `read <n>` - Print one article to stdout
/// - `purge` - Drop expired cache entries
/// - no subcommand - Launch the TUI
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/gazette/config.toml`, supporting:
/// - Sites, article pane width and alignment
/// - Custom keybindings
pub mod config;

/// Core domain models.
///
/// - [`Source`](domain::Source): a configured news index
/// - [`ArticleStub`](domain::ArticleStub): a listed article with its parse state
/// - [`Document`](domain::Document): extracted title, metadata, styled blocks
///   and link table
pub mod domain;

/// Positional HTML-to-document extraction.
///
/// [`extract`](extract::extract) turns an article page's paragraph sequence
/// into a [`Document`](domain::Document) using the source's fixed positional
/// layout.
pub mod extract;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): async transport trait
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
/// - [`CachedFetcher`](fetcher::CachedFetcher): TTL-cache-backed wrapper
pub mod fetcher;

/// Index-page listing: one source's front page into ordered article stubs.
pub mod listing;

/// Transport-level TTL page cache.
///
/// - [`PageCache`](store::PageCache): cache lifecycle trait
/// - [`SqliteCache`](store::SqliteCache): SQLite implementation
pub mod store;

/// Terminal user interface.
///
/// List view and article view; keybindings: j/k navigate, digits jump to
/// rows, Enter reads, b goes back, r refreshes, o opens in browser, q quits.
pub mod tui;
