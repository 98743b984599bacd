use thiserror::Error;

use crate::extract::ExtractError;
use crate::listing::ListingError;

#[derive(Error, Debug)]
pub enum GazetteError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] rusqlite::Error),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Listing error: {0}")]
    Listing(#[from] ListingError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No article at row {0}")]
    NoSuchArticle(usize),
}

pub type Result<T> = std::result::Result<T, GazetteError>;
