//! Crawl-Links: the link crawling step of a content-ingestion pipeline
//!
//! Given a list of links, this crate classifies each link into a document
//! category by its URL path, hands it to a crawler configured for that
//! category, and tallies per-path success counts as run metadata.

pub mod classify;
pub mod config;
pub mod crawler;
pub mod output;
pub mod step;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Errors that abort a step invocation
#[derive(Debug, Error)]
pub enum StepError {
    #[error("Classification error: {0}")]
    Classification(#[from] ClassificationError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// A link that cannot be mapped to a document category
#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("Unable to determine document type for link: {link} (path '{path}')")]
    Unclassifiable { link: String, path: String },

    #[error("Invalid link {link}: {reason}")]
    InvalidLink { link: String, reason: String },
}

/// Failure while fetching or extracting a single link
///
/// The step treats every variant the same way: the link is counted as a
/// failed attempt and processing continues with the next link.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("HTTP error for {link}: {source}")]
    Http {
        link: String,
        source: reqwest::Error,
    },

    #[error("HTTP status {status} for {link}")]
    Status { link: String, status: u16 },

    #[error("Expected HTML for {link}, got '{content_type}'")]
    ContentMismatch { link: String, content_type: String },

    #[error("No extractable content at {link}")]
    EmptyDocument { link: String },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Crawl failed for {link}: {message}")]
    Other { link: String, message: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Result type alias for step invocations
pub type Result<T> = std::result::Result<T, StepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

/// Result type alias for a single crawl attempt
pub type CrawlResult<T> = std::result::Result<T, CrawlError>;

// Re-export commonly used types
pub use classify::{classify_link, DocumentCategory};
pub use config::Config;
pub use step::{crawl_links, CrawlMetadata, CrawlOutcome, StepContext};
