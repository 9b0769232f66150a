//! Crawler module for fetching and extracting documents
//!
//! This module defines the crawler collaborator the step delegates to, plus
//! the default HTML implementation:
//! - HTTP fetching with content-type checks
//! - HTML parsing scoped to a document category
//! - Persisting the extracted document

mod fetcher;
mod html;
mod parser;

pub use fetcher::{build_http_client, fetch_page, FetchedPage};
pub use html::{HtmlCrawler, HtmlCrawlerFactory, SharedStore};
pub use parser::{parse_html, ExtractionProfile, ParsedPage};

use crate::classify::DocumentCategory;
use crate::CrawlResult;
use async_trait::async_trait;

/// Fetches a link and extracts its document
///
/// Extraction persists the document as a side effect. Any failure is
/// reported as a [`crate::CrawlError`]; callers do not distinguish between
/// kinds of failure.
#[async_trait]
pub trait Crawler: Send + Sync {
    async fn extract(&self, link: &str) -> CrawlResult<()>;
}

/// Builds a crawler configured for one document category
pub trait CrawlerFactory {
    fn build(&self, category: DocumentCategory) -> Box<dyn Crawler>;
}
