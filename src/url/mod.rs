//! URL handling module for Crawl-Links
//!
//! This module provides link parsing, path extraction, and the path pattern
//! matching used by the document classifier.

mod matcher;

pub use matcher::PathPattern;

use crate::{UrlError, UrlResult};
use url::Url;

/// Parses a link into a URL
///
/// # Arguments
///
/// * `link` - The link string to parse
///
/// # Returns
///
/// * `Ok(Url)` - The parsed URL
/// * `Err(UrlError)` - The link is empty or not an absolute URL
pub fn parse_link(link: &str) -> UrlResult<Url> {
    let trimmed = link.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Parse("link is empty".to_string()));
    }

    Url::parse(trimmed).map_err(|e| UrlError::Parse(e.to_string()))
}

/// Parses a link and requires an HTTP or HTTPS scheme
pub fn parse_http_link(link: &str) -> UrlResult<Url> {
    let url = parse_link(link)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            other
        ))),
    }
}

/// Extracts the path component of a link, as written
///
/// The path is the key used both for classification and for metadata
/// accumulation, so the query string and fragment are dropped: links that
/// differ only in those parts share a path. The path is sliced from the link
/// text rather than taken from the parsed URL, which would add a `/` to a
/// bare host and resolve dot segments.
///
/// # Examples
///
/// ```
/// use crawl_links::url::link_path;
///
/// assert_eq!(link_path("https://site.com/about/?ref=nav").unwrap(), "/about/");
/// assert_eq!(link_path("https://site.com").unwrap(), "");
/// assert_eq!(link_path("https://site.com/a/../about/").unwrap(), "/a/../about/");
/// ```
pub fn link_path(link: &str) -> UrlResult<String> {
    parse_link(link)?;
    Ok(raw_path(link.trim()).to_string())
}

/// Path between the authority (or the scheme, for links without one) and
/// the query or fragment
fn raw_path(link: &str) -> &str {
    let rest = link.split_once(':').map_or(link, |(_, rest)| rest);

    let rest = match rest.strip_prefix("//") {
        Some(authority) => authority
            .find(|c| matches!(c, '/' | '?' | '#'))
            .map_or("", |start| &authority[start..]),
        None => rest,
    };

    let end = rest.find(|c| matches!(c, '?' | '#')).unwrap_or(rest.len());
    &rest[..end]
}

/// Best-effort path extraction that never fails
///
/// Used when recording a crawl outcome: a link that made it past
/// classification always parses, but the outcome must carry a path even if
/// it somehow does not.
pub(crate) fn path_or_raw(link: &str) -> String {
    link_path(link).unwrap_or_else(|_| link.to_string())
}
