//! HTML parser for extracting documents
//!
//! This module handles parsing HTML content to extract:
//! - Page title and meta description
//! - Headings (h1-h3)
//! - Visible body text from the category's content root
//! - Outgoing links (from <a> tags and canonical links)

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Elements whose text is never part of the document body
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Where a crawler looks for the main content of a page
///
/// Selectors are tried in order; the first one matching any element is used
/// as the content root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionProfile {
    content_selectors: &'static [&'static str],
}

impl ExtractionProfile {
    pub const fn new(content_selectors: &'static [&'static str]) -> Self {
        Self { content_selectors }
    }

    pub fn content_selectors(&self) -> &'static [&'static str] {
        self.content_selectors
    }
}

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// `<meta name="description">` content
    pub description: Option<String>,

    /// Text of h1-h3 headings, in document order
    pub headings: Vec<String>,

    /// Whitespace-normalized visible text of the content root
    pub content: String,

    /// All links found on the page (absolute URLs, deduplicated)
    pub links: Vec<String>,
}

impl ParsedPage {
    /// True when the page yielded neither a title nor any body text
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_empty()
    }
}

/// Parses HTML content into a document using the given profile
///
/// # Example
///
/// ```
/// use crawl_links::crawler::parse_html;
/// use crawl_links::DocumentCategory;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head>
///     <body><nav>Menu</nav><article><h1>Post</h1><p>Body</p></article></body></html>"#;
/// let base_url = Url::parse("https://example.com/articles/post/").unwrap();
/// let parsed = parse_html(html, &base_url, DocumentCategory::Articles.extraction_profile());
///
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.content, "Post Body");
/// ```
pub fn parse_html(html: &str, base_url: &Url, profile: ExtractionProfile) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        description: extract_description(&document),
        headings: extract_headings(&document),
        content: extract_content(&document, profile),
        links: extract_links(&document, base_url),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| normalize_whitespace(&element.text().collect::<String>()))
        .filter(|s| !s.is_empty())
}

fn extract_description(document: &Html) -> Option<String> {
    let selector = Selector::parse("meta[name='description'][content]").ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(normalize_whitespace)
        .filter(|s| !s.is_empty())
}

fn extract_headings(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("h1, h2, h3") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .map(visible_text)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Extracts the visible text of the first content root the profile finds
fn extract_content(document: &Html, profile: ExtractionProfile) -> String {
    for raw in profile.content_selectors() {
        let selector = match Selector::parse(raw) {
            Ok(selector) => selector,
            Err(_) => {
                tracing::warn!("Skipping invalid content selector '{}'", raw);
                continue;
            }
        };

        if let Some(root) = document.select(&selector).next() {
            return visible_text(root);
        }
    }

    String::new()
}

/// Collects text below `element`, skipping script-like elements
fn visible_text(element: ElementRef<'_>) -> String {
    let mut parts = Vec::new();

    for node in element.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|e| HIDDEN_ELEMENTS.iter().any(|hidden| *hidden == e.name()))
        });

        if !hidden {
            parts.push(&**text);
        }
    }

    normalize_whitespace(&parts.join(" "))
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts all valid links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links: Vec<String> = Vec::new();

    let mut push = |href: &str| {
        if let Some(absolute_url) = resolve_link(href, base_url) {
            if !links.contains(&absolute_url) {
                links.push(absolute_url);
            }
        }
    };

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if element.value().attr("download").is_some() {
                continue;
            }
            if let Some(href) = element.value().attr("href") {
                push(href);
            }
        }
    }

    if let Ok(canonical_selector) = Selector::parse("link[rel='canonical'][href]") {
        for element in document.select(&canonical_selector) {
            if let Some(href) = element.value().attr("href") {
                push(href);
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel:, data: schemes
/// - fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    match absolute_url.scheme() {
        "http" | "https" => Some(absolute_url.to_string()),
        _ => None,
    }
}
