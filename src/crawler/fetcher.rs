//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings and timeouts
//! - GET requests to fetch page content
//! - Error classification (status codes, non-HTML responses)
//!
//! There is no retry here: a failed fetch is a failed crawl for that link.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::{CrawlError, CrawlResult};
use reqwest::{header::CONTENT_TYPE, Client};
use std::time::Duration;
use url::Url;

/// A successfully fetched HTML page
#[derive(Debug)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: Url,
    /// HTTP status code
    pub status_code: u16,
    /// Content-Type header value
    pub content_type: String,
    /// Page body content
    pub body: String,
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use crawl_links::config::{CrawlerConfig, UserAgentConfig};
/// use crawl_links::crawler::build_http_client;
///
/// let user_agent = UserAgentConfig {
///     crawler_name: "CrawlLinks".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&user_agent, &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(crawler.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a link and returns its HTML
///
/// | Condition | Result |
/// |-----------|--------|
/// | Transport error or timeout | `CrawlError::Http` |
/// | Non-2xx status | `CrawlError::Status` |
/// | Content-Type without `text/html` | `CrawlError::ContentMismatch` |
/// | Body cannot be read | `CrawlError::Http` |
pub async fn fetch_page(client: &Client, link: &str) -> CrawlResult<FetchedPage> {
    let response = client
        .get(link)
        .send()
        .await
        .map_err(|source| CrawlError::Http {
            link: link.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(CrawlError::Status {
            link: link.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.to_ascii_lowercase().contains("text/html") {
        return Err(CrawlError::ContentMismatch {
            link: link.to_string(),
            content_type,
        });
    }

    let final_url = response.url().clone();
    let body = response.text().await.map_err(|source| CrawlError::Http {
        link: link.to_string(),
        source,
    })?;

    Ok(FetchedPage {
        final_url,
        status_code: status.as_u16(),
        content_type,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header_regex, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn user_agent() -> UserAgentConfig {
        UserAgentConfig {
            crawler_name: "TestCrawler".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        }
    }

    fn client() -> Client {
        build_http_client(&user_agent(), &CrawlerConfig::default()).unwrap()
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(&user_agent(), &CrawlerConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_html_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/about/"))
            .and(header_regex("user-agent", "^TestCrawler/1.0 "))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html><body>Hi</body></html>", "text/html; charset=utf-8"),
            )
            .mount(&server)
            .await;

        let link = format!("{}/about/", server.uri());
        let page = fetch_page(&client(), &link).await.unwrap();

        assert_eq!(page.status_code, 200);
        assert!(page.body.contains("Hi"));
        assert_eq!(page.final_url.path(), "/about/");
        assert!(page.content_type.starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let link = format!("{}/missing/", server.uri());
        let err = fetch_page(&client(), &link).await.unwrap_err();
        assert!(matches!(err, CrawlError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_non_html() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("{}", "application/json"),
            )
            .mount(&server)
            .await;

        let link = format!("{}/api/", server.uri());
        let err = fetch_page(&client(), &link).await.unwrap_err();
        assert!(matches!(err, CrawlError::ContentMismatch { ref content_type, .. } if content_type == "application/json"));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Nothing listens on port 1
        let err = fetch_page(&client(), "http://127.0.0.1:1/about/")
            .await
            .unwrap_err();
        assert!(matches!(err, CrawlError::Http { .. }));
    }
}
