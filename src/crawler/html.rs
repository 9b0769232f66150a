//! Default crawler: fetch HTML, extract a document, store it

use crate::classify::DocumentCategory;
use crate::crawler::fetcher::fetch_page;
use crate::crawler::parser::{parse_html, ExtractionProfile};
use crate::crawler::{Crawler, CrawlerFactory};
use crate::storage::{DocumentStore, ExtractedDocument, StorageError};
use crate::{CrawlError, CrawlResult};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use std::sync::{Arc, Mutex};

/// Document store shared by every crawler a factory builds
pub type SharedStore = Arc<Mutex<dyn DocumentStore + Send>>;

/// Crawler that extracts one category's document shape from HTML pages
pub struct HtmlCrawler {
    client: Client,
    store: SharedStore,
    category: DocumentCategory,
    profile: ExtractionProfile,
}

impl HtmlCrawler {
    pub fn new(client: Client, store: SharedStore, category: DocumentCategory) -> Self {
        Self {
            client,
            store,
            category,
            profile: category.extraction_profile(),
        }
    }

    pub fn category(&self) -> DocumentCategory {
        self.category
    }
}

#[async_trait]
impl Crawler for HtmlCrawler {
    async fn extract(&self, link: &str) -> CrawlResult<()> {
        let page = fetch_page(&self.client, link).await?;

        let parsed = parse_html(&page.body, &page.final_url, self.profile);
        if parsed.is_empty() {
            return Err(CrawlError::EmptyDocument {
                link: link.to_string(),
            });
        }

        let document = ExtractedDocument {
            link: link.to_string(),
            path: page.final_url.path().to_string(),
            category: self.category,
            title: parsed.title,
            description: parsed.description,
            headings: parsed.headings,
            content: parsed.content,
            links: parsed.links,
            fetched_at: Utc::now().to_rfc3339(),
        };

        let mut store = self.store.lock().map_err(|_| StorageError::Poisoned)?;
        store.save_document(&document)?;

        tracing::debug!(
            "Stored {} document for {} ({} chars, {} links)",
            self.category(),
            link,
            document.content.len(),
            document.links.len()
        );

        Ok(())
    }
}

/// Builds [`HtmlCrawler`]s sharing one HTTP client and one document store
#[derive(Clone)]
pub struct HtmlCrawlerFactory {
    client: Client,
    store: SharedStore,
}

impl HtmlCrawlerFactory {
    pub fn new(client: Client, store: SharedStore) -> Self {
        Self { client, store }
    }
}

impl CrawlerFactory for HtmlCrawlerFactory {
    fn build(&self, category: DocumentCategory) -> Box<dyn Crawler> {
        Box::new(HtmlCrawler::new(
            self.client.clone(),
            Arc::clone(&self.store),
            category,
        ))
    }
}
