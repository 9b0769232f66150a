//! End-to-end tests of the crawl-links step
//!
//! These tests use wiremock to create mock HTTP servers and run the step
//! with the default HTML crawler, a SQLite document store, and the JSON
//! metadata writer.

use crawl_links::config::{CrawlerConfig, RuleTable, UserAgentConfig};
use crawl_links::crawler::{build_http_client, HtmlCrawlerFactory, SharedStore};
use crawl_links::output::{read_metadata_record, JsonMetadataWriter};
use crawl_links::step::{crawl_links, PathCounts, StepOptions};
use crawl_links::storage::{DocumentStore, SqliteDocumentStore};
use crawl_links::{ClassificationError, DocumentCategory, StepError};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    _dir: TempDir,
    store: Arc<Mutex<SqliteDocumentStore>>,
    factory: HtmlCrawlerFactory,
    writer: JsonMetadataWriter,
}

impl Harness {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = Arc::new(Mutex::new(
            SqliteDocumentStore::new(&dir.path().join("documents.db"))
                .expect("Failed to open store"),
        ));

        let user_agent = UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        };
        let client = build_http_client(&user_agent, &CrawlerConfig::default())
            .expect("Failed to build client");

        let shared: SharedStore = store.clone();
        let factory = HtmlCrawlerFactory::new(client, shared);
        let writer = JsonMetadataWriter::new(dir.path().join("crawled_links.json"));

        Self {
            _dir: dir,
            store,
            factory,
            writer,
        }
    }

    fn document_count(&self) -> u64 {
        self.store.lock().unwrap().count_documents().unwrap()
    }
}

fn options(classifier: RuleTable) -> StepOptions {
    StepOptions {
        classifier,
        show_progress: false,
    }
}

fn html_page(title: &str, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_raw(
            format!(
                "<html><head><title>{}</title></head><body><main>{}</main></body></html>",
                title, body
            ),
            "text/html",
        )
}

async fn mount_page(server: &MockServer, route: &str, title: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(title, &format!("<p>{} content</p>", title)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_step_stores_documents_and_metadata() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", "Home").await;
    mount_page(&server, "/about/", "About").await;
    mount_page(&server, "/articles/led-walls/", "LED walls").await;

    let links = vec![
        format!("{}/", base),
        format!("{}/about/", base),
        format!("{}/articles/led-walls/", base),
    ];

    let mut harness = Harness::new();
    let output = crawl_links(
        links.clone(),
        &harness.factory,
        &mut harness.writer,
        options(RuleTable::Strict),
    )
    .await
    .expect("Step failed");

    assert_eq!(output, links);
    assert_eq!(harness.document_count(), 3);

    let store = harness.store.lock().unwrap();
    let about = store.get_document_by_link(&links[1]).unwrap().unwrap();
    assert_eq!(about.category, DocumentCategory::About);
    assert_eq!(about.title.as_deref(), Some("About"));
    assert_eq!(about.content, "About content");

    let article = store.get_document_by_link(&links[2]).unwrap().unwrap();
    assert_eq!(article.category, DocumentCategory::Articles);
    drop(store);

    let record = read_metadata_record(harness.writer.path()).unwrap();
    assert_eq!(record.output_name, "crawled_links");
    assert_eq!(record.metadata.len(), 3);
    assert_eq!(record.metadata.successful_crawls(), 3);
    assert_eq!(
        record.metadata.get("/about/"),
        Some(PathCounts {
            successful: 1,
            total: 1
        })
    );
}

#[tokio::test]
async fn test_failed_crawl_does_not_stop_the_step() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/about/", "About").await;
    Mock::given(method("GET"))
        .and(path("/services/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, "/contact/", "Contact").await;
    Mock::given(method("GET"))
        .and(path("/repositories/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("%PDF-1.4", "application/pdf"),
        )
        .mount(&server)
        .await;

    let links = vec![
        format!("{}/about/", base),
        format!("{}/services/", base),
        format!("{}/contact/", base),
        format!("{}/repositories/", base),
    ];

    let mut harness = Harness::new();
    let output = crawl_links(
        links.clone(),
        &harness.factory,
        &mut harness.writer,
        options(RuleTable::Strict),
    )
    .await
    .expect("Crawl failures must not abort the step");

    assert_eq!(output, links);
    assert_eq!(harness.document_count(), 2);

    let record = read_metadata_record(harness.writer.path()).unwrap();
    assert_eq!(record.metadata.total_crawls(), 4);
    assert_eq!(record.metadata.successful_crawls(), 2);
    assert_eq!(
        record.metadata.get("/services/"),
        Some(PathCounts {
            successful: 0,
            total: 1
        })
    );
    assert_eq!(
        record.metadata.get("/repositories/"),
        Some(PathCounts {
            successful: 0,
            total: 1
        })
    );
}

#[tokio::test]
async fn test_unclassifiable_link_aborts_step() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/about/", "About").await;
    mount_page(&server, "/contact/", "Contact").await;

    let links = vec![
        format!("{}/about/", base),
        format!("{}/unknown-page/", base),
        format!("{}/contact/", base),
    ];

    let mut harness = Harness::new();
    let err = crawl_links(
        links.clone(),
        &harness.factory,
        &mut harness.writer,
        options(RuleTable::Strict),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        StepError::Classification(ClassificationError::Unclassifiable { ref path, .. })
            if path == "/unknown-page/"
    ));

    // /about/ was crawled before the failure, /contact/ never was
    assert_eq!(harness.document_count(), 1);
    let store = harness.store.lock().unwrap();
    assert!(store.get_document_by_link(&links[0]).unwrap().is_some());
    assert!(store.get_document_by_link(&links[2]).unwrap().is_none());
    drop(store);

    // No metadata is published for an aborted step
    assert!(!harness.writer.path().exists());
}

#[tokio::test]
async fn test_literal_table_crawls_every_page_as_home() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/about/", "About").await;
    mount_page(&server, "/unknown-page/", "Unknown").await;

    let links = vec![format!("{}/about/", base), format!("{}/unknown-page/", base)];

    let mut harness = Harness::new();
    crawl_links(
        links.clone(),
        &harness.factory,
        &mut harness.writer,
        options(RuleTable::Literal),
    )
    .await
    .expect("Step failed");

    let store = harness.store.lock().unwrap();
    for link in &links {
        let document = store.get_document_by_link(link).unwrap().unwrap();
        assert_eq!(document.category, DocumentCategory::Home);
    }
    let counts = store.count_by_category().unwrap();
    assert_eq!(counts.get(&DocumentCategory::Home), Some(&2));
}

#[tokio::test]
async fn test_repeated_path_accumulates() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/articles/", "Articles").await;

    let links = vec![
        format!("{}/articles/?page=1", base),
        format!("{}/articles/?page=2", base),
    ];

    let mut harness = Harness::new();
    crawl_links(
        links,
        &harness.factory,
        &mut harness.writer,
        options(RuleTable::Strict),
    )
    .await
    .expect("Step failed");

    let record = read_metadata_record(harness.writer.path()).unwrap();
    assert_eq!(record.metadata.len(), 1);
    assert_eq!(
        record.metadata.get("/articles/"),
        Some(PathCounts {
            successful: 2,
            total: 2
        })
    );
    // Distinct links, distinct documents
    assert_eq!(harness.document_count(), 2);
}
