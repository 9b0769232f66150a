//! The crawl-links pipeline step
//!
//! For each link, in input order: classify it, build a crawler for its
//! category, crawl it, and record the outcome under the link's path. Crawl
//! failures are isolated to their link. A link that cannot be classified
//! aborts the whole step.

mod context;
mod metadata;

pub use context::{MemoryStepContext, StepContext};
pub use metadata::{CrawlMetadata, CrawlOutcome, PathCounts};

use crate::classify::classify_link;
use crate::config::{CrawlerConfig, RuleTable};
use crate::crawler::{Crawler, CrawlerFactory};
use crate::url::path_or_raw;
use crate::Result;
use indicatif::{ProgressBar, ProgressStyle};

/// Name under which the step publishes its metadata
pub const CRAWLED_LINKS_OUTPUT: &str = "crawled_links";

/// Knobs for one step invocation
#[derive(Debug, Clone, Copy, Default)]
pub struct StepOptions {
    pub classifier: RuleTable,
    pub show_progress: bool,
}

impl From<&CrawlerConfig> for StepOptions {
    fn from(config: &CrawlerConfig) -> Self {
        Self {
            classifier: config.classifier,
            show_progress: config.show_progress,
        }
    }
}

/// Crawls one link and converts any failure into a negative outcome
///
/// Never returns an error: the failure is logged and reported through
/// `CrawlOutcome::succeeded`.
pub async fn crawl_link(crawler: &dyn Crawler, link: &str) -> CrawlOutcome {
    let path = path_or_raw(link);

    match crawler.extract(link).await {
        Ok(()) => CrawlOutcome {
            succeeded: true,
            path,
        },
        Err(e) => {
            tracing::error!("An error occurred while crawling {}: {}", link, e);
            CrawlOutcome {
                succeeded: false,
                path,
            }
        }
    }
}

/// Runs the step over `links` and returns them unchanged
///
/// # Arguments
///
/// * `links` - Links to crawl, processed strictly in order
/// * `factory` - Builds a crawler for each link's category
/// * `context` - Receives the metadata under [`CRAWLED_LINKS_OUTPUT`]
/// * `options` - Classifier table and progress display
///
/// # Returns
///
/// * `Ok(links)` - Every link was processed; crawl failures are only
///   reflected in the metadata
/// * `Err(StepError::Classification)` - A link could not be classified.
///   Links after it are not processed and no metadata is published.
/// * `Err(StepError::Output)` - Publishing the metadata failed
pub async fn crawl_links<F, C>(
    links: Vec<String>,
    factory: &F,
    context: &mut C,
    options: StepOptions,
) -> Result<Vec<String>>
where
    F: CrawlerFactory + ?Sized,
    C: StepContext + ?Sized,
{
    tracing::info!("Starting to crawl {} link(s).", links.len());

    let progress = progress_bar(links.len(), options.show_progress);
    let mut metadata = CrawlMetadata::new();

    for link in &links {
        let category = match classify_link(link, options.classifier) {
            Ok(category) => category,
            Err(e) => {
                progress.abandon();
                return Err(e.into());
            }
        };

        progress.set_message(category.as_str());
        let crawler = factory.build(category);
        let outcome = crawl_link(crawler.as_ref(), link).await;
        metadata.record_outcome(&outcome);
        progress.inc(1);
    }

    progress.finish_and_clear();

    context.add_output_metadata(CRAWLED_LINKS_OUTPUT, &metadata)?;

    tracing::info!(
        "Successfully crawled {} / {} links.",
        metadata.successful_crawls(),
        links.len()
    );

    Ok(links)
}

fn progress_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        progress.set_style(style.progress_chars("#>-"));
    }
    progress
}
