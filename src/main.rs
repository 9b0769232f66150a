//! Crawl-Links main entry point
//!
//! This is the command-line interface for the crawl-links pipeline step.

use anyhow::{Context, Result};
use clap::Parser;
use crawl_links::classify::classify_link;
use crawl_links::config::{load_config_with_hash, Config, RuleTable};
use crawl_links::crawler::{build_http_client, HtmlCrawlerFactory, SharedStore};
use crawl_links::output::{print_statistics, read_metadata_record, JsonMetadataWriter};
use crawl_links::step::{crawl_links, StepOptions};
use crawl_links::storage::{open_store, DocumentStore};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

/// Crawl-Links: classify, crawl, and tally a list of links
///
/// Each link is classified into a document category by its URL path,
/// crawled with a crawler scoped to that category, and counted per path.
/// The per-path counts are written as JSON run metadata.
#[derive(Parser, Debug)]
#[command(name = "crawl-links")]
#[command(version)]
#[command(about = "Classify, crawl, and tally a list of links", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Links to crawl, appended after the links listed in the config
    #[arg(value_name = "LINK")]
    links: Vec<String>,

    /// File with one link per line ('#' comments and blank lines ignored)
    #[arg(long, value_name = "PATH")]
    links_file: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print the category of every link without crawling
    #[arg(long, conflicts_with = "show_metadata")]
    classify_only: bool,

    /// Print statistics from the last metadata file and exit
    #[arg(long, conflicts_with = "classify_only")]
    show_metadata: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.show_metadata {
        return handle_show_metadata(&config);
    }

    let links = collect_links(&config, &cli.links, cli.links_file.as_deref())?;

    if cli.classify_only {
        handle_classify_only(&config, &links)
    } else {
        handle_crawl(&config, config_hash, links, cli.quiet).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("crawl_links=info,warn"),
            1 => EnvFilter::new("crawl_links=debug,info"),
            2 => EnvFilter::new("crawl_links=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Gathers links from the config, the command line, and a links file, in that order
fn collect_links(config: &Config, cli_links: &[String], links_file: Option<&Path>) -> Result<Vec<String>> {
    let mut links = config.links.clone();
    links.extend(cli_links.iter().cloned());

    if let Some(path) = links_file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read links file {}", path.display()))?;
        links.extend(parse_links_file(&content));
    }

    Ok(links)
}

fn parse_links_file(content: &str) -> impl Iterator<Item = String> + '_ {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
}

/// Handles --classify-only: prints `category<TAB>link` per link
fn handle_classify_only(config: &Config, links: &[String]) -> Result<()> {
    let table = config.crawler.classifier;
    tracing::info!("Classifying {} link(s) with the {} table", links.len(), table.as_str());
    for line in rule_listing(table) {
        tracing::debug!("{}", line);
    }

    for link in links {
        let category = classify_link(link, table)?;
        println!("{}\t{}", category, link);
    }

    Ok(())
}

/// One line per rule, in evaluation order
fn rule_listing(table: RuleTable) -> Vec<String> {
    table
        .rules()
        .iter()
        .enumerate()
        .map(|(i, rule)| {
            format!("  {:>2}. path {} -> {}", i + 1, rule.pattern.describe(), rule.category)
        })
        .collect()
}

/// Handles --show-metadata: prints the last written metadata record
fn handle_show_metadata(config: &Config) -> Result<()> {
    let path = Path::new(&config.output.metadata_path);
    let record = read_metadata_record(path)
        .with_context(|| format!("Failed to read metadata file {}", path.display()))?;

    println!("Metadata: {}", path.display());
    println!("Output: {}", record.output_name);
    println!("Recorded at: {}\n", record.recorded_at);
    print_statistics(&record.metadata);

    Ok(())
}

/// Handles the main step run
async fn handle_crawl(config: &Config, config_hash: String, links: Vec<String>, quiet: bool) -> Result<()> {
    let store = open_store(Path::new(&config.output.database_path))
        .with_context(|| format!("Failed to open database {}", config.output.database_path))?;
    let store: SharedStore = Arc::new(Mutex::new(store));

    let client = build_http_client(&config.user_agent, &config.crawler)?;
    let factory = HtmlCrawlerFactory::new(client, Arc::clone(&store));
    let mut context =
        JsonMetadataWriter::new(&config.output.metadata_path).with_config_hash(config_hash);

    let mut options = StepOptions::from(&config.crawler);
    options.show_progress &= !quiet;

    tracing::info!("Classifier table: {}", options.classifier.as_str());

    match crawl_links(links, &factory, &mut context, options).await {
        Ok(crawled) => tracing::debug!("Step output: {} link(s)", crawled.len()),
        Err(e) => {
            tracing::error!("Crawl aborted: {}", e);
            return Err(e.into());
        }
    }

    if !quiet {
        let record = read_metadata_record(context.path())?;
        print_statistics(&record.metadata);

        let counts = store
            .lock()
            .map_err(|_| anyhow::anyhow!("document store lock poisoned"))?
            .count_by_category()?;
        if !counts.is_empty() {
            println!("\nStored documents by category:");
            for (category, count) in counts {
                println!("  {}: {}", category, count);
            }
        }
    }

    Ok(())
}
