//! Crawl statistics display
//!
//! This module provides functionality for summarising and printing the
//! per-path metadata a step run produced.

use crate::step::CrawlMetadata;

/// Percentage of successful attempts, 0.0 when nothing was attempted
pub fn success_rate(metadata: &CrawlMetadata) -> f64 {
    let total = metadata.total_crawls();
    if total == 0 {
        return 0.0;
    }
    (metadata.successful_crawls() as f64 / total as f64) * 100.0
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(metadata: &CrawlMetadata) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Distinct paths: {}", metadata.len());
    println!("  Attempts: {}", metadata.total_crawls());
    println!();

    if !metadata.is_empty() {
        println!("Paths:");
        // Failures first, then by path
        let mut rows: Vec<_> = metadata.iter().collect();
        rows.sort_by(|a, b| b.1.failed().cmp(&a.1.failed()).then_with(|| a.0.cmp(b.0)));

        let width = rows.iter().map(|(path, _)| path.len()).max().unwrap_or(0);
        for (path, counts) in rows {
            println!(
                "  {:<width$}  {} / {}",
                path,
                counts.successful,
                counts.total,
                width = width
            );
        }
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} links successfully crawled)",
        success_rate(metadata),
        metadata.successful_crawls(),
        metadata.total_crawls()
    );
}
