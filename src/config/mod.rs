//! Configuration module for Crawl-Links
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and owns the ordered classification rule tables.
//!
//! # Example
//!
//! ```no_run
//! use crawl_links::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Classifier table: {}", config.crawler.classifier.as_str());
//! ```

mod parser;
pub mod rules;
mod types;
mod validation;

// Re-export types
pub use rules::{Rule, RuleTable};
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
