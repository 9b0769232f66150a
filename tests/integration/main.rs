//! Integration tests for the crawl-links step

mod crawl_tests;
