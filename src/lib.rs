//! Fathom: a deep site crawler and content mapper
//!
//! This crate crawls a single website breadth-first from a seed URL, extracts
//! structured content (text, links, images, tables, forms, headings, metadata)
//! from every rendered page, and synthesizes a deterministic JSON report over
//! the collected records.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod report;
pub mod url;

use thiserror::Error;

/// Main error type for Fathom operations
///
/// Per-page transport failures are deliberately NOT represented here: they are
/// recoverable, carried by [`crawler::FetchError`], and never abort a crawl.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed URL '{url}': {message}")]
    InvalidSeed { url: String, message: String },

    #[error("Failed to initialize fetcher: {0}")]
    FetcherInit(String),

    #[error("Report serialization error: {0}")]
    Report(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Fathom operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlResult, FetchError, PageFetcher};
pub use extract::PageRecord;
pub use report::{generate_report, CrawlOutcome, CrawlReport};
pub use url::{extract_host, page_key};
