//! Configuration module for Fathom
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every setting has a default, so a config file is optional; CLI flags override
//! file values.
//!
//! # Example
//!
//! ```no_run
//! use fathom::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("fathom.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, FetcherBackend, FetcherConfig, OutputConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};

// Re-export validation entry point
pub use validation::validate;
