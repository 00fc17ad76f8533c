//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The breadth-first frontier and its admission policy
//! - Visited-state tracking and crawl budgets
//! - Pluggable page fetchers (plain HTTP and WebDriver-rendered)
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod result;
mod state;

pub use coordinator::{parse_seed_url, Coordinator};
pub use fetcher::{FetchError, HttpFetcher, PageFetcher, WebDriverFetcher};
pub use frontier::{EnqueueRejection, Frontier, FrontierEntry};
pub use result::{CrawlResult, PageSet};
pub use state::CrawlState;

use crate::config::{Config, FetcherBackend};
use crate::CrawlError;
use std::time::Duration;

/// Runs a complete crawl from a seed URL
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the seed URL (rejected before any transport starts)
/// 2. Initialize the configured fetcher backend (failure here is fatal)
/// 3. Drive the breadth-first crawl to completion
///
/// A started crawl always yields a [`CrawlResult`], even if some pages failed
/// to fetch along the way.
pub async fn crawl(seed_url: &str, config: &Config) -> Result<CrawlResult, CrawlError> {
    // Reject bad seeds before spinning up any transport
    parse_seed_url(seed_url)?;

    let page_timeout = Duration::from_secs(config.crawler.page_timeout_secs);

    match config.fetcher.backend {
        FetcherBackend::Http => {
            let fetcher = HttpFetcher::new(&config.fetcher.user_agent, page_timeout)?;
            let coordinator = Coordinator::new(seed_url, config.crawler.clone(), fetcher)?;
            Ok(coordinator.run().await)
        }
        FetcherBackend::Webdriver => {
            let fetcher =
                WebDriverFetcher::connect(&config.fetcher.webdriver_url, page_timeout).await?;
            let coordinator = Coordinator::new(seed_url, config.crawler.clone(), fetcher)?;
            Ok(coordinator.run().await)
        }
    }
}
