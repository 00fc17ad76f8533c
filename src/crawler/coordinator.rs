//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the breadth-first crawl loop that coordinates all
//! aspects of the crawling process:
//! - Seeding and draining the frontier
//! - Marking URLs visited at dequeue time
//! - Invoking the fetcher and extractor per page
//! - Enqueuing discovered in-scope links one level deeper
//! - Enforcing the depth, per-level, total-page, and wall-clock budgets
//!
//! Per-page fetch failures (dead links, timeouts) are expected and skip only
//! that page; the crawl always runs to completion once it has started.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::frontier::Frontier;
use crate::crawler::result::{CrawlResult, PageSet};
use crate::crawler::state::CrawlState;
use crate::extract::{extract_page, PageRecord};
use crate::url::{extract_host, page_key};
use crate::CrawlError;
use chrono::Utc;
use std::time::{Duration, Instant};
use url::Url;

/// Main crawler coordinator structure
///
/// Owns all mutable crawl state for the duration of one crawl; consumed by
/// [`Coordinator::run`].
pub struct Coordinator<F: PageFetcher> {
    limits: CrawlerConfig,
    fetcher: F,
    frontier: Frontier,
    state: CrawlState,
    start_url: Url,
    base_domain: String,
}

/// Parses and validates a seed URL
///
/// Rejected seeds surface immediately to the caller, before any crawl state
/// or transport exists.
pub fn parse_seed_url(seed_url: &str) -> Result<Url, CrawlError> {
    let url = Url::parse(seed_url).map_err(|e| CrawlError::InvalidSeed {
        url: seed_url.to_string(),
        message: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(CrawlError::InvalidSeed {
            url: seed_url.to_string(),
            message: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    if extract_host(&url).is_none() {
        return Err(CrawlError::InvalidSeed {
            url: seed_url.to_string(),
            message: "URL has no host".to_string(),
        });
    }

    Ok(url)
}

impl<F: PageFetcher> Coordinator<F> {
    /// Creates a coordinator for one crawl
    ///
    /// # Arguments
    ///
    /// * `seed_url` - Absolute http(s) URL the crawl starts from; its host
    ///   becomes the crawl scope
    /// * `limits` - Depth, fan-out, page, and pacing budgets
    /// * `fetcher` - An initialized page fetcher
    pub fn new(seed_url: &str, limits: CrawlerConfig, fetcher: F) -> Result<Self, CrawlError> {
        let start_url = parse_seed_url(seed_url)?;
        let base_domain = extract_host(&start_url).unwrap_or_default();

        let frontier = Frontier::new(start_url.clone(), base_domain.clone());

        Ok(Self {
            limits,
            fetcher,
            frontier,
            state: CrawlState::new(),
            start_url,
            base_domain,
        })
    }

    /// Runs the crawl to completion and returns the accumulated result
    ///
    /// The loop ends when the frontier is exhausted, the page budget is
    /// reached, or the optional wall-clock deadline passes. Individual fetch
    /// failures are logged and skipped.
    pub async fn run(mut self) -> CrawlResult {
        tracing::info!(
            "Starting crawl of {} (max depth {}, max {} pages)",
            self.start_url,
            self.limits.max_depth,
            self.limits.max_total_pages
        );

        let started_at = Utc::now();
        let crawl_start = Instant::now();
        let deadline = self.limits.max_crawl_secs.map(Duration::from_secs);
        let delay = Duration::from_millis(self.limits.request_delay_ms);

        let mut pages = PageSet::new();
        let mut first_fetch = true;

        loop {
            if self.state.pages_crawled() >= self.limits.max_total_pages {
                tracing::info!(
                    "Page budget of {} reached, stopping with {} entries still queued",
                    self.limits.max_total_pages,
                    self.frontier.len()
                );
                break;
            }

            if let Some(deadline) = deadline {
                if crawl_start.elapsed() >= deadline {
                    tracing::warn!("Crawl deadline of {:?} reached, stopping", deadline);
                    break;
                }
            }

            let Some(entry) = self.frontier.dequeue() else {
                tracing::info!("Frontier is empty, crawl complete");
                break;
            };

            // Defensive: the frontier's own checks make these unreachable in
            // the sequential crawl, but duplicate enqueues of not-yet-visited
            // URLs do occur and are discarded here
            if entry.depth > self.limits.max_depth || self.state.is_visited(&entry.url) {
                continue;
            }

            self.state.mark_visited(&entry.url);

            if !first_fetch && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            first_fetch = false;

            let html = match self.fetcher.fetch(&entry.url).await {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!("Skipping page: {}", e);
                    continue;
                }
            };

            let (record, extract_stats) = extract_page(&entry.url, &html);
            self.state.record_page();

            tracing::info!(
                "Crawled ({}/{}) depth {}: {} ({} links, {} images)",
                self.state.pages_crawled(),
                self.limits.max_total_pages,
                entry.depth,
                entry.url,
                record.links.len(),
                record.images.len()
            );

            if extract_stats.total() > 0 {
                tracing::debug!(
                    "Extraction skipped {} malformed element(s) on {}",
                    extract_stats.total(),
                    entry.url
                );
            }

            if entry.depth < self.limits.max_depth {
                self.expand_links(&record, entry.depth);
            }

            pages.insert(page_key(entry.url.as_str()), record);
        }

        self.fetcher.close().await;

        let finished_at = Utc::now();
        let total_pages_crawled = self.state.pages_crawled();

        tracing::info!(
            "Crawl completed: {} pages in {:.2}s",
            total_pages_crawled,
            crawl_start.elapsed().as_secs_f64()
        );

        CrawlResult {
            start_url: self.start_url.to_string(),
            base_domain: self.base_domain,
            pages,
            started_at,
            finished_at,
            total_pages_crawled,
        }
    }

    /// Enqueues a page's internal links one level deeper
    ///
    /// At most `max_pages_per_level` links are admitted per page, bounding
    /// the branching factor independent of how many links the page carries.
    fn expand_links(&mut self, record: &PageRecord, depth: u32) {
        let mut enqueued = 0;

        for link in record.links.iter().filter(|l| !l.is_external) {
            if enqueued >= self.limits.max_pages_per_level {
                tracing::debug!(
                    "Per-level cap of {} reached for {}, dropping remaining links",
                    self.limits.max_pages_per_level,
                    record.url
                );
                break;
            }

            let Ok(url) = Url::parse(&link.url) else {
                continue;
            };

            match self.frontier.enqueue(url, depth + 1, self.state.visited()) {
                Ok(()) => enqueued += 1,
                Err(rejection) => {
                    tracing::trace!("Link {} not enqueued: {:?}", link.url, rejection);
                }
            }
        }
    }
}
