//! Page fetcher implementations
//!
//! The coordinator is agnostic to how markup is obtained: it only requires
//! that a fetcher return the final rendered document for a URL. Two backends
//! are provided:
//! - [`HttpFetcher`]: a plain HTTP GET via reqwest
//! - [`WebDriverFetcher`]: page source from a WebDriver-driven browser, for
//!   sites that assemble their content client-side
//!
//! Fetch failures are per-page and recoverable; only failure to construct a
//! fetcher at all is fatal to a crawl.

use crate::CrawlError;
use fantoccini::ClientBuilder;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use url::Url;

/// Connect timeout for the plain-HTTP backend
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// A recoverable, per-page fetch failure
///
/// The coordinator logs these and skips the page; they never abort a crawl.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Http { url: String, status: u16 },

    #[error("expected HTML for {url}, got '{content_type}'")]
    NotHtml { url: String, content_type: String },

    #[error("network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("WebDriver error for {url}: {message}")]
    WebDriver { url: String, message: String },
}

/// Capability interface for obtaining a page's rendered markup
///
/// `fetch` returns the document for one URL or a recoverable error. `close`
/// releases any transport resources once the crawl is done.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    async fn fetch(&mut self, url: &Url) -> Result<String, FetchError>;

    async fn close(&mut self) {}
}

/// Plain HTTP fetcher backed by reqwest
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds the fetcher with its HTTP client
    ///
    /// Failure here (TLS backend, invalid user agent header) is fatal to the
    /// crawl: no pages can be fetched without a client.
    pub fn new(user_agent: &str, page_timeout: Duration) -> Result<Self, CrawlError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(page_timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|e| CrawlError::FetcherInit(e.to_string()))?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&mut self, url: &Url) -> Result<String, FetchError> {
        let response = self.client.get(url.as_str()).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else if e.is_connect() {
                FetchError::Network {
                    url: url.to_string(),
                    message: "connection failed".to_string(),
                }
            } else {
                FetchError::Network {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.contains("text/html") {
            return Err(FetchError::NotHtml {
                url: url.to_string(),
                content_type,
            });
        }

        response.text().await.map_err(|e| FetchError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// WebDriver-backed fetcher returning the browser's rendered page source
pub struct WebDriverFetcher {
    client: fantoccini::Client,
    page_timeout: Duration,
}

impl WebDriverFetcher {
    /// Connects a new WebDriver session
    ///
    /// Failure to establish the session (no driver running, handshake error)
    /// is fatal to the crawl, mirroring a browser that cannot start.
    pub async fn connect(webdriver_url: &str, page_timeout: Duration) -> Result<Self, CrawlError> {
        let client = ClientBuilder::native()
            .connect(webdriver_url)
            .await
            .map_err(|e| {
                CrawlError::FetcherInit(format!(
                    "could not reach WebDriver at {}: {}",
                    webdriver_url, e
                ))
            })?;

        tracing::debug!("Connected to WebDriver at {}", webdriver_url);

        Ok(Self {
            client,
            page_timeout,
        })
    }
}

impl PageFetcher for WebDriverFetcher {
    async fn fetch(&mut self, url: &Url) -> Result<String, FetchError> {
        // Navigation and source retrieval share one per-page budget so a
        // hanging render cannot stall the crawl
        let source = timeout(self.page_timeout, async {
            self.client
                .goto(url.as_str())
                .await
                .map_err(|e| FetchError::WebDriver {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;

            self.client.source().await.map_err(|e| FetchError::WebDriver {
                url: url.to_string(),
                message: e.to_string(),
            })
        })
        .await
        .map_err(|_| FetchError::Timeout {
            url: url.to_string(),
        })??;

        Ok(source)
    }

    async fn close(&mut self) {
        // Client handles are cloneable; closing one ends the session
        if let Err(e) = self.client.clone().close().await {
            tracing::warn!("Failed to close WebDriver session: {}", e);
        }
    }
}
