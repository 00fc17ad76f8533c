use serde::Deserialize;

/// Main configuration structure for Fathom
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl budget and pacing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrawlerConfig {
    /// Maximum link depth to follow from the seed URL (0 = seed page only)
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Maximum number of in-scope links enqueued per page
    #[serde(rename = "max-pages-per-level", default = "default_max_pages_per_level")]
    pub max_pages_per_level: usize,

    /// Hard cap on the total number of pages fetched in one crawl
    #[serde(rename = "max-total-pages", default = "default_max_total_pages")]
    pub max_total_pages: usize,

    /// Per-page fetch timeout in seconds
    #[serde(rename = "page-timeout-secs", default = "default_page_timeout_secs")]
    pub page_timeout_secs: u64,

    /// Fixed delay between consecutive page requests (milliseconds)
    #[serde(rename = "request-delay-ms", default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Optional wall-clock limit for the whole crawl, checked once per dequeue
    #[serde(rename = "max-crawl-secs", default)]
    pub max_crawl_secs: Option<u64>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_pages_per_level: default_max_pages_per_level(),
            max_total_pages: default_max_total_pages(),
            page_timeout_secs: default_page_timeout_secs(),
            request_delay_ms: default_request_delay_ms(),
            max_crawl_secs: None,
        }
    }
}

/// Which transport renders and returns page markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetcherBackend {
    /// Plain HTTP GET via reqwest
    Http,
    /// Rendered page source via a WebDriver session
    Webdriver,
}

/// Fetcher transport configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetcherConfig {
    /// Transport backend to use
    #[serde(default = "default_backend")]
    pub backend: FetcherBackend,

    /// WebDriver server address (only used by the webdriver backend)
    #[serde(rename = "webdriver-url", default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            webdriver_url: default_webdriver_url(),
            user_agent: default_user_agent(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory where JSON report files are written
    #[serde(rename = "reports-dir", default = "default_reports_dir")]
    pub reports_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            reports_dir: default_reports_dir(),
        }
    }
}

fn default_max_depth() -> u32 {
    3
}

fn default_max_pages_per_level() -> usize {
    10
}

fn default_max_total_pages() -> usize {
    50
}

fn default_page_timeout_secs() -> u64 {
    10
}

fn default_request_delay_ms() -> u64 {
    1000
}

fn default_backend() -> FetcherBackend {
    FetcherBackend::Http
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
        .to_string()
}

fn default_reports_dir() -> String {
    "./reports".to_string()
}
