//! Fathom main entry point
//!
//! This is the command-line interface for the Fathom deep site crawler.

use clap::Parser;
use fathom::config::{load_config_with_hash, validate, Config, FetcherBackend};
use fathom::crawler::crawl;
use fathom::report::{generate_report, print_report_summary, save_report, CrawlOutcome};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Fathom: a deep site crawler and content mapper
///
/// Fathom crawls a website breadth-first from a seed URL, staying on the
/// seed's domain, extracts structured content from every page, and writes a
/// comprehensive JSON report.
#[derive(Parser, Debug)]
#[command(name = "fathom")]
#[command(version = "1.0.0")]
#[command(about = "A deep site crawler and content mapper", long_about = None)]
struct Cli {
    /// Seed URL to crawl (absolute http(s) URL)
    #[arg(value_name = "URL")]
    seed_url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Maximum link depth to follow from the seed
    #[arg(long)]
    max_depth: Option<u32>,

    /// Maximum in-scope links enqueued per page
    #[arg(long)]
    max_pages_per_level: Option<usize>,

    /// Hard cap on total pages fetched
    #[arg(long)]
    max_total_pages: Option<usize>,

    /// Directory to write the JSON report into
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Fetch pages through a WebDriver-driven browser instead of plain HTTP
    #[arg(long)]
    webdriver: bool,

    /// WebDriver server address (implies --webdriver)
    #[arg(long, value_name = "URL")]
    webdriver_url: Option<String>,

    /// Print the crawl outcome as a JSON envelope instead of a summary
    #[arg(long)]
    json: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load configuration file if given, otherwise start from defaults
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    apply_cli_overrides(&mut config, &cli);
    validate(&config)?;

    if cli.dry_run {
        handle_dry_run(&cli.seed_url, &config)?;
        return Ok(());
    }

    handle_crawl(&cli.seed_url, config, cli.json).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("fathom=info,warn"),
            1 => EnvFilter::new("fathom=debug,info"),
            2 => EnvFilter::new("fathom=trace,debug"),
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

/// Applies CLI flag overrides on top of the loaded configuration
fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(max_depth) = cli.max_depth {
        config.crawler.max_depth = max_depth;
    }
    if let Some(max_pages_per_level) = cli.max_pages_per_level {
        config.crawler.max_pages_per_level = max_pages_per_level;
    }
    if let Some(max_total_pages) = cli.max_total_pages {
        config.crawler.max_total_pages = max_total_pages;
    }
    if let Some(output_dir) = &cli.output_dir {
        config.output.reports_dir = output_dir.display().to_string();
    }
    if cli.webdriver || cli.webdriver_url.is_some() {
        config.fetcher.backend = FetcherBackend::Webdriver;
    }
    if let Some(webdriver_url) = &cli.webdriver_url {
        config.fetcher.webdriver_url = webdriver_url.clone();
    }
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(seed_url: &str, config: &Config) -> anyhow::Result<()> {
    let seed = fathom::crawler::parse_seed_url(seed_url)?;

    println!("=== Fathom Dry Run ===\n");

    println!("Seed URL: {}", seed);
    if let Some(host) = fathom::url::extract_host(&seed) {
        println!("Crawl scope: {}", host);
    }

    println!("\nCrawl Budget:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Max pages per level: {}", config.crawler.max_pages_per_level);
    println!("  Max total pages: {}", config.crawler.max_total_pages);
    println!("  Page timeout: {}s", config.crawler.page_timeout_secs);
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);
    match config.crawler.max_crawl_secs {
        Some(secs) => println!("  Crawl deadline: {}s", secs),
        None => println!("  Crawl deadline: none"),
    }

    println!("\nFetcher:");
    match config.fetcher.backend {
        FetcherBackend::Http => println!("  Backend: http"),
        FetcherBackend::Webdriver => {
            println!("  Backend: webdriver");
            println!("  WebDriver URL: {}", config.fetcher.webdriver_url);
        }
    }
    println!("  User agent: {}", config.fetcher.user_agent);

    println!("\nOutput:");
    println!("  Reports directory: {}", config.output.reports_dir);

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(seed_url: &str, config: Config, as_json: bool) -> anyhow::Result<()> {
    if config.fetcher.backend == FetcherBackend::Webdriver {
        tracing::info!(
            "Using WebDriver backend at {} (a WebDriver server such as chromedriver must be running)",
            config.fetcher.webdriver_url
        );
    }

    match crawl(seed_url, &config).await {
        Ok(result) => {
            let report = generate_report(&result, config.crawler.max_depth);

            if as_json {
                let outcome = CrawlOutcome::success(report);
                println!("{}", serde_json::to_string_pretty(&outcome)?);
                return Ok(());
            }

            print_report_summary(&report);

            let path = save_report(&report, Path::new(&config.output.reports_dir))?;
            println!("\n✓ Report saved to: {}", path.display());

            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);

            if as_json {
                let outcome = CrawlOutcome::failure(&e);
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            }

            Err(e.into())
        }
    }
}
