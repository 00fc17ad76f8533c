use crate::config::types::{Config, CrawlerConfig, FetcherBackend, FetcherConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawl budget and pacing settings
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    if config.max_pages_per_level < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages_per_level must be >= 1, got {}",
            config.max_pages_per_level
        )));
    }

    if config.max_total_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_total_pages must be >= 1, got {}",
            config.max_total_pages
        )));
    }

    if config.page_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "page_timeout_secs must be >= 1, got {}",
            config.page_timeout_secs
        )));
    }

    if let Some(max_crawl_secs) = config.max_crawl_secs {
        if max_crawl_secs < 1 {
            return Err(ConfigError::Validation(format!(
                "max_crawl_secs must be >= 1 when set, got {}",
                max_crawl_secs
            )));
        }
    }

    Ok(())
}

/// Validates fetcher transport settings
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    // The WebDriver address only matters when that backend is selected
    if config.backend == FetcherBackend::Webdriver {
        let url = Url::parse(&config.webdriver_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid webdriver_url: {}", e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "webdriver_url must be an HTTP(S) address, got scheme '{}'",
                url.scheme()
            )));
        }
    }

    Ok(())
}

/// Validates output settings
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.reports_dir.is_empty() {
        return Err(ConfigError::Validation(
            "reports_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}
