//! Crawler module for parameter discovery and fetching
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the [`Fetch`] trait
//! - The fixpoint scheduler that forms, deduplicates and issues requests
//! - Overall crawl setup from a configuration

mod fetcher;
mod scheduler;

pub use fetcher::{build_http_client, Fetch, HttpFetcher};
pub use scheduler::{CrawlReport, Scheduler, DEFAULT_MAX_ROUNDS};

use crate::config::Config;
use crate::output::ResultSaver;
use crate::ApiMirrorError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Build one endpoint per configured URL
/// 3. Fetch, save and extract until no new request can be formed
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl reached a fixpoint or the round cap
/// * `Err(ApiMirrorError)` - The HTTP client could not be built
///
/// # Example
///
/// ```no_run
/// use api_mirror::config::load_config;
/// use api_mirror::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("api.toml"))?;
/// let report = run_crawl(&config).await?;
/// println!("{} responses saved", report.stats.fetched);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlReport, ApiMirrorError> {
    let fetcher = HttpFetcher::from_config(&config.crawler)?;
    let saver = ResultSaver::from_config(&config.output, &config.base);

    tracing::info!(
        "Crawling {} endpoints under '{}', saving to {}",
        config.urls.len(),
        config.base,
        saver.root().display()
    );

    let mut scheduler = Scheduler::from_config(config, fetcher, saver);
    scheduler.download().await;
    Ok(scheduler.into_report())
}
