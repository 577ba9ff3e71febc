//! api-mirror main entry point
//!
//! This is the command-line interface for the api-mirror crawler.

use anyhow::Context;
use api_mirror::config::{load_config_with_hash, Config};
use api_mirror::crawler::run_crawl;
use api_mirror::output::print_statistics;
use api_mirror::Endpoint;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// api-mirror: mirror a parameterised JSON API to disk
///
/// Endpoints without placeholders are fetched first; values extracted from
/// their responses fill the placeholders of the others until no new URL can
/// be formed. Every response is saved under a path mirroring its URL.
#[derive(Parser, Debug)]
#[command(name = "api-mirror")]
#[command(version)]
#[command(about = "Mirror a parameterised JSON API to disk", long_about = None)]
struct Cli {
    /// Path to TOML or JSON configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the parsed endpoints without crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Print crawl statistics when the crawl finishes
    #[arg(long)]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let report = run_crawl(&config).await.context("Crawl failed")?;

    if cli.stats {
        print_statistics(&report.stats, &report.params);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("api_mirror=info,warn"),
            1 => EnvFilter::new("api_mirror=debug,info"),
            2 => EnvFilter::new("api_mirror=trace,debug"),
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

/// Handles the --dry-run mode: lists endpoints and what they need and provide
fn handle_dry_run(config: &Config) {
    println!("=== api-mirror Dry Run ===\n");

    println!("Base: {}", config.base);
    println!(
        "Output: {} (extension {})",
        config.output.directory, config.output.extension
    );
    println!(
        "Crawler: timeout {}s, max rounds {}",
        config.crawler.timeout_secs, config.crawler.max_rounds
    );

    println!("\nEndpoints ({}):", config.urls.len());
    for entry in &config.urls {
        let endpoint = Endpoint::from_config(&config.base, entry);
        println!("  - {}", endpoint);

        let deps = endpoint.dependencies();
        if !deps.is_empty() {
            println!("    needs: {}", deps.join(", "));
        }

        let provides: Vec<_> = endpoint.provides().collect();
        if !provides.is_empty() {
            println!("    provides: {}", provides.join(", "));
        }
    }

    let roots = config
        .urls
        .iter()
        .filter(|entry| Endpoint::from_config(&config.base, entry).dependencies().is_empty())
        .count();
    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling from {} parameter-free endpoints", roots);
}
