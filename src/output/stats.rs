//! Crawl statistics collected by the scheduler
//!
//! This module provides the counters updated during a crawl and the
//! functions used to display them.

use crate::state::ParamStore;

/// Counters describing one crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Full passes over the endpoint list
    pub rounds: u32,

    /// Requests that returned a body
    pub fetched: u64,

    /// Bindings skipped because they were already issued
    pub duplicates_skipped: u64,

    /// Requests that failed at the transport or HTTP level
    pub fetch_failures: u64,

    /// Responses that could not be written to disk
    pub persist_failures: u64,

    /// Responses whose parameters could not be extracted
    pub extraction_failures: u64,

    /// Bindings that could not be rendered into a URL
    pub render_failures: u64,

    /// Parameter values added to the store
    pub new_values: u64,

    /// The crawl stopped at the round cap instead of reaching a fixpoint
    pub hit_round_cap: bool,
}

impl CrawlStats {
    /// Creates a new empty statistics record
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of requests issued, successful or not
    pub fn issued(&self) -> u64 {
        self.fetched + self.fetch_failures
    }

    /// Returns the total number of per-request failures of any kind
    pub fn total_failures(&self) -> u64 {
        self.fetch_failures + self.persist_failures + self.extraction_failures + self.render_failures
    }

    /// Returns the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        let issued = self.issued();
        if issued == 0 {
            return 0.0;
        }
        (self.fetched as f64 / issued as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
/// * `params` - The parameter store the crawl finished with
pub fn print_statistics(stats: &CrawlStats, params: &ParamStore) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Rounds: {}", stats.rounds);
    println!("  Requests issued: {}", stats.issued());
    println!(
        "  Responses fetched: {} ({:.1}%)",
        stats.fetched,
        stats.success_rate()
    );
    println!("  Duplicate bindings skipped: {}", stats.duplicates_skipped);
    if stats.hit_round_cap {
        println!("  Stopped at round cap before reaching a fixpoint");
    }
    println!();

    if stats.total_failures() > 0 {
        println!("Failures:");
        println!("  Fetch: {}", stats.fetch_failures);
        println!("  Persist: {}", stats.persist_failures);
        println!("  Extraction: {}", stats.extraction_failures);
        println!("  Render: {}", stats.render_failures);
        println!();
    }

    println!("Parameters ({}):", params.len());
    for (name, values) in params.iter() {
        println!("  {}: {} values", name, values.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_creation() {
        let stats = CrawlStats::new();
        assert_eq!(stats.rounds, 0);
        assert_eq!(stats.issued(), 0);
        assert_eq!(stats.success_rate(), 0.0);
        assert!(!stats.hit_round_cap);
    }

    #[test]
    fn test_success_rate() {
        let stats = CrawlStats {
            fetched: 3,
            fetch_failures: 1,
            persist_failures: 2,
            ..CrawlStats::default()
        };
        assert_eq!(stats.issued(), 4);
        assert_eq!(stats.total_failures(), 3);
        assert!((stats.success_rate() - 75.0).abs() < f64::EPSILON);
    }
}
