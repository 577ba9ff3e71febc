//! Fixpoint scheduler driving the crawl
//!
//! This module handles:
//! - Deciding which endpoints are fetchable from the parameters seen so far
//! - Expanding multi-valued parameters into concrete bindings
//! - Skipping bindings that were already issued
//! - Merging newly extracted parameter values and repeating until a full
//!   pass makes no progress
//!
//! The crawl is one sequential control flow: each fetch is awaited before
//! the next binding is considered, so the parameter store and the issued set
//! have a single writer and every round's results are merged before the next
//! round evaluates eligibility.

use crate::config::Config;
use crate::crawler::fetcher::Fetch;
use crate::endpoint::Endpoint;
use crate::output::{CrawlStats, Persist};
use crate::state::{IssuedKey, IssuedSet, ParamStore};
use crate::ApiMirrorError;

/// Default cap on discovery rounds
pub const DEFAULT_MAX_ROUNDS: u32 = 1000;

/// Final state of a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub stats: CrawlStats,
    pub params: ParamStore,
    pub issued: IssuedSet,
}

/// Scheduler owns all state of one crawl
///
/// The scheduler coordinates:
/// - The endpoint list, in declaration order
/// - The parameter store, populated only from extracted responses
/// - The issued-request set used for deduplication
/// - Statistics for the run
pub struct Scheduler<F, P> {
    endpoints: Vec<Endpoint>,
    fetcher: F,
    persister: P,
    params: ParamStore,
    issued: IssuedSet,
    stats: CrawlStats,
    max_rounds: u32,
}

impl<F: Fetch, P: Persist> Scheduler<F, P> {
    /// Creates a new scheduler with empty state
    ///
    /// # Arguments
    ///
    /// * `endpoints` - Endpoints to crawl; their position is their identity
    /// * `fetcher` - Retrieves response bodies
    /// * `persister` - Saves response bodies
    pub fn new(endpoints: Vec<Endpoint>, fetcher: F, persister: P) -> Self {
        Self {
            endpoints,
            fetcher,
            persister,
            params: ParamStore::new(),
            issued: IssuedSet::new(),
            stats: CrawlStats::new(),
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    /// Creates a scheduler for every endpoint described in `config`
    pub fn from_config(config: &Config, fetcher: F, persister: P) -> Self {
        let endpoints = config
            .urls
            .iter()
            .map(|entry| Endpoint::from_config(&config.base, entry))
            .collect();
        Self::new(endpoints, fetcher, persister).with_max_rounds(config.crawler.max_rounds)
    }

    /// Sets the maximum number of rounds before the crawl gives up
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn params(&self) -> &ParamStore {
        &self.params
    }

    pub fn issued(&self) -> &IssuedSet {
        &self.issued
    }

    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    /// Consumes the scheduler, keeping its final state
    pub fn into_report(self) -> CrawlReport {
        CrawlReport {
            stats: self.stats,
            params: self.params,
            issued: self.issued,
        }
    }

    /// Runs rounds until one makes no progress or the round cap is reached
    ///
    /// Per-request failures are logged and never end the crawl.
    pub async fn download(&mut self) -> &CrawlStats {
        loop {
            if self.stats.rounds >= self.max_rounds {
                tracing::warn!(
                    "Stopping after {} rounds without reaching a fixpoint",
                    self.stats.rounds
                );
                self.stats.hit_round_cap = true;
                break;
            }

            if !self.download_step().await {
                break;
            }
        }

        tracing::info!(
            "Crawl finished after {} rounds: {} fetched, {} failed, {} parameters known",
            self.stats.rounds,
            self.stats.fetched,
            self.stats.total_failures(),
            self.params.len()
        );

        &self.stats
    }

    /// Performs one pass over every endpoint
    ///
    /// # Returns
    ///
    /// `true` if at least one binding was fetched and had its parameters
    /// merged, even if no new values resulted
    pub async fn download_step(&mut self) -> bool {
        self.stats.rounds += 1;
        let round = self.stats.rounds;
        tracing::debug!("Starting round {}", round);

        let mut progress = false;
        for index in 0..self.endpoints.len() {
            if self.download_endpoint(index).await {
                progress = true;
            }
        }

        tracing::info!(
            "Round {} done: {} requests issued so far, {} parameter values known",
            round,
            self.issued.len(),
            self.params.total_values()
        );

        progress
    }

    /// Issues every not-yet-issued binding of one endpoint
    async fn download_endpoint(&mut self, index: usize) -> bool {
        let candidates: Vec<Vec<String>> = {
            let endpoint = &self.endpoints[index];
            let deps = endpoint.dependencies();
            match self.params.bindings(&deps) {
                Some(bindings) => {
                    tracing::debug!(
                        "{}: {} candidate bindings",
                        endpoint,
                        bindings.cardinality()
                    );
                    bindings.collect()
                }
                None => {
                    tracing::debug!("Skipping {}: dependencies not yet observed", endpoint);
                    return false;
                }
            }
        };

        let mut progress = false;
        for values in candidates {
            if !self.issued.insert(IssuedKey::new(index, values.clone())) {
                self.stats.duplicates_skipped += 1;
                continue;
            }

            if self.download_binding(index, &values).await {
                progress = true;
            }
        }

        progress
    }

    /// Fetches, saves and extracts one binding
    ///
    /// Returns true once the extracted values have been merged.
    async fn download_binding(&mut self, index: usize, values: &[String]) -> bool {
        let endpoint = &self.endpoints[index];

        let url = match endpoint.template().render_values(values) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("{}", ApiMirrorError::from(e));
                self.stats.render_failures += 1;
                return false;
            }
        };

        tracing::info!("downloading {}...", url);
        let body = match self.fetcher.fetch(&url).await {
            Ok(body) => body,
            Err(source) => {
                tracing::warn!("{}", ApiMirrorError::Fetch { url, source });
                self.stats.fetch_failures += 1;
                return false;
            }
        };
        self.stats.fetched += 1;

        if let Err(e) = self.persister.save(&url, &body) {
            tracing::warn!("Save failed on {}: {}", url, ApiMirrorError::from(e));
            self.stats.persist_failures += 1;
        }

        let produced = match endpoint.produce(&body) {
            Ok(produced) => produced,
            Err(source) => {
                tracing::warn!("{}", ApiMirrorError::Extraction { url, source });
                self.stats.extraction_failures += 1;
                return false;
            }
        };

        for (name, found) in produced {
            let outcome = self.params.merge(&name, found);
            if outcome.created {
                tracing::debug!("Discovered parameter {} from {}", name, url);
            } else if outcome.is_new() {
                tracing::debug!("{} new values for {} from {}", outcome.added, name, url);
            }
            self.stats.new_values += outcome.added as u64;
        }

        true
    }
}
