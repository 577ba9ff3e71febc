//! Output module for persisting responses and reporting on a crawl
//!
//! This module handles:
//! - Mirroring each fetched response to a file derived from its URL
//! - Recording and printing crawl statistics

mod persister;
pub mod stats;

pub use persister::{Persist, ResultSaver};
pub use stats::{print_statistics, CrawlStats};
