//! Configuration module for api-mirror
//!
//! This module handles loading, parsing, and validating the endpoint
//! description. TOML and JSON documents are both accepted.
//!
//! # Example
//!
//! ```no_run
//! use api_mirror::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("api.toml")).unwrap();
//! println!("Crawl will stop after at most {} rounds", config.crawler.max_rounds);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, EndpointConfig, OutputConfig, PathSpecConfig, UrlParts};

// Re-export parser functions
pub use parser::{
    compute_config_hash, load_config, load_config_with_hash, parse_config_str, ConfigFormat,
};
