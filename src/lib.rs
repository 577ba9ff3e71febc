//! api-mirror: a parameter-driven API crawler
//!
//! This crate walks a declarative set of REST-like endpoints, discovers
//! placeholder parameter values from previously fetched JSON responses, and
//! mirrors every resulting concrete URL to a matching file layout exactly once.

pub mod config;
pub mod crawler;
pub mod endpoint;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for api-mirror operations
#[derive(Debug, Error)]
pub enum ApiMirrorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Fetch error for {url}: {source}")]
    Fetch { url: String, source: FetchError },

    #[error("Persist error: {0}")]
    Persist(#[from] PersistError),

    #[error("Extraction error for {url}: {source}")]
    Extraction { url: String, source: ExtractionError },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors raised while rendering a URL template
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// A template references a parameter that has no bound value
    #[error("No value bound for parameter '{name}' in template {template}")]
    MissingBinding { name: String, template: String },
}

/// Errors raised by the fetch collaborator
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP status {status}")]
    Status { status: u16 },

    #[error("Request timeout")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// Errors raised while persisting a response
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Refusing to save {url} outside the output directory")]
    OutsideRoot { url: String },

    #[error("Failed to write {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

/// Errors raised while extracting parameter values from a response
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Result type alias for api-mirror operations
pub type Result<T> = std::result::Result<T, ApiMirrorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, Scheduler};
pub use endpoint::{Endpoint, PathSpec, Segment, UrlTemplate, ValueExtractor};
pub use output::{CrawlStats, ResultSaver};
pub use state::{IssuedSet, ParamStore};
