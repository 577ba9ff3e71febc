use serde::Deserialize;
use std::collections::BTreeMap;

/// Main configuration structure for api-mirror
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Prefix prepended to every endpoint and stripped from saved paths
    #[serde(default)]
    pub base: String,

    /// Endpoint descriptions, in crawl order
    #[serde(default)]
    pub urls: Vec<EndpointConfig>,

    #[serde(default)]
    pub crawler: CrawlerConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// One endpoint: its URL pattern and the parameters its responses provide
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    pub url: UrlParts,

    /// Produced parameter name mapped to the path its values are read from
    #[serde(default)]
    pub provides: BTreeMap<String, PathSpecConfig>,
}

/// The `url` field of an endpoint: a single segment or a segment list
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum UrlParts {
    Single(String),
    Parts(Vec<String>),
}

impl UrlParts {
    /// Returns the raw segments in order
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Self::Single(s) => vec![s.as_str()],
            Self::Parts(parts) => parts.iter().map(String::as_str).collect(),
        }
    }
}

/// A `provides` path: dotted string (`"a.b"`) or explicit key list
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PathSpecConfig {
    Dotted(String),
    Keys(Vec<String>),
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Total timeout for a single request (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout for a single request (seconds)
    #[serde(
        rename = "connect-timeout-secs",
        default = "default_connect_timeout_secs"
    )]
    pub connect_timeout_secs: u64,

    /// Upper bound on discovery rounds before the crawl gives up
    #[serde(rename = "max-rounds", default = "default_max_rounds")]
    pub max_rounds: u32,

    /// User agent sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_rounds: default_max_rounds(),
            user_agent: default_user_agent(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Root directory the mirrored tree is written under
    #[serde(default = "default_directory")]
    pub directory: String,

    /// Extension appended to saved paths lacking it
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            extension: default_extension(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_rounds() -> u32 {
    1000
}

fn default_user_agent() -> String {
    concat!("api-mirror/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_directory() -> String {
    ".".to_string()
}

fn default_extension() -> String {
    ".json".to_string()
}
