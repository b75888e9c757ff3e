//! Configuration management for the wikisense analyzer
//!
//! Settings come from built-in defaults overridable through environment
//! variables. There is no config file: the tool is a one-shot batch job and
//! everything request-shaped lives on the CLI.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default MediaWiki API endpoint
pub const DEFAULT_API_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// External API configuration
    pub api: ApiConfig,

    /// Lookup cache configuration
    pub cache: CacheConfig,
}

/// MediaWiki API client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API endpoint URL
    pub endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum retry attempts for retryable failures
    pub max_retries: u32,

    /// Rate limit (requests per second)
    pub requests_per_second: u32,

    /// Result-count limit for the backlink query. Redirects beyond this
    /// limit are silently missed; this is an accepted approximation.
    pub backlink_limit: u32,
}

/// Lookup cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of memoized lookups per resolver
    pub capacity: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_API_ENDPOINT.to_string(),
            timeout_secs: 30,
            max_retries: 3,
            requests_per_second: 5,
            backlink_limit: 100,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 128 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl Config {
    /// Create config from environment variables, falling back to defaults
    ///
    /// Recognized variables:
    /// - `WIKISENSE_API_ENDPOINT` - MediaWiki API URL
    /// - `WIKISENSE_API_TIMEOUT_SECS` - request timeout
    /// - `WIKISENSE_API_MAX_RETRIES` - retry attempts
    /// - `WIKISENSE_API_RPS` - requests per second
    /// - `WIKISENSE_BACKLINK_LIMIT` - backlink query limit
    /// - `WIKISENSE_CACHE_CAPACITY` - lookup cache size
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api: ApiConfig {
                endpoint: std::env::var("WIKISENSE_API_ENDPOINT")
                    .unwrap_or(defaults.api.endpoint),
                timeout_secs: env_parse("WIKISENSE_API_TIMEOUT_SECS", defaults.api.timeout_secs),
                max_retries: env_parse("WIKISENSE_API_MAX_RETRIES", defaults.api.max_retries),
                requests_per_second: env_parse("WIKISENSE_API_RPS", defaults.api.requests_per_second),
                backlink_limit: env_parse("WIKISENSE_BACKLINK_LIMIT", defaults.api.backlink_limit),
            },
            cache: CacheConfig {
                capacity: env_parse("WIKISENSE_CACHE_CAPACITY", defaults.cache.capacity),
            },
        }
    }
}

impl ApiConfig {
    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
