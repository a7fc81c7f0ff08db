//! Configuration Module
//!
//! Handles loading server and cache warmer configuration from environment
//! variables.

use std::env;

use reqwest::Url;
use tracing::warn;

use crate::cache::CacheKind;
use crate::error::ConfigError;

const DEFAULT_CAPACITY: usize = 10_000;
const DEFAULT_SHARDS: u8 = 16;
const DEFAULT_RECORDS: usize = 10_000;
const DEFAULT_CONCURRENCY: usize = 10;

/// Reads and parses `name`, yielding `None` when unset or unparsable.
fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Like [`parsed_var`], but warns and falls back when the value is unusable.
fn positive_var(name: &str, default: usize) -> usize {
    match env::var(name) {
        Err(_) => default,
        Ok(raw) => match raw.trim().parse::<usize>() {
            Ok(value) if value > 0 => value,
            _ => {
                warn!(
                    "{} must be a number greater than zero, got {:?}; using default {}",
                    name, raw, default
                );
                default
            }
        },
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend serving the cache
    pub cache_kind: CacheKind,
    /// Bytes for buffer kinds, entries otherwise; applies per shard
    pub capacity: usize,
    /// Shard count for sharded kinds
    pub shards: u8,
    /// HTTP server port
    pub server_port: u16,
    /// Per-request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Seconds between stats log lines
    pub stats_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_KIND` - map, buffer, channel, sharded_map or sharded_buffer (default: map)
    /// - `CACHE_CAPACITY` - Cache capacity (default: 10000)
    /// - `CACHE_SHARDS` - Shard count, 1-255 (default: 16)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `REQUEST_TIMEOUT_MS` - Per-request timeout (default: 1000)
    /// - `STATS_INTERVAL` - Stats report frequency in seconds (default: 30)
    ///
    /// An unknown `CACHE_KIND` is an error; other bad values fall back to
    /// their defaults with a warning.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let cache_kind = match env::var("CACHE_KIND") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.cache_kind,
        };

        let shards = match env::var("CACHE_SHARDS") {
            Err(_) => defaults.shards,
            Ok(raw) => match raw.trim().parse::<u8>() {
                Ok(value) if value > 0 => value,
                _ => {
                    warn!(
                        "invalid shards number {:?}, using default {}",
                        raw, defaults.shards
                    );
                    defaults.shards
                }
            },
        };

        Ok(Self {
            cache_kind,
            capacity: positive_var("CACHE_CAPACITY", defaults.capacity),
            shards,
            server_port: parsed_var("SERVER_PORT").unwrap_or(defaults.server_port),
            request_timeout_ms: parsed_var("REQUEST_TIMEOUT_MS")
                .unwrap_or(defaults.request_timeout_ms),
            stats_interval: parsed_var("STATS_INTERVAL").unwrap_or(defaults.stats_interval),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_kind: CacheKind::Map,
            capacity: DEFAULT_CAPACITY,
            shards: DEFAULT_SHARDS,
            server_port: 8080,
            request_timeout_ms: 1000,
            stats_interval: 30,
        }
    }
}

/// Cache warmer configuration parameters.
#[derive(Debug, Clone)]
pub struct WarmerConfig {
    /// Base URL of the cache server
    pub url: Url,
    /// Number of records to create
    pub records: usize,
    /// Maximum requests in flight
    pub concurrency: usize,
}

impl WarmerConfig {
    /// Loads the warmer configuration.
    ///
    /// # Environment Variables
    /// - `WARMER_URL` - Cache server URL (required)
    /// - `WARMER_RECORDS` - Number of records to create (default: 10000)
    /// - `WARMER_CONCURRENCY` - Requests in flight (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = env::var("WARMER_URL").map_err(|_| ConfigError::Missing("WARMER_URL"))?;
        let url = Url::parse(raw.trim()).map_err(|err| ConfigError::Invalid {
            name: "WARMER_URL",
            reason: err.to_string(),
        })?;

        Ok(Self {
            url,
            records: positive_var("WARMER_RECORDS", DEFAULT_RECORDS),
            concurrency: positive_var("WARMER_CONCURRENCY", DEFAULT_CONCURRENCY),
        })
    }
}
