//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing JSON response bodies.

use serde::Serialize;

use crate::cache::{CacheKind, StatsSnapshot};

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Backend serving the cache
    pub cache_kind: String,
    /// Successful stores
    pub stores: u64,
    /// Stores refused by the backend
    pub rejected_stores: u64,
    /// Loads that returned a value
    pub hits: u64,
    /// Loads for absent keys
    pub misses: u64,
    /// Loads that detected stale or corrupted data
    pub failures: u64,
    /// Hit rate (hits / all loads)
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from a counter snapshot
    pub fn new(cache_kind: CacheKind, stats: StatsSnapshot) -> Self {
        Self {
            cache_kind: cache_kind.to_string(),
            stores: stats.stores,
            rejected_stores: stats.rejected_stores,
            hits: stats.hits,
            misses: stats.misses,
            failures: stats.failures,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
