//! Cache Statistics Module
//!
//! Counts store and load outcomes as seen by the server.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Stats ==
/// Lock-free counters shared by all request handlers.
#[derive(Debug, Default)]
pub struct CacheStats {
    stores: AtomicU64,
    rejected_stores: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    failures: AtomicU64,
}

// == Stats Snapshot ==
/// Point-in-time copy of [`CacheStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatsSnapshot {
    /// Successful stores
    pub stores: u64,
    /// Stores refused by the backend
    pub rejected_stores: u64,
    /// Loads that returned a value
    pub hits: u64,
    /// Loads for keys the cache does not hold
    pub misses: u64,
    /// Loads that failed staleness or framing checks
    pub failures: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_store(&self) {
        self.stores.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected_store(&self) {
        self.rejected_stores.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Reads every counter. Counters are independent, so a snapshot taken
    /// under load may mix slightly different instants.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            stores: self.stores.load(Ordering::Relaxed),
            rejected_stores: self.rejected_stores.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

impl StatsSnapshot {
    // == Hit Rate ==
    /// Returns hits over all loads, or 0.0 if there were no loads.
    pub fn hit_rate(&self) -> f64 {
        let loads = self.loads();
        if loads == 0 {
            0.0
        } else {
            self.hits as f64 / loads as f64
        }
    }

    /// Total number of loads, whatever their outcome.
    pub fn loads(&self) -> u64 {
        self.hits + self.misses + self.failures
    }

    /// Total number of requests counted.
    pub fn requests(&self) -> u64 {
        self.loads() + self.stores + self.rejected_stores
    }
}
