//! Stats Reporter Task
//!
//! Background task that periodically logs the server's request counters.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheStats, StatsSnapshot};

/// Spawns a background task that logs a stats snapshot every interval.
///
/// Intervals with traffic since the previous report log at info level,
/// idle ones at debug level.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let stats = Arc::new(CacheStats::new());
/// let reporter_handle = spawn_stats_reporter(stats.clone(), 30);
/// // Later, during shutdown:
/// reporter_handle.abort();
/// ```
pub fn spawn_stats_reporter(stats: Arc<CacheStats>, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting stats reporter with interval of {} seconds",
            interval.as_secs()
        );

        let mut previous = StatsSnapshot::default();

        loop {
            tokio::time::sleep(interval).await;

            let current = stats.snapshot();
            if current.requests() > previous.requests() {
                info!(
                    stores = current.stores,
                    rejected_stores = current.rejected_stores,
                    hits = current.hits,
                    misses = current.misses,
                    failures = current.failures,
                    "Cache stats: hit rate {:.3}",
                    current.hit_rate()
                );
            } else {
                debug!("Cache stats: no requests since last report");
            }
            previous = current;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reporter_keeps_running() {
        let stats = Arc::new(CacheStats::new());
        let handle = spawn_stats_reporter(stats.clone(), 1);

        stats.record_hit();
        tokio::time::sleep(Duration::from_millis(1200)).await;

        assert!(!handle.is_finished(), "Reporter should still be running");
        handle.abort();
    }

    #[tokio::test]
    async fn test_reporter_can_be_aborted() {
        let stats = Arc::new(CacheStats::new());

        let handle = spawn_stats_reporter(stats, 1);

        // Abort immediately
        handle.abort();

        // Wait a bit and verify task is finished
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
