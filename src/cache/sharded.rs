//! Sharded Cache Module
//!
//! Routes each key to one of N independent backends by hashing it.

use tracing::debug;

use crate::cache::digest::shard_for;
use crate::cache::Cache;
use crate::error::Result;

/// Hash-routed collection of backends with no shared state between shards.
pub struct ShardedCache {
    shards: Vec<Box<dyn Cache>>,
}

impl ShardedCache {
    /// Builds `shards` backends with `factory(capacity)`.
    ///
    /// A shard count of 0 is treated as 1.
    pub fn new<F>(shards: u8, capacity: usize, factory: F) -> Self
    where
        F: Fn(usize) -> Box<dyn Cache>,
    {
        let count = shards.max(1);
        debug!("Building {} cache shards of capacity {}", count, capacity);

        Self {
            shards: (0..count).map(|_| factory(capacity)).collect(),
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard(&self, key: &str) -> &dyn Cache {
        self.shards[shard_for(key, self.shards.len())].as_ref()
    }
}

impl Cache for ShardedCache {
    fn store(&self, key: &str, value: &[u8]) -> Result<()> {
        self.shard(key).store(key, value)
    }

    fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.shard(key).load(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{MapCache, RingCache};
    use crate::error::CacheError;
    use std::sync::Arc;

    #[test]
    fn test_sharded_zero_shards() {
        let cache = ShardedCache::new(0, 10, |cap| Box::new(MapCache::new(cap)));
        assert_eq!(cache.shard_count(), 1);

        cache.store("k", b"v").unwrap();
        assert_eq!(cache.load("k").unwrap(), Some(b"v".to_vec()));
    }

    #[test]
    fn test_sharded_routes_to_owning_shard() {
        let maps: Vec<Arc<MapCache>> = (0..8).map(|_| Arc::new(MapCache::new(4))).collect();
        let next = std::sync::atomic::AtomicUsize::new(0);
        let cache = ShardedCache::new(8, 4, |_| {
            let i = next.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            Box::new(SharedMap(Arc::clone(&maps[i])))
        });

        for i in 0..64 {
            cache.store(&format!("key{}", i), b"v").unwrap();
        }

        let total: usize = maps.iter().map(|m| m.len()).sum();
        assert_eq!(total, 64);
        for i in 0..64 {
            let key = format!("key{}", i);
            assert!(maps[shard_for(&key, 8)].load(&key).unwrap().is_some());
        }
    }

    #[test]
    fn test_sharded_buffer_propagates_errors() {
        let cache = ShardedCache::new(4, 32, |cap| Box::new(RingCache::new(cap)));

        assert!(matches!(
            cache.store("big", &[0u8; 64]),
            Err(CacheError::CapacityExceeded { .. })
        ));
    }

    /// Lets the test keep a handle on each shard the factory hands out.
    struct SharedMap(Arc<MapCache>);

    impl Cache for SharedMap {
        fn store(&self, key: &str, value: &[u8]) -> Result<()> {
            self.0.store(key, value)
        }

        fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
            self.0.load(key)
        }
    }
}
