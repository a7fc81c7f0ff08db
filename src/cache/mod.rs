//! Cache Module
//!
//! The two-operation cache contract and its interchangeable backends.

mod channel;
pub mod digest;
mod map;
pub mod record;
mod ring;
mod sharded;
mod stats;


use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{ConfigError, Result};

// Re-export public types
pub use channel::ChannelCache;
pub use map::MapCache;
pub use ring::RingCache;
pub use sharded::ShardedCache;
pub use stats::{CacheStats, StatsSnapshot};

// == Cache Contract ==
/// Byte-value key/value storage shared across threads.
///
/// Callers never see which backend they talk to. Returned values are always
/// copies; no reference into backend memory escapes.
pub trait Cache: Send + Sync {
    /// Stores `value` under `key`, replacing any previous value.
    fn store(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Returns the value stored under `key`, or `None` if there is none.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>>;
}

// == Cache Kind ==
/// Backend selector used by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKind {
    Map,
    Buffer,
    Channel,
    ShardedMap,
    ShardedBuffer,
}

impl CacheKind {
    pub const ALL: [CacheKind; 5] = [
        CacheKind::Map,
        CacheKind::Buffer,
        CacheKind::Channel,
        CacheKind::ShardedMap,
        CacheKind::ShardedBuffer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheKind::Map => "map",
            CacheKind::Buffer => "buffer",
            CacheKind::Channel => "channel",
            CacheKind::ShardedMap => "sharded_map",
            CacheKind::ShardedBuffer => "sharded_buffer",
        }
    }
}

impl fmt::Display for CacheKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        CacheKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| ConfigError::UnknownCacheKind(s.to_string()))
    }
}

// == Build Cache ==
/// Constructs the backend named by `kind`.
///
/// `capacity` is bytes for buffer kinds and an entry-count hint otherwise.
/// Sharded kinds give every shard the full `capacity`.
pub fn build_cache(kind: CacheKind, capacity: usize, shards: u8) -> Arc<dyn Cache> {
    match kind {
        CacheKind::Map => Arc::new(MapCache::new(capacity)),
        CacheKind::Buffer => Arc::new(RingCache::new(capacity)),
        CacheKind::Channel => Arc::new(ChannelCache::new(capacity)),
        CacheKind::ShardedMap => Arc::new(ShardedCache::new(shards, capacity, |cap| {
            Box::new(MapCache::new(cap))
        })),
        CacheKind::ShardedBuffer => Arc::new(ShardedCache::new(shards, capacity, |cap| {
            Box::new(RingCache::new(cap))
        })),
    }
}
