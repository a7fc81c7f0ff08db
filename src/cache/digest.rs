//! Key Digest Module
//!
//! 64-bit fingerprints of cache keys.

use xxhash_rust::xxh3::{xxh3_64, xxh3_64_with_seed};

/// Seed for shard routing, kept apart from the digest so that keys routed to
/// one shard still spread evenly over that shard's index.
const SHARD_SEED: u64 = 0x51_7c_c1_b7_27_22_0a_95;

/// Digest used as the index key and stored in every record header.
#[inline]
pub fn key_digest(key: &str) -> u64 {
    xxh3_64(key.as_bytes())
}

/// Picks the shard in `[0, shards)` owning `key`.
#[inline]
pub fn shard_for(key: &str, shards: usize) -> usize {
    (xxh3_64_with_seed(key.as_bytes(), SHARD_SEED) % shards.max(1) as u64) as usize
}
