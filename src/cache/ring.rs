//! Ring Buffer Cache Module
//!
//! Fixed-capacity cache that appends framed records to one contiguous byte
//! region and wraps to the start when the next record would not fit.
//!
//! # Memory Layout
//! ```text
//! +------------------------------------------------------+
//! | Record 1 | Record 2 | Record 3 | ... | [stale bytes]  |
//! +------------------------------------------------------+
//! ^                                ^                      ^
//! 0                             cursor                capacity
//! ```
//!
//! Wrapping never cleans the index. Entries whose bytes were reused by a
//! later record are detected lazily on load (digest, bounds and marker
//! checks) and evicted then.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use crate::cache::digest::key_digest;
use crate::cache::record::{self, RecordHeader, MARKER_LEN};
use crate::cache::Cache;
use crate::error::{CacheError, Result};

// == Ring State ==
/// Everything guarded by the cache's single reader/writer lock.
#[derive(Debug)]
struct RingState {
    /// Fixed-length byte region, never resized
    buf: Box<[u8]>,
    /// Offset of the next record, always below capacity
    cursor: usize,
    /// Key digest -> offset of that key's most recent record
    index: HashMap<u64, usize>,
    /// Number of records written so far
    writes: u64,
}

// == Ring Cache ==
/// Ring-buffer backed cache with lazy staleness detection.
#[derive(Debug)]
pub struct RingCache {
    state: RwLock<RingState>,
    capacity: usize,
}

/// Outcome of the locked part of a load.
struct Snapshot {
    offset: usize,
    writes: u64,
    span: Vec<u8>,
}

impl RingCache {
    // == Constructor ==
    /// Creates a cache owning `capacity` bytes.
    ///
    /// A capacity below [`record::MIN_RECORD_LEN`] is accepted but every
    /// store will fail with `CapacityExceeded`.
    pub fn new(capacity: usize) -> Self {
        Self {
            state: RwLock::new(RingState {
                buf: vec![0u8; capacity].into_boxed_slice(),
                cursor: 0,
                index: HashMap::new(),
                writes: 0,
            }),
            capacity,
        }
    }

    /// Size of the byte region.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Offset the next record will be written at, unless it wraps.
    pub fn cursor(&self) -> usize {
        self.state.read().cursor
    }

    /// Number of index entries, stale ones included.
    pub fn indexed_keys(&self) -> usize {
        self.state.read().index.len()
    }

    // == Locked Read ==
    /// Looks up `digest` and copies its candidate span out of the buffer.
    ///
    /// The whole copy happens under the shared lock; interpreting the bytes
    /// is left to the caller.
    fn snapshot(&self, key: &str, digest: u64) -> Result<Option<Snapshot>> {
        let state = self.state.read();

        let Some(&offset) = state.index.get(&digest) else {
            return Ok(None);
        };

        let header =
            RecordHeader::decode(&state.buf, offset).ok_or(CacheError::OutOfBounds {
                offset,
                span: record::HEADER_LEN,
                capacity: self.capacity,
            })?;

        if header.digest != digest {
            let writes = state.writes;
            drop(state);
            self.evict_stale(digest, offset, writes);
            return Err(CacheError::DigestMismatch {
                key: key.to_string(),
            });
        }

        let span = match header.span_range(offset) {
            Some(range) if range.end <= self.capacity => state.buf[range].to_vec(),
            _ => {
                let writes = state.writes;
                drop(state);
                self.evict_stale(digest, offset, writes);
                return Err(CacheError::OutOfBounds {
                    offset,
                    span: header.span_len(),
                    capacity: self.capacity,
                });
            }
        };

        Ok(Some(Snapshot {
            offset,
            writes: state.writes,
            span,
        }))
    }

    // == Evict Stale ==
    /// Drops the index entry for `digest` if it still points at `offset`.
    ///
    /// Nothing is dropped if any record was written since the failed read;
    /// a concurrent re-store may have landed on the same offset.
    fn evict_stale(&self, digest: u64, offset: usize, seen_writes: u64) {
        let mut state = self.state.write();

        if state.writes != seen_writes {
            return;
        }

        if state.index.get(&digest) == Some(&offset) {
            state.index.remove(&digest);
            debug!(digest, offset, "evicted stale index entry");
        }
    }
}

impl Cache for RingCache {
    // == Store ==
    /// Appends a framed record at the cursor, wrapping to offset 0 when it
    /// would not fit before the end of the buffer.
    fn store(&self, key: &str, value: &[u8]) -> Result<()> {
        let record_size = record::framed_len(value.len());

        if record_size > self.capacity || u32::try_from(value.len()).is_err() {
            return Err(CacheError::CapacityExceeded {
                record_size,
                capacity: self.capacity,
            });
        }

        let digest = key_digest(key);
        let record = record::encode(digest, value);

        let mut guard = self.state.write();
        let state = &mut *guard;

        if state.cursor + record_size > self.capacity {
            debug!(
                cursor = state.cursor,
                record_size, "ring buffer wrapped to offset 0"
            );
            state.cursor = 0;
        }

        let offset = state.cursor;
        state.buf[offset..offset + record_size].copy_from_slice(&record);
        state.index.insert(digest, offset);
        state.writes += 1;

        state.cursor = offset + record_size;
        if state.cursor == self.capacity {
            state.cursor = 0;
        }

        Ok(())
    }

    // == Load ==
    /// Returns the most recent value stored under `key`.
    ///
    /// Marker validation runs after the shared lock is released.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let digest = key_digest(key);

        let Some(Snapshot {
            offset,
            writes,
            mut span,
        }) = self.snapshot(key, digest)?
        else {
            return Ok(None);
        };

        let Some(payload_len) = record::unframe(&span).map(<[u8]>::len) else {
            self.evict_stale(digest, offset, writes);
            return Err(CacheError::FramingCorrupted {
                key: key.to_string(),
                offset,
            });
        };

        span.truncate(MARKER_LEN + payload_len);
        span.drain(..MARKER_LEN);

        Ok(Some(span))
    }
}
