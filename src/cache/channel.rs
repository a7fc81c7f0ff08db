//! Channel Cache Module
//!
//! A single worker thread owns the map; callers ship closures to it over a
//! bounded queue instead of taking a lock.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::cache::Cache;
use crate::error::{CacheError, Result};

type Entries = HashMap<String, Vec<u8>>;
type Op = Box<dyn FnOnce(&mut Entries) + Send>;

// == Channel Cache ==
/// Actor-style backend serialising every operation through one thread.
pub struct ChannelCache {
    ops: Option<SyncSender<Op>>,
    worker: Option<JoinHandle<()>>,
}

impl ChannelCache {
    /// Spawns the worker. `capacity` sizes both the map and the op queue.
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = mpsc::sync_channel::<Op>(capacity);
        let entries = HashMap::with_capacity(capacity);

        let worker = thread::Builder::new()
            .name("channel-cache".to_string())
            .spawn(move || run_ops(rx, entries));

        let worker = match worker {
            Ok(handle) => Some(handle),
            Err(err) => {
                warn!("Failed to spawn channel cache worker: {}", err);
                None
            }
        };

        Self {
            ops: worker.as_ref().map(|_| tx),
            worker,
        }
    }

    fn submit(&self, op: Op) -> Result<()> {
        self.ops
            .as_ref()
            .ok_or(CacheError::BackendUnavailable)?
            .send(op)
            .map_err(|_| CacheError::BackendUnavailable)
    }
}

/// Applies queued operations until every sender is gone.
fn run_ops(rx: Receiver<Op>, mut entries: Entries) {
    debug!("Channel cache worker started");

    for op in rx {
        op(&mut entries);
    }

    debug!("Channel cache worker stopped with {} entries", entries.len());
}

impl Cache for ChannelCache {
    /// Enqueues the write and returns without waiting for it to apply.
    fn store(&self, key: &str, value: &[u8]) -> Result<()> {
        let key = key.to_string();
        let value = value.to_vec();

        self.submit(Box::new(move |entries| {
            entries.insert(key, value);
        }))
    }

    fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let key = key.to_string();
        let (reply_tx, reply_rx) = mpsc::sync_channel(1);

        self.submit(Box::new(move |entries| {
            let _ = reply_tx.send(entries.get(&key).cloned());
        }))?;

        reply_rx.recv().map_err(|_| CacheError::BackendUnavailable)
    }
}

impl Drop for ChannelCache {
    /// Closes the queue and waits for the worker to drain it.
    fn drop(&mut self) {
        self.ops.take();

        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Channel cache worker panicked");
            }
        }
    }
}
