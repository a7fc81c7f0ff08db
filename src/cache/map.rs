//! Map Cache Module
//!
//! Plain associative array behind a reader/writer lock.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::cache::Cache;
use crate::error::Result;

/// Unbounded map backend; `capacity` only pre-sizes the table.
#[derive(Debug, Default)]
pub struct MapCache {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MapCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Cache for MapCache {
    fn store(&self, key: &str, value: &[u8]) -> Result<()> {
        self.entries.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.read().get(key).cloned())
    }
}
