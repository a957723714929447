//! In-memory [`KeyValueStore`].

use std::collections::HashMap;
use std::sync::RwLock;

use super::error::{Result, StoreError};
use super::kv::{KeyValueStore, WriteBatch, WriteOp};

/// In-memory storage backed by a `HashMap`.
///
/// Nothing is persisted. Used as the test double for the services and
/// for throwaway sessions. A batch is applied while holding the write lock,
/// so readers never observe half of it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn len(&self) -> Result<usize> {
        let data = self
            .data
            .read()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        Ok(data.len())
    }

    /// Returns `true` if no keys are stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let data = self
            .data
            .read()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        Ok(data.get(key).cloned())
    }

    fn apply(&self, batch: &WriteBatch) -> Result<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        for op in batch.ops() {
            match op {
                WriteOp::Put { key, value } => {
                    data.insert(key.clone(), value.clone());
                }
                WriteOp::Delete { key } => {
                    data.remove(key);
                }
            }
        }
        Ok(())
    }
}
