//! The [`KeyValueStore`] trait and its write batch.

use serde::Serialize;

use super::error::Result;

/// A single staged write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    /// Store `value` under `key`, replacing any previous value.
    Put {
        /// Storage key.
        key: String,
        /// Encoded value.
        value: String,
    },
    /// Remove `key`. Removing an absent key is not an error.
    Delete {
        /// Storage key.
        key: String,
    },
}

impl WriteOp {
    /// Returns the key this operation targets.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Put { key, .. } | Self::Delete { key } => key,
        }
    }
}

/// Writes staged by one operation, committed together.
///
/// Later writes to the same key win, matching the order in which the
/// operations were pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    /// Creates an empty batch.
    #[must_use]
    pub const fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Stages a raw value.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.ops.push(WriteOp::Put {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Stages a value encoded as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized.
    pub fn put_json<T: Serialize + ?Sized>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<&mut Self> {
        let encoded = serde_json::to_string(value)?;
        Ok(self.put(key, encoded))
    }

    /// Stages a removal.
    pub fn delete(&mut self, key: impl Into<String>) -> &mut Self {
        self.ops.push(WriteOp::Delete { key: key.into() });
        self
    }

    /// Returns the staged operations in order.
    #[must_use]
    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    /// Returns `true` if nothing has been staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Returns the number of staged operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }
}

/// Trait for the persistent key-value store backing ClubHub.
///
/// Values are UTF-8 text (JSON in practice). Implementations must apply a
/// [`WriteBatch`] atomically: either every staged write becomes visible or
/// none does.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so one store can be shared by the
/// identity and membership services behind an `Arc`.
///
/// # Example
///
/// ```
/// use clubhub_core::store::{KeyValueStore, MemoryStore};
///
/// let store = MemoryStore::new();
/// store.set("theme", "dark").unwrap();
/// assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
/// ```
pub trait KeyValueStore: Send + Sync {
    /// Retrieves the value stored under `key`.
    ///
    /// # Returns
    ///
    /// `Ok(Some(value))` if found, `Ok(None)` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Commits every operation in `batch` atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; in that case no operation of
    /// the batch is visible.
    fn apply(&self, batch: &WriteBatch) -> Result<()>;

    /// Stores a single value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut batch = WriteBatch::new();
        batch.put(key, value);
        self.apply(&batch)
    }

    /// Removes a single key.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn remove(&self, key: &str) -> Result<()> {
        let mut batch = WriteBatch::new();
        batch.delete(key);
        self.apply(&batch)
    }

    /// Checks whether a value exists under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}
