//! JSON helpers for reading collections out of a [`KeyValueStore`].

use serde::de::DeserializeOwned;

use super::error::Result;
use super::kv::KeyValueStore;

/// Reads a JSON array stored under `key`.
///
/// An absent key reads as an empty collection, so a fresh store behaves
/// like one holding no records.
///
/// # Errors
///
/// Returns an error if the read fails or the stored value is not a valid
/// array of `T`.
pub fn read_collection<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Vec<T>> {
    match store.get(key)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

/// Reads a single JSON record stored under `key`.
///
/// # Errors
///
/// Returns an error if the read fails or the stored value does not decode.
pub fn read_record<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>> {
    store
        .get(key)?
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .map_err(Into::into)
}
