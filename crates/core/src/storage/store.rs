use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::CoreError;

/// Store key of the country wishlist.
pub const WISHLIST_KEY: &str = "travelWishlist";
/// Store key of the flight-watch list.
pub const WATCHES_KEY: &str = "flightWatches";

/// Narrow interface over the host's persistent string-keyed store
/// (browser local storage, a file, or plain memory in tests).
///
/// Synchronous and single-client: callers never interleave on one store.
pub trait KeyValueStore {
    /// Read the raw value under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String) -> Result<(), CoreError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), CoreError>;

    /// Every key currently stored.
    fn keys(&self) -> Result<Vec<String>, CoreError>;
}

/// Read and JSON-decode the value under `key`.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, CoreError> {
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|e| {
            CoreError::Deserialization(format!("Failed to decode stored value '{key}': {e}"))
        }),
        None => Ok(None),
    }
}

/// JSON-encode `value` and write it under `key`.
pub fn save_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), CoreError> {
    let raw = serde_json::to_string(value).map_err(|e| {
        CoreError::Serialization(format!("Failed to encode value for '{key}': {e}"))
    })?;
    store.set(key, raw)
}
