use std::collections::BTreeMap;

use crate::errors::CoreError;
use super::format;
use super::store::KeyValueStore;

/// In-memory store.
///
/// Used directly in tests and by hosts that own persistence themselves:
/// `to_bytes` / `from_bytes` give a portable snapshot the host can write
/// wherever it likes (the WASM front end hands it to browser storage).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize all entries to a TXKV snapshot.
    ///
    /// Flow: entries → bincode → TXKV header + payload
    pub fn to_bytes(&self) -> Result<Vec<u8>, CoreError> {
        let payload = bincode::serialize(&self.entries)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize store: {e}")))?;
        Ok(format::write_snapshot(format::CURRENT_VERSION, &payload))
    }

    /// Restore a store from a TXKV snapshot.
    pub fn from_bytes(data: &[u8]) -> Result<Self, CoreError> {
        let (_header, payload) = format::read_snapshot(data)?;
        let entries: BTreeMap<String, String> = bincode::deserialize(payload)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize store: {e}")))?;
        Ok(Self { entries })
    }

    /// Copy every entry of another store.
    pub fn copy_from(store: &dyn KeyValueStore) -> Result<Self, CoreError> {
        let mut copy = Self::new();
        for key in store.keys()? {
            if let Some(value) = store.get(&key)? {
                copy.entries.insert(key, value);
            }
        }
        Ok(copy)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), CoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), CoreError> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.entries.keys().cloned().collect())
    }
}
