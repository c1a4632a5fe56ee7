use crate::errors::CoreError;
use crate::models::history::PriceHistory;
use crate::models::watch::WatchKey;
use crate::storage::store::{load_json, save_json, KeyValueStore};

/// Tracks the bounded price history of each watch.
///
/// Each history lives under `WatchKey::history_key()` as a JSON array.
pub struct HistoryService;

impl HistoryService {
    pub fn new() -> Self {
        Self
    }

    /// Stored history for a watch (empty if none yet).
    pub fn get(&self, store: &dyn KeyValueStore, key: &WatchKey) -> Result<PriceHistory, CoreError> {
        let prices: Option<Vec<f64>> = load_json(store, &key.history_key())?;
        Ok(PriceHistory::from_prices(prices.unwrap_or_default()))
    }

    /// Append an observation, keep the most recent 10, persist, and
    /// return the updated history.
    pub fn append(
        &self,
        store: &mut dyn KeyValueStore,
        key: &WatchKey,
        price: f64,
    ) -> Result<PriceHistory, CoreError> {
        let mut history = self.get(store, key)?;
        history.push(price);
        save_json(store, &key.history_key(), &history)?;
        tracing::debug!(watch = %key, price, len = history.len(), "recorded price observation");
        Ok(history)
    }

    /// Remove the stored history for a watch.
    pub fn delete(&self, store: &mut dyn KeyValueStore, key: &WatchKey) -> Result<(), CoreError> {
        store.delete(&key.history_key())
    }
}

impl Default for HistoryService {
    fn default() -> Self {
        Self::new()
    }
}
