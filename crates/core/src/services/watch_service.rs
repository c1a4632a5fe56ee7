use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::watch::{AddWatchOutcome, FlightWatch, WatchKey, MAX_WINDOW_DAYS};
use crate::services::history_service::HistoryService;
use crate::storage::store::{load_json, save_json, KeyValueStore, WATCHES_KEY};

/// Manages the list of flight watches.
///
/// Removing a watch also removes its price history.
pub struct WatchService {
    history_service: HistoryService,
}

impl WatchService {
    pub fn new() -> Self {
        Self {
            history_service: HistoryService::new(),
        }
    }

    /// Stored watches in insertion order.
    pub fn list(&self, store: &dyn KeyValueStore) -> Result<Vec<FlightWatch>, CoreError> {
        Ok(load_json(store, WATCHES_KEY)?.unwrap_or_default())
    }

    /// Validate and store a new watch.
    ///
    /// Codes are normalized to uppercase before the duplicate check, so
    /// `jfk` and `JFK` are the same route. `today` is the creation date the
    /// departure is checked against.
    pub fn add(
        &self,
        store: &mut dyn KeyValueStore,
        mut watch: FlightWatch,
        today: NaiveDate,
    ) -> Result<AddWatchOutcome, CoreError> {
        watch.origin = watch.origin.trim().to_uppercase();
        watch.destination = watch.destination.trim().to_uppercase();
        watch.currency = watch.currency.trim().to_uppercase();
        self.validate_watch(&watch, today)?;

        let mut watches = self.list(store)?;
        let key = watch.key();
        if watches.iter().any(|w| w.key() == key) {
            tracing::info!(watch = %key, "watch already exists");
            return Ok(AddWatchOutcome::AlreadyExists);
        }

        tracing::info!(watch = %key, "adding flight watch");
        watches.push(watch);
        save_json(store, WATCHES_KEY, &watches)?;
        Ok(AddWatchOutcome::Added)
    }

    /// Remove the watch with exactly this identity and delete its history.
    /// Returns `true` if a watch was removed.
    pub fn remove(&self, store: &mut dyn KeyValueStore, key: &WatchKey) -> Result<bool, CoreError> {
        let mut watches = self.list(store)?;
        let before = watches.len();
        watches.retain(|w| &w.key() != key);
        let removed = watches.len() != before;

        if removed {
            save_json(store, WATCHES_KEY, &watches)?;
            tracing::info!(watch = %key, "removed flight watch");
        }
        self.history_service.delete(store, key)?;
        Ok(removed)
    }

    /// Validate a watch before adding it.
    ///
    /// Rules:
    /// - Origin and destination are 3-letter IATA codes and differ
    /// - Departure is today or later; a return date is not before departure
    /// - The flexible window is at most `MAX_WINDOW_DAYS`
    /// - Currency is a 3-letter code
    fn validate_watch(&self, watch: &FlightWatch, today: NaiveDate) -> Result<(), CoreError> {
        for (label, code) in [("Origin", &watch.origin), ("Destination", &watch.destination)] {
            if !is_alpha_code(code) {
                return Err(CoreError::ValidationError(format!(
                    "{label} '{code}' must be a 3-letter airport code (e.g., JFK)"
                )));
            }
        }

        if watch.origin == watch.destination {
            return Err(CoreError::ValidationError(
                "Origin and destination must be different".into(),
            ));
        }

        if watch.depart_date < today {
            return Err(CoreError::ValidationError(format!(
                "Departure date {} must be today ({today}) or later",
                watch.depart_date
            )));
        }

        if let Some(return_date) = watch.return_date {
            if return_date < watch.depart_date {
                return Err(CoreError::ValidationError(format!(
                    "Return date {return_date} is before departure date {}",
                    watch.depart_date
                )));
            }
        }

        if watch.window_days > MAX_WINDOW_DAYS {
            return Err(CoreError::ValidationError(format!(
                "Window of ±{} days exceeds maximum of ±{MAX_WINDOW_DAYS} days",
                watch.window_days
            )));
        }

        if !is_alpha_code(&watch.currency) {
            return Err(CoreError::ValidationError(format!(
                "Invalid currency code '{}': must be exactly 3 ASCII letters (e.g., USD, EUR)",
                watch.currency
            )));
        }

        Ok(())
    }
}

impl Default for WatchService {
    fn default() -> Self {
        Self::new()
    }
}

fn is_alpha_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic())
}
