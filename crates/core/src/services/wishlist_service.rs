use crate::errors::CoreError;
use crate::models::country::Country;
use crate::storage::store::{load_json, save_json, KeyValueStore, WISHLIST_KEY};

/// Manages the country wishlist.
///
/// Pure store logic, no API calls. The store is re-read on every call,
/// so nothing here can go stale.
pub struct WishlistService;

impl WishlistService {
    pub fn new() -> Self {
        Self
    }

    /// Stored wishlist in insertion order (empty if never written).
    pub fn list(&self, store: &dyn KeyValueStore) -> Result<Vec<Country>, CoreError> {
        Ok(load_json(store, WISHLIST_KEY)?.unwrap_or_default())
    }

    /// Whether a country with this exact common name is on the wishlist.
    pub fn contains(&self, store: &dyn KeyValueStore, name: &str) -> Result<bool, CoreError> {
        Ok(self.list(store)?.iter().any(|c| c.common_name() == name))
    }

    /// Append `country` unless one with the same common name is present.
    /// Returns `true` if it was added.
    pub fn add(&self, store: &mut dyn KeyValueStore, country: Country) -> Result<bool, CoreError> {
        let mut wishlist = self.list(store)?;
        if wishlist.contains(&country) {
            return Ok(false);
        }
        tracing::info!(country = country.common_name(), "adding country to wishlist");
        wishlist.push(country);
        save_json(store, WISHLIST_KEY, &wishlist)?;
        Ok(true)
    }

    /// Remove every entry with this common name. Returns how many were removed.
    pub fn remove(&self, store: &mut dyn KeyValueStore, name: &str) -> Result<usize, CoreError> {
        let mut wishlist = self.list(store)?;
        let before = wishlist.len();
        wishlist.retain(|c| c.common_name() != name);
        let removed = before - wishlist.len();
        save_json(store, WISHLIST_KEY, &wishlist)?;
        if removed > 0 {
            tracing::info!(country = name, "removed country from wishlist");
        }
        Ok(removed)
    }

    /// Delete the stored wishlist entirely.
    pub fn clear(&self, store: &mut dyn KeyValueStore) -> Result<(), CoreError> {
        tracing::info!("clearing wishlist");
        store.delete(WISHLIST_KEY)
    }
}

impl Default for WishlistService {
    fn default() -> Self {
        Self::new()
    }
}
