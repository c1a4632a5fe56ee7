pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use models::{
    card::{CardContext, CountryCard, WatchCard, WishlistToggle},
    country::Country,
    history::PriceHistory,
    settings::Settings,
    watch::{AddWatchOutcome, FlightWatch, WatchKey},
};
use providers::registry::ProviderSet;
use providers::static_map::build_static_map_url;
use services::{
    card_service::CardService, history_service::HistoryService, watch_service::WatchService,
    wishlist_service::WishlistService,
};
use storage::memory::MemoryStore;
use storage::store::KeyValueStore;

use errors::CoreError;

/// Main entry point for the Travel Explorer core library.
/// Owns the store, settings and service clients, and exposes every
/// operation the pages need.
#[must_use]
pub struct TravelExplorer {
    store: Box<dyn KeyValueStore>,
    settings: Settings,
    providers: ProviderSet,
    wishlist_service: WishlistService,
    watch_service: WatchService,
    history_service: HistoryService,
    card_service: CardService,
}

impl std::fmt::Debug for TravelExplorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TravelExplorer")
            .field("default_currency", &self.settings.default_currency)
            .field("providers", &self.providers.provider_names())
            .finish()
    }
}

impl TravelExplorer {
    /// Build with the default service clients configured from `settings`.
    pub fn new(store: Box<dyn KeyValueStore>, settings: Settings) -> Self {
        let providers = ProviderSet::new_with_defaults(&settings);
        Self::with_providers(store, settings, providers)
    }

    /// Build with caller-supplied service clients.
    pub fn with_providers(
        store: Box<dyn KeyValueStore>,
        settings: Settings,
        providers: ProviderSet,
    ) -> Self {
        Self {
            store,
            settings,
            providers,
            wishlist_service: WishlistService::new(),
            watch_service: WatchService::new(),
            history_service: HistoryService::new(),
            card_service: CardService::new(),
        }
    }

    /// Restore from a snapshot produced by `export_snapshot`.
    /// Use this for WASM hosts where the frontend handles persistence.
    pub fn load_from_snapshot(bytes: &[u8], settings: Settings) -> Result<Self, CoreError> {
        let store = MemoryStore::from_bytes(bytes)?;
        Ok(Self::new(Box::new(store), settings))
    }

    /// Snapshot every stored entry into portable bytes.
    pub fn export_snapshot(&self) -> Result<Vec<u8>, CoreError> {
        MemoryStore::copy_from(self.store.as_ref())?.to_bytes()
    }

    /// Read-only access to the underlying store.
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    // ── Country Lookup ──────────────────────────────────────────────

    /// Look up a country by exact full name.
    pub async fn search_country(&self, name: &str) -> Result<Country, CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::ValidationError("Country name must not be empty".into()));
        }
        self.providers.countries().find_by_name(name).await
    }

    /// Pick a country uniformly at random.
    pub async fn random_country(&self) -> Result<Country, CoreError> {
        self.providers.countries().random().await
    }

    /// Exchange rate from the default currency to `currency_code`.
    pub async fn exchange_rate(&self, currency_code: &str) -> Result<f64, CoreError> {
        self.providers
            .rates()?
            .get_rate(currency_code, &self.settings.default_currency)
            .await
    }

    /// Static map image URL for a coordinate pair.
    #[must_use]
    pub fn static_map_url(&self, lat: f64, lng: f64) -> String {
        build_static_map_url(&self.settings.endpoints.static_maps, lat, lng)
    }

    /// Build the card for a country shown on the given page.
    pub async fn country_card(
        &self,
        country: &Country,
        context: CardContext,
    ) -> Result<CountryCard, CoreError> {
        self.card_service
            .country_card(
                &self.providers,
                self.store.as_ref(),
                country,
                context,
                &self.settings.default_currency,
                &self.settings.endpoints.static_maps,
            )
            .await
    }

    // ── Wishlist ────────────────────────────────────────────────────

    pub fn wishlist(&self) -> Result<Vec<Country>, CoreError> {
        self.wishlist_service.list(self.store.as_ref())
    }

    pub fn is_in_wishlist(&self, name: &str) -> Result<bool, CoreError> {
        self.wishlist_service.contains(self.store.as_ref(), name)
    }

    /// Add a country; returns `false` if it was already there.
    pub fn add_to_wishlist(&mut self, country: Country) -> Result<bool, CoreError> {
        self.wishlist_service.add(self.store.as_mut(), country)
    }

    /// Remove a country by common name; returns how many entries went.
    pub fn remove_from_wishlist(&mut self, name: &str) -> Result<usize, CoreError> {
        self.wishlist_service.remove(self.store.as_mut(), name)
    }

    /// Flip a country's membership; returns the control for the new state.
    pub fn toggle_wishlist(
        &mut self,
        country: &Country,
        context: CardContext,
    ) -> Result<WishlistToggle, CoreError> {
        self.card_service
            .toggle_wishlist(self.store.as_mut(), country, context)
    }

    pub fn clear_wishlist(&mut self) -> Result<(), CoreError> {
        self.wishlist_service.clear(self.store.as_mut())
    }

    /// Cards for every wishlist entry, in wishlist order.
    pub async fn wishlist_cards(&self) -> Result<Vec<CountryCard>, CoreError> {
        let wishlist = self.wishlist()?;
        let mut cards = Vec::with_capacity(wishlist.len());
        for country in &wishlist {
            cards.push(self.country_card(country, CardContext::Wishlist).await?);
        }
        Ok(cards)
    }

    // ── Flight Watches ──────────────────────────────────────────────

    pub fn watches(&self) -> Result<Vec<FlightWatch>, CoreError> {
        self.watch_service.list(self.store.as_ref())
    }

    /// Add a watch, validated against today's date.
    pub fn add_watch(&mut self, watch: FlightWatch) -> Result<AddWatchOutcome, CoreError> {
        let today = chrono::Utc::now().date_naive();
        self.add_watch_on(watch, today)
    }

    /// Add a watch, validated against an explicit creation date.
    pub fn add_watch_on(
        &mut self,
        watch: FlightWatch,
        today: NaiveDate,
    ) -> Result<AddWatchOutcome, CoreError> {
        self.watch_service.add(self.store.as_mut(), watch, today)
    }

    /// Remove a watch and its price history.
    pub fn remove_watch(&mut self, key: &WatchKey) -> Result<bool, CoreError> {
        self.watch_service.remove(self.store.as_mut(), key)
    }

    /// Stored price history of a watch.
    pub fn price_history(&self, key: &WatchKey) -> Result<PriceHistory, CoreError> {
        self.history_service.get(self.store.as_ref(), key)
    }

    /// Render every watch card, one after another in insertion order.
    pub async fn render_watch_cards(&mut self) -> Result<Vec<WatchCard>, CoreError> {
        let today = chrono::Utc::now().date_naive();
        self.render_watch_cards_on(today).await
    }

    /// Render every watch card using `today` for the flexible-window bounds.
    pub async fn render_watch_cards_on(
        &mut self,
        today: NaiveDate,
    ) -> Result<Vec<WatchCard>, CoreError> {
        let watches = self.watches()?;
        let mut cards = Vec::with_capacity(watches.len());
        for watch in &watches {
            let card = self
                .card_service
                .render_watch_card(&self.providers, self.store.as_mut(), watch, today)
                .await?;
            cards.push(card);
        }
        Ok(cards)
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.settings
    }

    /// Set the base currency for exchange-rate display.
    /// Currency code must be a 3-letter alphabetic string.
    pub fn set_default_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        let trimmed = currency.trim().to_uppercase();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::ValidationError(format!(
                "Invalid currency code '{currency}': must be exactly 3 ASCII letters (e.g., USD, EUR)"
            )));
        }
        self.settings.default_currency = trimmed;
        Ok(())
    }

    /// Set an API credential (e.g., "exchangerate_api", "amadeus_client_id").
    /// Rebuilds the service clients so the new key takes effect immediately.
    pub fn set_api_key(&mut self, provider: String, key: String) {
        self.settings.api_keys.insert(provider, key);
        self.providers = ProviderSet::new_with_defaults(&self.settings);
    }

    /// Remove an API credential. Rebuilds the clients if anything changed.
    pub fn remove_api_key(&mut self, provider: &str) -> bool {
        let removed = self.settings.api_keys.remove(provider).is_some();
        if removed {
            self.providers = ProviderSet::new_with_defaults(&self.settings);
        }
        removed
    }

    /// Whether exchange rates and flight prices are available.
    #[must_use]
    pub fn has_rates(&self) -> bool {
        self.providers.has_rates()
    }

    #[must_use]
    pub fn has_flights(&self) -> bool {
        self.providers.has_flights()
    }
}
