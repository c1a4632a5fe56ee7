use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::card::{
    CardContext, CardField, CountryCard, WatchCard, WatchCardState, WishlistToggle,
};
use crate::models::country::Country;
use crate::models::watch::FlightWatch;
use crate::providers::registry::ProviderSet;
use crate::providers::static_map::build_static_map_url;
use crate::services::chart_service::ChartService;
use crate::services::fare_service::FareService;
use crate::services::history_service::HistoryService;
use crate::services::wishlist_service::WishlistService;
use crate::storage::store::KeyValueStore;

/// Builds country and watch cards.
///
/// Failures of decorative lookups (rate, summary) degrade the card instead
/// of failing it; a failed fare lookup marks just that watch card failed.
pub struct CardService {
    wishlist_service: WishlistService,
    history_service: HistoryService,
    fare_service: FareService,
    chart_service: ChartService,
}

impl CardService {
    pub fn new() -> Self {
        Self {
            wishlist_service: WishlistService::new(),
            history_service: HistoryService::new(),
            fare_service: FareService::new(),
            chart_service: ChartService::new(),
        }
    }

    // ── Country cards ───────────────────────────────────────────────

    /// Build a country card: flag, info fields, summary, map and the
    /// wishlist control for the country's current membership.
    pub async fn country_card(
        &self,
        providers: &ProviderSet,
        store: &dyn KeyValueStore,
        country: &Country,
        context: CardContext,
        base_currency: &str,
        static_map_base: &str,
    ) -> Result<CountryCard, CoreError> {
        let name = country.common_name();
        let base = base_currency.to_uppercase();
        let currency = country.primary_currency();

        let rate = match (currency, providers.rates()) {
            (Some(code), Ok(rates)) => match rates.get_rate(code, &base).await {
                Ok(rate) => Some(rate),
                Err(e) => {
                    tracing::warn!(country = name, currency = code, error = %e, "exchange rate unavailable");
                    None
                }
            },
            _ => None,
        };

        let summary = providers.summaries().get_summary(name).await;
        let map_url = country
            .coordinates()
            .map(|(lat, lng)| build_static_map_url(static_map_base, lat, lng));

        let in_wishlist = self.wishlist_service.contains(store, name)?;

        Ok(CountryCard {
            country_name: name.to_string(),
            flag_url: country.flag_url().map(str::to_string),
            flag_alt: format!("Flag of {name}"),
            fields: country_fields(country, &base, rate),
            summary: (!summary.is_empty()).then_some(summary),
            map_url,
            context,
            toggle: WishlistToggle::for_membership(in_wishlist, context),
        })
    }

    /// Flip the country's wishlist membership, then re-read it from the
    /// store and return the control matching the stored state.
    pub fn toggle_wishlist(
        &self,
        store: &mut dyn KeyValueStore,
        country: &Country,
        context: CardContext,
    ) -> Result<WishlistToggle, CoreError> {
        let name = country.common_name();
        if self.wishlist_service.contains(store, name)? {
            self.wishlist_service.remove(store, name)?;
        } else {
            self.wishlist_service.add(store, country.clone())?;
        }
        let in_wishlist = self.wishlist_service.contains(store, name)?;
        Ok(WishlistToggle::for_membership(in_wishlist, context))
    }

    // ── Watch cards ─────────────────────────────────────────────────

    /// A fresh card in the `Created` state: heading and details only.
    pub fn watch_card(&self, watch: &FlightWatch) -> WatchCard {
        let key = watch.key();
        let mut details = vec![CardField::new(
            "Depart",
            watch.depart_date.format("%Y-%m-%d").to_string(),
        )];
        if let Some(return_date) = watch.return_date {
            details.push(CardField::new(
                "Return",
                return_date.format("%Y-%m-%d").to_string(),
            ));
        }
        if watch.window_days > 0 {
            details.push(CardField::new("Window", format!("±{} days", watch.window_days)));
        }
        details.push(CardField::new("Currency", watch.currency.clone()));

        WatchCard {
            heading: format!("{} → {}", watch.origin, watch.destination),
            details,
            currency: watch.currency.clone(),
            state: WatchCardState::Created,
            price_text: String::new(),
            chart_id: key.chart_id(),
            chart: None,
            stats: None,
            key,
        }
    }

    /// Run one card through a render pass: fetch the price, record it in the
    /// history, and attach the chart. A failed lookup leaves the card in
    /// `PriceFetchFailed`; nothing is retried.
    pub async fn render_watch_card(
        &self,
        providers: &ProviderSet,
        store: &mut dyn KeyValueStore,
        watch: &FlightWatch,
        today: NaiveDate,
    ) -> Result<WatchCard, CoreError> {
        let mut card = self.watch_card(watch);
        card.begin_fetch()?;

        let fetched = match providers.flights() {
            Ok(flights) => self.fare_service.price_watch(flights, watch, today).await,
            Err(e) => Err(e),
        };

        let recorded = fetched.and_then(|price| {
            let history = self.history_service.append(store, &card.key, price)?;
            Ok((price, history))
        });

        match recorded {
            Ok((price, history)) => {
                let chart = self.chart_service.sparkline(&history, &watch.currency);
                card.show_price(watch.pricing_mode(), price, chart, history.min_max())?;
            }
            Err(e) => {
                tracing::error!(watch = %card.key, error = %e, "price fetch failed");
                card.fail()?;
            }
        }

        Ok(card)
    }
}

impl Default for CardService {
    fn default() -> Self {
        Self::new()
    }
}

/// Name, Capital, Population, Region, Currency.
fn country_fields(country: &Country, base: &str, rate: Option<f64>) -> Vec<CardField> {
    vec![
        CardField::new("Name", country.common_name()),
        CardField::new("Capital", country.primary_capital().unwrap_or("N/A")),
        CardField::new("Population", format_population(country.population)),
        CardField::new("Region", country.region.clone()),
        CardField::new("Currency", exchange_text(base, country.primary_currency(), rate)),
    ]
}

/// `1 USD = 0.92 EUR`, or `N/A` without a currency or a rate.
pub fn exchange_text(base: &str, currency: Option<&str>, rate: Option<f64>) -> String {
    match (currency, rate) {
        (Some(code), Some(rate)) => format!("1 {base} = {rate:.2} {code}"),
        _ => "N/A".to_string(),
    }
}

/// Thousands-grouped population, e.g. `67,391,582`.
pub fn format_population(population: u64) -> String {
    let digits = population.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
