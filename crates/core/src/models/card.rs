use serde::{Deserialize, Serialize};

use super::chart::Sparkline;
use super::watch::{PricingMode, WatchKey};
use crate::errors::CoreError;

/// Text shown when a watch price lookup fails.
pub const PRICE_ERROR_TEXT: &str = "Error fetching price";
/// Placeholder shown while a price is being fetched.
pub const PRICE_PENDING_TEXT: &str = "Fetching price…";

/// A `Label: value` line on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardField {
    pub label: String,
    pub value: String,
}

impl CardField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl std::fmt::Display for CardField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// Which page a country card is shown on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardContext {
    /// Search / random-lookup page: full-width add/remove toggle
    Search,
    /// Wishlist page: compact "×" remove control
    Wishlist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WishlistAction {
    Add,
    Remove,
}

/// The wishlist control on a country card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistToggle {
    /// What clicking the control does
    pub action: WishlistAction,
    /// Visible text
    pub label: String,
    /// Tooltip / accessible label
    pub title: String,
    /// True for the small "×" variant on the wishlist page
    pub compact: bool,
}

impl WishlistToggle {
    /// Control for a country whose membership is `in_wishlist`.
    pub fn for_membership(in_wishlist: bool, context: CardContext) -> Self {
        match (in_wishlist, context) {
            (true, CardContext::Wishlist) => Self {
                action: WishlistAction::Remove,
                label: "×".to_string(),
                title: "Remove from Wishlist".to_string(),
                compact: true,
            },
            (true, CardContext::Search) => Self {
                action: WishlistAction::Remove,
                label: "Remove from Wishlist".to_string(),
                title: "Remove from Wishlist".to_string(),
                compact: false,
            },
            (false, _) => Self {
                action: WishlistAction::Add,
                label: "Add to Wishlist".to_string(),
                title: "Add to Wishlist".to_string(),
                compact: false,
            },
        }
    }
}

/// Everything a host needs to paint one country card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryCard {
    pub country_name: String,
    pub flag_url: Option<String>,
    pub flag_alt: String,
    /// Name, Capital, Population, Region, Currency, in that order
    pub fields: Vec<CardField>,
    /// One-sentence encyclopedic summary, absent when unavailable
    pub summary: Option<String>,
    pub map_url: Option<String>,
    pub context: CardContext,
    pub toggle: WishlistToggle,
}

/// Lifecycle of a watch card within one render pass.
///
/// `Created → PriceFetching → {PriceDisplayed, PriceFetchFailed}`;
/// `PriceDisplayed → Removed` by explicit user action only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WatchCardState {
    Created,
    PriceFetching,
    PriceDisplayed,
    PriceFetchFailed,
    Removed,
}

/// Everything a host needs to paint one flight-watch card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchCard {
    pub key: WatchKey,
    /// e.g. `JFK → LHR`
    pub heading: String,
    /// Depart, Return (if any), Window (if > 0), Currency
    pub details: Vec<CardField>,
    pub currency: String,
    pub state: WatchCardState,
    pub price_text: String,
    pub chart_id: String,
    pub chart: Option<Sparkline>,
    /// e.g. `Low: 300.00, High: 345.23`
    pub stats: Option<String>,
}

impl WatchCard {
    /// Move to `PriceFetching`. Only valid from `Created`.
    pub fn begin_fetch(&mut self) -> Result<(), CoreError> {
        self.transition(WatchCardState::Created, WatchCardState::PriceFetching)?;
        self.price_text = PRICE_PENDING_TEXT.to_string();
        Ok(())
    }

    /// Show a fetched price along with the updated chart and stats.
    pub fn show_price(
        &mut self,
        mode: PricingMode,
        price: f64,
        chart: Sparkline,
        low_high: Option<(f64, f64)>,
    ) -> Result<(), CoreError> {
        self.transition(WatchCardState::PriceFetching, WatchCardState::PriceDisplayed)?;
        self.price_text = price_line(mode, price, &self.currency);
        self.chart = Some(chart);
        self.stats = low_high.map(|(lo, hi)| format!("Low: {lo:.2}, High: {hi:.2}"));
        Ok(())
    }

    /// Record a failed lookup. Terminal for this render pass.
    pub fn fail(&mut self) -> Result<(), CoreError> {
        self.transition(WatchCardState::PriceFetching, WatchCardState::PriceFetchFailed)?;
        self.price_text = PRICE_ERROR_TEXT.to_string();
        Ok(())
    }

    /// Mark the card removed. Only a displayed card can be removed.
    pub fn mark_removed(&mut self) -> Result<(), CoreError> {
        self.transition(WatchCardState::PriceDisplayed, WatchCardState::Removed)
    }

    fn transition(&mut self, from: WatchCardState, to: WatchCardState) -> Result<(), CoreError> {
        if self.state != from {
            return Err(CoreError::ValidationError(format!(
                "Watch card {} cannot move from {:?} to {:?}",
                self.key, self.state, to
            )));
        }
        self.state = to;
        Ok(())
    }
}

/// Price line text for a pricing mode, e.g. `Cheapest ±3d: 289.10 USD`.
pub fn price_line(mode: PricingMode, price: f64, currency: &str) -> String {
    match mode {
        PricingMode::OneWay => format!("One-way: {price:.2} {currency}"),
        PricingMode::RoundTrip { .. } => format!("Round-trip: {price:.2} {currency}"),
        PricingMode::FlexibleRange { window_days } => {
            format!("Cheapest ±{window_days}d: {price:.2} {currency}")
        }
    }
}
