use serde::{Deserialize, Serialize};

/// Maximum number of observations kept per watch.
pub const MAX_HISTORY_LEN: usize = 10;

/// Recent price observations for one watch, oldest first.
///
/// Serialized as a bare JSON array of numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceHistory {
    prices: Vec<f64>,
}

impl PriceHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw observations, keeping only the most recent `MAX_HISTORY_LEN`.
    pub fn from_prices(prices: Vec<f64>) -> Self {
        let mut history = Self { prices };
        history.truncate_oldest();
        history
    }

    /// Append an observation, dropping the oldest once the cap is exceeded.
    pub fn push(&mut self, price: f64) {
        self.prices.push(price);
        self.truncate_oldest();
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn into_prices(self) -> Vec<f64> {
        self.prices
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn latest(&self) -> Option<f64> {
        self.prices.last().copied()
    }

    /// `(low, high)` over the stored observations.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let first = *self.prices.first()?;
        Some(
            self.prices
                .iter()
                .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p))),
        )
    }

    fn truncate_oldest(&mut self) {
        if self.prices.len() > MAX_HISTORY_LEN {
            let excess = self.prices.len() - MAX_HISTORY_LEN;
            self.prices.drain(..excess);
        }
    }
}
