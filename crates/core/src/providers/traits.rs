use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::country::Country;

/// Country metadata lookups.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait CountryProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Look up a country by its exact full name.
    /// Fails with `NotFound` when the upstream reports a miss.
    async fn find_by_name(&self, name: &str) -> Result<Country, CoreError>;

    /// Every known country. Fails with `ServiceError` on a non-success status.
    async fn list_all(&self) -> Result<Vec<Country>, CoreError>;

    /// A country drawn uniformly from `list_all()`.
    async fn random(&self) -> Result<Country, CoreError> {
        let mut countries = self.list_all().await?;
        if countries.is_empty() {
            return Err(CoreError::service(self.name(), 200, "Country list is empty"));
        }
        let idx = super::random_index(countries.len())?;
        Ok(countries.swap_remove(idx))
    }
}

/// Currency exchange rates.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ExchangeRateProvider: Send + Sync {
    fn name(&self) -> &str;

    /// How many units of `currency_code` one unit of `base` buys.
    /// Fails with `InvalidRate` if the rate table lacks `currency_code`.
    async fn get_rate(&self, currency_code: &str, base: &str) -> Result<f64, CoreError>;
}

/// Short encyclopedic summaries.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait SummaryProvider: Send + Sync {
    fn name(&self) -> &str;

    /// First sentence of the subject's summary, or `""` on any failure.
    /// The summary is decorative, so failures are never surfaced.
    async fn get_summary(&self, subject: &str) -> String;
}

/// Flight fare lookups.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait FlightPriceProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Cheapest one-way fare for one adult.
    async fn get_cheapest_price(
        &self,
        origin: &str,
        destination: &str,
        date: NaiveDate,
        currency: &str,
    ) -> Result<f64, CoreError>;

    /// Cheapest round-trip fare for one adult.
    async fn get_round_trip_price(
        &self,
        origin: &str,
        destination: &str,
        depart_date: NaiveDate,
        return_date: NaiveDate,
        currency: &str,
    ) -> Result<f64, CoreError>;
}
