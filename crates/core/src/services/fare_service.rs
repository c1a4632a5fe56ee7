use chrono::{Duration, NaiveDate};

use crate::errors::CoreError;
use crate::models::watch::{FlightWatch, PricingMode, MAX_WINDOW_DAYS};
use crate::providers::traits::FlightPriceProvider;

/// Prices a watch according to its pricing mode.
///
/// - **One-way**: a single cheapest-offer search.
/// - **Round-trip**: a single search with a return date.
/// - **Flexible range**: one one-way search per date in
///   `[depart − N, depart + N]` (dates before today skipped), sequentially;
///   the cheapest successful result wins.
pub struct FareService;

impl FareService {
    pub fn new() -> Self {
        Self
    }

    pub async fn price_watch(
        &self,
        flights: &dyn FlightPriceProvider,
        watch: &FlightWatch,
        today: NaiveDate,
    ) -> Result<f64, CoreError> {
        let price = match watch.pricing_mode() {
            PricingMode::OneWay => {
                flights
                    .get_cheapest_price(
                        &watch.origin,
                        &watch.destination,
                        watch.depart_date,
                        &watch.currency,
                    )
                    .await?
            }
            PricingMode::RoundTrip { return_date } => {
                flights
                    .get_round_trip_price(
                        &watch.origin,
                        &watch.destination,
                        watch.depart_date,
                        return_date,
                        &watch.currency,
                    )
                    .await?
            }
            PricingMode::FlexibleRange { window_days } => {
                self.cheapest_in_range(flights, watch, window_days, today)
                    .await?
            }
        };

        if !price.is_finite() || price < 0.0 {
            return Err(CoreError::service(
                flights.name(),
                200,
                format!("Invalid price returned for {}: {price}", watch.key()),
            ));
        }
        Ok(price)
    }

    /// Cheapest one-way fare across the window around the departure date.
    pub async fn cheapest_in_range(
        &self,
        flights: &dyn FlightPriceProvider,
        watch: &FlightWatch,
        window_days: u32,
        today: NaiveDate,
    ) -> Result<f64, CoreError> {
        let window = Duration::days(i64::from(window_days.min(MAX_WINDOW_DAYS)));
        let first = watch.depart_date - window;
        let last = watch.depart_date + window;

        let mut cheapest: Option<f64> = None;
        let mut last_error = None;
        let mut date = first.max(today);

        while date <= last {
            match flights
                .get_cheapest_price(&watch.origin, &watch.destination, date, &watch.currency)
                .await
            {
                Ok(price) => {
                    cheapest = Some(cheapest.map_or(price, |c: f64| c.min(price)));
                }
                Err(e) => {
                    tracing::debug!(date = %date, error = %e, "no fare for date in window");
                    last_error = Some(e);
                }
            }
            date = match date.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        match (cheapest, last_error) {
            (Some(price), _) => Ok(price),
            (None, Some(e)) => Err(e),
            (None, None) => Err(CoreError::NoOffers {
                origin: watch.origin.clone(),
                destination: watch.destination.clone(),
                date: format!("{first}..{last}"),
            }),
        }
    }
}

impl Default for FareService {
    fn default() -> Self {
        Self::new()
    }
}
