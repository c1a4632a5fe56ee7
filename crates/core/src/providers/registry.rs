use crate::errors::CoreError;
use crate::models::settings::{
    Settings, AMADEUS_CLIENT_ID_KEY, AMADEUS_CLIENT_SECRET_KEY, EXCHANGE_RATE_KEY,
};

use super::amadeus::AmadeusProvider;
use super::exchange_rate::ExchangeRateApiProvider;
use super::rest_countries::RestCountriesProvider;
use super::traits::{CountryProvider, ExchangeRateProvider, FlightPriceProvider, SummaryProvider};
use super::wikipedia::WikipediaProvider;

/// One client per external service.
///
/// Services that need credentials (exchange rates, flight prices) are only
/// present when their keys are configured. Any client can be swapped for
/// another implementation (e.g. a mock in tests).
pub struct ProviderSet {
    countries: Box<dyn CountryProvider>,
    summaries: Box<dyn SummaryProvider>,
    rates: Option<Box<dyn ExchangeRateProvider>>,
    flights: Option<Box<dyn FlightPriceProvider>>,
}

impl ProviderSet {
    /// Country and summary clients only.
    pub fn new(countries: Box<dyn CountryProvider>, summaries: Box<dyn SummaryProvider>) -> Self {
        Self {
            countries,
            summaries,
            rates: None,
            flights: None,
        }
    }

    /// Build the default clients from settings.
    pub fn new_with_defaults(settings: &Settings) -> Self {
        let endpoints = &settings.endpoints;

        // REST Countries + Wikipedia: no API key needed
        let mut set = Self::new(
            Box::new(RestCountriesProvider::new(endpoints.countries.clone())),
            Box::new(WikipediaProvider::new(endpoints.summaries.clone())),
        );

        // ExchangeRate-API: requires API key
        if let Some(key) = settings.api_key(EXCHANGE_RATE_KEY) {
            set.rates = Some(Box::new(ExchangeRateApiProvider::new(
                endpoints.exchange_rates.clone(),
                key.to_string(),
            )));
        }

        // Amadeus: requires client id + secret
        if let (Some(id), Some(secret)) = (
            settings.api_key(AMADEUS_CLIENT_ID_KEY),
            settings.api_key(AMADEUS_CLIENT_SECRET_KEY),
        ) {
            set.flights = Some(Box::new(AmadeusProvider::new(
                endpoints.amadeus_token.clone(),
                endpoints.amadeus_offers.clone(),
                id.to_string(),
                secret.to_string(),
            )));
        }

        set
    }

    pub fn with_rates(mut self, rates: Box<dyn ExchangeRateProvider>) -> Self {
        self.rates = Some(rates);
        self
    }

    pub fn with_flights(mut self, flights: Box<dyn FlightPriceProvider>) -> Self {
        self.flights = Some(flights);
        self
    }

    pub fn countries(&self) -> &dyn CountryProvider {
        self.countries.as_ref()
    }

    pub fn summaries(&self) -> &dyn SummaryProvider {
        self.summaries.as_ref()
    }

    /// Exchange-rate client, `NoProvider` when no API key is configured.
    pub fn rates(&self) -> Result<&dyn ExchangeRateProvider, CoreError> {
        self.rates
            .as_deref()
            .ok_or_else(|| CoreError::NoProvider("exchange rates".into()))
    }

    /// Flight-price client, `NoProvider` when no credentials are configured.
    pub fn flights(&self) -> Result<&dyn FlightPriceProvider, CoreError> {
        self.flights
            .as_deref()
            .ok_or_else(|| CoreError::NoProvider("flight prices".into()))
    }

    pub fn has_rates(&self) -> bool {
        self.rates.is_some()
    }

    pub fn has_flights(&self) -> bool {
        self.flights.is_some()
    }

    /// Names of all configured clients, for diagnostics.
    pub fn provider_names(&self) -> Vec<String> {
        let mut names = vec![
            self.countries.name().to_string(),
            self.summaries.name().to_string(),
        ];
        if let Some(rates) = &self.rates {
            names.push(rates.name().to_string());
        }
        if let Some(flights) = &self.flights {
            names.push(flights.name().to_string());
        }
        names
    }
}
