use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// API key name for ExchangeRate-API.
pub const EXCHANGE_RATE_KEY: &str = "exchangerate_api";
/// API key name for the Amadeus OAuth client id.
pub const AMADEUS_CLIENT_ID_KEY: &str = "amadeus_client_id";
/// API key name for the Amadeus OAuth client secret.
pub const AMADEUS_CLIENT_SECRET_KEY: &str = "amadeus_client_secret";

/// User-configurable settings supplied by the host at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base currency for exchange-rate display and new watches (e.g., "USD").
    pub default_currency: String,

    /// API credentials keyed by provider name
    /// (`exchangerate_api`, `amadeus_client_id`, `amadeus_client_secret`).
    pub api_keys: HashMap<String, String>,

    /// Upstream endpoints; defaults point at the public services.
    #[serde(default)]
    pub endpoints: Endpoints,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_currency: "USD".to_string(),
            api_keys: HashMap::new(),
            endpoints: Endpoints::default(),
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document (missing endpoints fall back to defaults).
    pub fn from_json(json: &str) -> Result<Self, crate::errors::CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn api_key(&self, provider: &str) -> Option<&str> {
        self.api_keys.get(provider).map(String::as_str)
    }
}

/// Base URLs of every upstream service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub countries: String,
    pub exchange_rates: String,
    pub summaries: String,
    pub static_maps: String,
    pub amadeus_token: String,
    pub amadeus_offers: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            countries: "https://restcountries.com/v3.1".to_string(),
            exchange_rates: "https://v6.exchangerate-api.com/v6".to_string(),
            summaries: "https://en.wikipedia.org/api/rest_v1".to_string(),
            static_maps: "https://staticmap.openstreetmap.de/staticmap.php".to_string(),
            amadeus_token: "https://test.api.amadeus.com/v1/security/oauth2/token".to_string(),
            amadeus_offers: "https://test.api.amadeus.com/v2/shopping/flight-offers".to_string(),
        }
    }
}
