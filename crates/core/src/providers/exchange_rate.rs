use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;

use crate::errors::CoreError;
use super::traits::ExchangeRateProvider;

const PROVIDER: &str = "ExchangeRate-API";

/// ExchangeRate-API v6 client.
///
/// - **Requires**: API key (set via settings as "exchangerate_api").
/// - **Endpoint**: `/{key}/latest/{base}` returns every rate against `base`.
/// - One call per lookup; the whole table is fetched and one entry read.
pub struct ExchangeRateApiProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: impl Into<String>, api_key: String) -> Self {
        Self {
            client: super::http_client(),
            base_url: base_url.into(),
            api_key,
        }
    }
}

// ── ExchangeRate-API response types ─────────────────────────────────

#[derive(Deserialize)]
struct LatestResponse {
    #[serde(default)]
    conversion_rates: Option<HashMap<String, f64>>,
}

/// Read the rate for `currency_code` out of a `/latest` response body.
///
/// A missing table, a missing code, or a non-positive rate are all
/// `InvalidRate`.
pub fn parse_rate(body: &str, currency_code: &str) -> Result<f64, CoreError> {
    let resp: LatestResponse = serde_json::from_str(body).map_err(|e| {
        CoreError::Deserialization(format!("Failed to parse exchange rates: {e}"))
    })?;

    let code = currency_code.trim().to_uppercase();
    resp.conversion_rates
        .and_then(|rates| rates.get(&code).copied())
        .filter(|rate| rate.is_finite() && *rate > 0.0)
        .ok_or(CoreError::InvalidRate(code))
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ExchangeRateProvider for ExchangeRateApiProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn get_rate(&self, currency_code: &str, base: &str) -> Result<f64, CoreError> {
        let base = base.trim().to_uppercase();
        let url = super::endpoint_url(&self.base_url, &[&self.api_key, "latest", &base])?;

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::service(
                PROVIDER,
                status.as_u16(),
                format!("Error fetching exchange rates for base {base}"),
            ));
        }

        let body = resp.text().await?;
        parse_rate(&body, currency_code)
    }
}
