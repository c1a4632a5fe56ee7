use async_trait::async_trait;
use reqwest::Client;

use crate::errors::CoreError;
use crate::models::country::Country;
use super::traits::CountryProvider;

const PROVIDER: &str = "REST Countries";

/// Fields requested from the bulk listing (the full records are large).
const LIST_FIELDS: &str = "name,capital,population,region,currencies,flags,latlng";

/// REST Countries v3.1 client.
///
/// - **Free**: No API key required.
/// - **Endpoints**: `/name/{name}?fullText=true`, `/all?fields=...`
/// - Both endpoints return JSON arrays of country objects.
pub struct RestCountriesProvider {
    client: Client,
    base_url: String,
}

impl RestCountriesProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: super::http_client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

/// Take the first record of a `/name` response body.
pub fn parse_country_lookup(body: &str, name: &str) -> Result<Country, CoreError> {
    let countries: Vec<Country> = serde_json::from_str(body).map_err(|e| {
        CoreError::Deserialization(format!("Failed to parse country data for {name}: {e}"))
    })?;
    countries
        .into_iter()
        .next()
        .ok_or_else(|| CoreError::NotFound(name.to_string()))
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl CountryProvider for RestCountriesProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn find_by_name(&self, name: &str) -> Result<Country, CoreError> {
        let url = super::endpoint_url(&self.base_url, &["name", name])?;
        tracing::debug!(country = name, "looking up country");

        let resp = self
            .client
            .get(url)
            .query(&[("fullText", "true")])
            .send()
            .await?;

        if !resp.status().is_success() {
            tracing::debug!(country = name, status = resp.status().as_u16(), "country lookup miss");
            return Err(CoreError::NotFound(name.to_string()));
        }

        let body = resp.text().await?;
        parse_country_lookup(&body, name)
    }

    async fn list_all(&self) -> Result<Vec<Country>, CoreError> {
        let url = super::endpoint_url(&self.base_url, &["all"])?;

        let resp = self
            .client
            .get(url)
            .query(&[("fields", LIST_FIELDS)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::service(
                PROVIDER,
                status.as_u16(),
                "Error fetching country list",
            ));
        }

        resp.json().await.map_err(|e| {
            CoreError::Deserialization(format!("Failed to parse country list: {e}"))
        })
    }
}
