use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::CoreError;
use super::traits::FlightPriceProvider;

const PROVIDER: &str = "Amadeus";

/// Amadeus Flight Offers Search client.
///
/// - **Requires**: OAuth client id + secret (settings keys
///   "amadeus_client_id" / "amadeus_client_secret").
/// - **Flow**: client-credentials token request, then one offers search
///   with `max=1` so only the cheapest offer comes back.
/// - A fresh token is requested for every search; nothing is cached.
pub struct AmadeusProvider {
    client: Client,
    token_url: String,
    offers_url: String,
    client_id: String,
    client_secret: String,
}

impl AmadeusProvider {
    pub fn new(
        token_url: impl Into<String>,
        offers_url: impl Into<String>,
        client_id: String,
        client_secret: String,
    ) -> Self {
        Self {
            client: super::http_client(),
            token_url: token_url.into(),
            offers_url: offers_url.into(),
            client_id,
            client_secret,
        }
    }

    /// Request a bearer token. Every failure maps to `AuthError`.
    async fn access_token(&self) -> Result<String, CoreError> {
        let resp = self
            .client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| CoreError::AuthError(CoreError::from(e).to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "Amadeus token request rejected");
            return Err(CoreError::AuthError(format!(
                "token endpoint returned status {}",
                status.as_u16()
            )));
        }

        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| CoreError::AuthError(format!("malformed token response: {e}")))?;

        if token.access_token.is_empty() {
            return Err(CoreError::AuthError("empty access token".into()));
        }
        Ok(token.access_token)
    }

    async fn search(&self, query: &OfferQuery<'_>) -> Result<f64, CoreError> {
        let token = self.access_token().await?;

        let depart = query.depart_date.format("%Y-%m-%d").to_string();
        let mut params: Vec<(&str, String)> = vec![
            ("originLocationCode", query.origin.to_uppercase()),
            ("destinationLocationCode", query.destination.to_uppercase()),
            ("departureDate", depart.clone()),
        ];
        if let Some(return_date) = query.return_date {
            params.push(("returnDate", return_date.format("%Y-%m-%d").to_string()));
        }
        params.push(("adults", "1".to_string()));
        params.push(("currencyCode", query.currency.to_uppercase()));
        params.push(("max", "1".to_string()));

        tracing::debug!(
            origin = query.origin,
            destination = query.destination,
            date = %depart,
            round_trip = query.return_date.is_some(),
            "searching flight offers"
        );

        let resp = self
            .client
            .get(&self.offers_url)
            .bearer_auth(&token)
            .query(&params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "Amadeus offers search failed");
            return Err(CoreError::service(
                PROVIDER,
                status.as_u16(),
                "Error fetching flight price",
            ));
        }

        let body = resp.text().await?;
        parse_cheapest_offer(&body, query.origin, query.destination, depart)
    }
}

struct OfferQuery<'a> {
    origin: &'a str,
    destination: &'a str,
    depart_date: NaiveDate,
    return_date: Option<NaiveDate>,
    currency: &'a str,
}

// ── Amadeus API response types ──────────────────────────────────────

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: String,
}

#[derive(Deserialize)]
struct OffersResponse {
    #[serde(default)]
    data: Vec<FlightOffer>,
}

#[derive(Deserialize)]
struct FlightOffer {
    price: OfferPrice,
}

#[derive(Deserialize)]
struct OfferPrice {
    /// Decimal string, e.g. "345.23"
    total: String,
}

/// Price of the first offer in an offers-search body.
///
/// Empty `data` → `NoOffers`; an unparseable total → `ServiceError`.
pub fn parse_cheapest_offer(
    body: &str,
    origin: &str,
    destination: &str,
    date: impl Into<String>,
) -> Result<f64, CoreError> {
    let resp: OffersResponse = serde_json::from_str(body).map_err(|e| {
        CoreError::Deserialization(format!("Failed to parse flight offers: {e}"))
    })?;

    let offer = resp.data.first().ok_or_else(|| CoreError::NoOffers {
        origin: origin.to_uppercase(),
        destination: destination.to_uppercase(),
        date: date.into(),
    })?;

    offer.price.total.trim().parse::<f64>().map_err(|e| {
        CoreError::service(
            PROVIDER,
            200,
            format!("Invalid price format '{}': {e}", offer.price.total),
        )
    })
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl FlightPriceProvider for AmadeusProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn get_cheapest_price(
        &self,
        origin: &str,
        destination: &str,
        date: NaiveDate,
        currency: &str,
    ) -> Result<f64, CoreError> {
        self.search(&OfferQuery {
            origin,
            destination,
            depart_date: date,
            return_date: None,
            currency,
        })
        .await
    }

    async fn get_round_trip_price(
        &self,
        origin: &str,
        destination: &str,
        depart_date: NaiveDate,
        return_date: NaiveDate,
        currency: &str,
    ) -> Result<f64, CoreError> {
        self.search(&OfferQuery {
            origin,
            destination,
            depart_date,
            return_date: Some(return_date),
            currency,
        })
        .await
    }
}
