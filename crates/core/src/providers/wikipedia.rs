use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::traits::SummaryProvider;

const PROVIDER: &str = "Wikipedia";

/// Wikipedia REST summary client (`/page/summary/{title}`).
///
/// Soft-fails: every error path yields an empty string and a `warn` event.
pub struct WikipediaProvider {
    client: Client,
    base_url: String,
}

impl WikipediaProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: super::http_client(),
            base_url: base_url.into(),
        }
    }

    async fn fetch_extract(&self, subject: &str) -> Result<String, String> {
        let url = super::endpoint_url(&self.base_url, &["page", "summary", subject])
            .map_err(|e| e.to_string())?;

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| crate::errors::CoreError::from(e).to_string())?;

        let status = resp.status();
        if !status.is_success() {
            return Err(format!("status {}", status.as_u16()));
        }

        let summary: SummaryResponse = resp.json().await.map_err(|e| e.to_string())?;
        Ok(summary.extract.unwrap_or_default())
    }
}

#[derive(Deserialize)]
struct SummaryResponse {
    extract: Option<String>,
}

/// First sentence of an extract: up to and including the first `". "`,
/// or the whole (trimmed) text when there is no sentence break.
pub fn first_sentence(extract: &str) -> String {
    let text = extract.trim();
    match text.find(". ") {
        Some(idx) => text[..=idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl SummaryProvider for WikipediaProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn get_summary(&self, subject: &str) -> String {
        match self.fetch_extract(subject).await {
            Ok(extract) => first_sentence(&extract),
            Err(reason) => {
                tracing::warn!(subject, %reason, "summary unavailable, continuing without it");
                String::new()
            }
        }
    }
}
