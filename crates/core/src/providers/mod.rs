pub mod registry;
pub mod traits;

// API client implementations
pub mod amadeus;
pub mod exchange_rate;
pub mod rest_countries;
pub mod static_map;
pub mod wikipedia;

use reqwest::{Client, Url};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

/// Shared HTTP client construction: 30 s timeout on native targets,
/// browser defaults on WASM.
pub(crate) fn http_client() -> Client {
    let builder = Client::builder();
    #[cfg(not(target_arch = "wasm32"))]
    let builder = builder.timeout(Duration::from_secs(30));
    builder.build().unwrap_or_else(|_| Client::new())
}

/// Append path segments (percent-encoded) to an endpoint base URL.
pub(crate) fn endpoint_url(base: &str, segments: &[&str]) -> Result<Url, crate::errors::CoreError> {
    let mut url = Url::parse(base).map_err(|e| {
        crate::errors::CoreError::ValidationError(format!("Invalid endpoint URL {base}: {e}"))
    })?;
    url.path_segments_mut()
        .map_err(|_| {
            crate::errors::CoreError::ValidationError(format!("Endpoint URL cannot take a path: {base}"))
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Uniform index in `0..len` from OS randomness.
///
/// Rejection-samples so every index is equally likely. `len` must be > 0.
pub(crate) fn random_index(len: usize) -> Result<usize, crate::errors::CoreError> {
    let len = len as u64;
    let zone = u64::MAX - (u64::MAX % len);
    loop {
        let mut buf = [0u8; 8];
        getrandom::getrandom(&mut buf).map_err(|e| {
            crate::errors::CoreError::ValidationError(format!("Random source unavailable: {e}"))
        })?;
        let value = u64::from_le_bytes(buf);
        if value < zone {
            return Ok((value % len) as usize);
        }
    }
}
