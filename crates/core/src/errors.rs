use thiserror::Error;

/// Unified error type for the entire travel-explorer-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── External services ───────────────────────────────────────────
    #[error("Country not found: {0}")]
    NotFound(String),

    #[error("Service error ({service}, status {status}): {message}")]
    ServiceError {
        service: String,
        status: u16,
        message: String,
    },

    #[error("Invalid currency code or missing rate: {0}")]
    InvalidRate(String),

    #[error("Unable to retrieve access token: {0}")]
    AuthError(String),

    #[error("No flight offers found for {origin} → {destination} on {date}")]
    NoOffers {
        origin: String,
        destination: String,
        date: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("No provider configured for {0}")]
    NoProvider(String),

    // ── Store ───────────────────────────────────────────────────────
    #[error("Invalid store format: {0}")]
    InvalidStoreFormat(String),

    #[error("Unsupported store version: {0}")]
    UnsupportedVersion(u16),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl CoreError {
    /// Shorthand for a non-success upstream status.
    pub fn service(service: &str, status: u16, message: impl Into<String>) -> Self {
        CoreError::ServiceError {
            service: service.to_string(),
            status,
            message: message.into(),
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Storage(e.to_string())
    }
}

impl From<bincode::Error> for CoreError {
    fn from(e: bincode::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // The exchange-rate key travels in the path and the Amadeus secrets in
        // query/form data; never let either reach an error message.
        let msg = e.to_string();
        let sanitized = match msg.find("https://").or_else(|| msg.find("http://")) {
            Some(idx) => format!("{}<url redacted>)", &msg[..idx]),
            None => msg,
        };
        CoreError::Network(sanitized)
    }
}
