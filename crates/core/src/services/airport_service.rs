use crate::errors::CoreError;
use crate::models::airport::Airport;

/// Maximum number of autocomplete suggestions.
pub const MAX_SUGGESTIONS: usize = 8;

/// Airport list backing origin/destination autocomplete.
#[derive(Debug, Clone, Default)]
pub struct AirportCatalog {
    airports: Vec<Airport>,
}

impl AirportCatalog {
    pub fn new(airports: Vec<Airport>) -> Self {
        Self { airports }
    }

    /// Load a `[{"code": "...", "name": "..."}]` document.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let airports: Vec<Airport> = serde_json::from_str(json).map_err(|e| {
            CoreError::Deserialization(format!("Failed to parse airport list: {e}"))
        })?;
        Ok(Self::new(airports))
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Airports whose code starts with, or whose name contains, the query
    /// (case-insensitive), in catalog order, at most `MAX_SUGGESTIONS`.
    pub fn suggest(&self, query: &str) -> Vec<&Airport> {
        let q = query.trim().to_uppercase();
        if q.is_empty() {
            return Vec::new();
        }
        self.airports
            .iter()
            .filter(|a| a.code.to_uppercase().starts_with(&q) || a.name.to_uppercase().contains(&q))
            .take(MAX_SUGGESTIONS)
            .collect()
    }

    /// Exact code lookup (case-insensitive).
    pub fn find(&self, code: &str) -> Option<&Airport> {
        let code = code.trim();
        self.airports.iter().find(|a| a.code.eq_ignore_ascii_case(code))
    }
}
