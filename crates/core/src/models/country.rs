use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Country names as reported by the country service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountryName {
    /// Short everyday name (e.g., "France"). Identity key of a `Country`.
    pub common: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official: Option<String>,

    /// `nativeName` and anything else the service adds.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Flag image references.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Flags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub png: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrencyInfo {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

/// A country record as fetched from the country service.
///
/// **Equality and hashing** are based solely on `name.common`
/// (case-sensitive), which is how the wishlist deduplicates entries.
/// Fields this crate does not read are kept in `extra` (here and in the
/// nested name and flag records) so a stored record round-trips unchanged.
/// Empty collections are omitted on write, matching an absent field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    pub name: CountryName,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capital: Vec<String>,

    #[serde(default)]
    pub population: u64,

    #[serde(default)]
    pub region: String,

    /// Currency code → details. Ordered so "the" currency is deterministic.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub currencies: BTreeMap<String, CurrencyInfo>,

    #[serde(default)]
    pub flags: Flags,

    /// `[latitude, longitude]`, may be empty for some territories.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub latlng: Vec<f64>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PartialEq for Country {
    fn eq(&self, other: &Self) -> bool {
        self.name.common == other.name.common
    }
}

impl Eq for Country {}

impl std::hash::Hash for Country {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.common.hash(state);
    }
}

impl Country {
    /// Minimal constructor, mostly for hosts building records by hand.
    pub fn new(common_name: impl Into<String>) -> Self {
        Self {
            name: CountryName {
                common: common_name.into(),
                official: None,
                extra: serde_json::Map::new(),
            },
            capital: Vec::new(),
            population: 0,
            region: String::new(),
            currencies: BTreeMap::new(),
            flags: Flags::default(),
            latlng: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    pub fn common_name(&self) -> &str {
        &self.name.common
    }

    /// First listed capital, if any.
    pub fn primary_capital(&self) -> Option<&str> {
        self.capital.first().map(String::as_str)
    }

    /// The currency code used for exchange-rate display.
    pub fn primary_currency(&self) -> Option<&str> {
        self.currencies.keys().next().map(String::as_str)
    }

    /// SVG flag if available, PNG otherwise.
    pub fn flag_url(&self) -> Option<&str> {
        self.flags.svg.as_deref().or(self.flags.png.as_deref())
    }

    /// `(lat, lng)` when the record carries a full coordinate pair.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match self.latlng.as_slice() {
            [lat, lng, ..] => Some((*lat, *lng)),
            _ => None,
        }
    }
}
