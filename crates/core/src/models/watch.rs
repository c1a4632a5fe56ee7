use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Prefix of every price-history store key.
pub const HISTORY_KEY_PREFIX: &str = "history-";

/// Largest flexible window; each day in the window costs one fare search.
pub const MAX_WINDOW_DAYS: u32 = 14;

/// A persisted flight-price watch.
///
/// Stored as camelCase JSON with `YYYY-MM-DD` dates so records written by
/// any host remain readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightWatch {
    /// Origin IATA code, uppercased (e.g., "JFK")
    pub origin: String,

    /// Destination IATA code, uppercased (e.g., "LHR")
    pub destination: String,

    pub depart_date: NaiveDate,

    #[serde(default)]
    pub return_date: Option<NaiveDate>,

    /// ± days around `depart_date` to search for the cheapest fare.
    /// `null` (an unparseable form value) reads as 0.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub window_days: u32,

    /// Currency prices are requested in (e.g., "USD")
    pub currency: String,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}

impl FlightWatch {
    /// One-way watch with no flexible window.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        depart_date: NaiveDate,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into().trim().to_uppercase(),
            destination: destination.into().trim().to_uppercase(),
            depart_date,
            return_date: None,
            window_days: 0,
            currency: currency.into().trim().to_uppercase(),
        }
    }

    pub fn with_return(mut self, return_date: NaiveDate) -> Self {
        self.return_date = Some(return_date);
        self
    }

    pub fn with_window(mut self, window_days: u32) -> Self {
        self.window_days = window_days;
        self
    }

    /// The identity tuple of this watch (everything except currency).
    pub fn key(&self) -> WatchKey {
        WatchKey {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            depart_date: self.depart_date,
            return_date: self.return_date,
            window_days: self.window_days,
        }
    }

    /// Which fare lookup this watch needs. A return date wins over a window.
    pub fn pricing_mode(&self) -> PricingMode {
        match (self.return_date, self.window_days) {
            (Some(return_date), _) => PricingMode::RoundTrip { return_date },
            (None, 0) => PricingMode::OneWay,
            (None, window_days) => PricingMode::FlexibleRange { window_days },
        }
    }
}

/// Identity of a watch: `(origin, destination, departDate, returnDate, windowDays)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WatchKey {
    pub origin: String,
    pub destination: String,
    pub depart_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub window_days: u32,
}

impl WatchKey {
    /// Key segments: `ORIG, DEST, date[, rt, date][, wd, N]`.
    ///
    /// Codes are validated letters and dates are fixed-width, so no segment
    /// can contain the `-`/`_` joiners; the `rt`/`wd` tags keep the optional
    /// parts apart.
    fn parts(&self) -> Vec<String> {
        let mut parts = vec![
            self.origin.clone(),
            self.destination.clone(),
            self.depart_date.format("%Y-%m-%d").to_string(),
        ];
        if let Some(return_date) = self.return_date {
            parts.push("rt".into());
            parts.push(return_date.format("%Y-%m-%d").to_string());
        }
        if self.window_days > 0 {
            parts.push("wd".into());
            parts.push(self.window_days.to_string());
        }
        parts
    }

    /// Store key of the price history for this watch,
    /// e.g. `history-JFK-LHR-2025-06-01-wd-3`.
    pub fn history_key(&self) -> String {
        format!("{HISTORY_KEY_PREFIX}{}", self.parts().join("-"))
    }

    /// Element id for the watch's chart, e.g. `chart_JFK_LHR_2025-06-01`.
    pub fn chart_id(&self) -> String {
        format!("chart_{}", self.parts().join("_"))
    }
}

impl std::fmt::Display for WatchKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {} on {}", self.origin, self.destination, self.depart_date)?;
        if let Some(r) = self.return_date {
            write!(f, " returning {r}")?;
        }
        if self.window_days > 0 {
            write!(f, " (±{} days)", self.window_days)?;
        }
        Ok(())
    }
}

/// The three ways a watch is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingMode {
    OneWay,
    RoundTrip { return_date: NaiveDate },
    FlexibleRange { window_days: u32 },
}

/// Result of `WatchService::add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddWatchOutcome {
    Added,
    /// A watch with the same identity is already stored; nothing changed.
    AlreadyExists,
}
