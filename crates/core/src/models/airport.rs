use serde::{Deserialize, Serialize};

/// An airport entry used for origin/destination autocomplete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    /// IATA code (e.g., "JFK")
    pub code: String,
    pub name: String,
}

impl Airport {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// Suggestion label, e.g. `JFK — John F Kennedy International Airport`.
    pub fn label(&self) -> String {
        format!("{} — {}", self.code, self.name)
    }
}
