use serde::{Deserialize, Serialize};

/// A minimal line chart of a watch's price history.
///
/// The core computes everything; the host charting layer only draws it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sparkline {
    /// X-axis labels, 1-based position of each observation
    pub labels: Vec<usize>,

    /// Observed prices, oldest first
    pub values: Vec<f64>,

    /// Currency used in tooltip labels (uppercased)
    pub currency: String,

    pub style: SparklineStyle,
}

/// Presentation options handed to the charting collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparklineStyle {
    pub border_color: String,
    pub background_color: String,
    pub fill: bool,
    /// Bezier curve tension of the line
    pub tension: f64,
    /// 0 hides the per-point markers
    pub point_radius: f64,
    pub show_legend: bool,
    pub show_axes: bool,
}

impl Default for SparklineStyle {
    fn default() -> Self {
        Self {
            border_color: "#4B34D1".to_string(),
            background_color: "rgba(75, 52, 209, 0.2)".to_string(),
            fill: true,
            tension: 0.3,
            point_radius: 0.0,
            show_legend: false,
            show_axes: false,
        }
    }
}

impl Sparkline {
    /// Tooltip text for a point, e.g. `345.23 USD`.
    pub fn tooltip_label(&self, value: f64) -> String {
        format!("{value:.2} {}", self.currency)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
