use crate::models::chart::{Sparkline, SparklineStyle};
use crate::models::history::PriceHistory;

/// Turns price histories into sparkline descriptions.
///
/// The host's charting layer draws the `Sparkline`; `svg_path` is there
/// for hosts without one.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Sparkline for a history, labelled 1..=n, tooltips in `currency`.
    pub fn sparkline(&self, history: &PriceHistory, currency: &str) -> Sparkline {
        let values = history.prices().to_vec();
        Sparkline {
            labels: (1..=values.len()).collect(),
            values,
            currency: currency.to_uppercase(),
            style: SparklineStyle::default(),
        }
    }

    /// SVG path data (`M x y L x y ...`) fitting the series into a
    /// `width` × `height` box, higher prices nearer the top.
    ///
    /// A constant series is drawn at mid-height; a single point as a
    /// horizontal line across the box; no points as an empty path.
    pub fn svg_path(&self, sparkline: &Sparkline, width: f64, height: f64) -> String {
        let values = &sparkline.values;
        if values.is_empty() {
            return String::new();
        }
        if values.len() == 1 {
            let y = height / 2.0;
            return format!("M 0.00 {y:.2} L {width:.2} {y:.2}");
        }

        let (lo, hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let span = hi - lo;
        let step = width / (values.len() - 1) as f64;

        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let x = step * i as f64;
                let y = if span > f64::EPSILON {
                    height - (v - lo) / span * height
                } else {
                    height / 2.0
                };
                let cmd = if i == 0 { 'M' } else { 'L' };
                format!("{cmd} {x:.2} {y:.2}")
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
