//! Semicircular risk gauge view model
//!
//! Needle geometry is linear in the score and independent of the band
//! thresholds; only colors follow the classifier.

use serde::Serialize;

use crate::risk::classify;
use crate::types::thresholds::{band_colors, hydrate_thresholds};

/// Fixed legend rendered under the gauge.
pub const LEGEND: [&str; 3] = ["Low (0-40)", "Medium (40-70)", "High (70+)"];

/// One colored arc segment of the gauge dial.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct GaugeZone {
    pub from: f64,
    pub to: f64,
    pub color: &'static str,
}

/// The rendered gauge: needle position, value label, and fixed dial zones.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GaugeView {
    /// Effective score (absent rendered as 0)
    pub score: f64,
    /// Score formatted to 2 decimals with the percent sign
    pub value: String,
    /// Needle rotation in degrees: -90 at score 0, +90 at score 100
    pub needle_angle: f64,
    /// Needle color, from the classifier's band
    pub needle_color: &'static str,
    /// `"{band} Risk"` headline
    pub headline: String,
    pub zones: [GaugeZone; 3],
    pub legend: [&'static str; 3],
}

/// Maps a 0-100 score onto the semicircle: `-90 + (score / 100) * 180`.
pub fn needle_angle(score: f64) -> f64 {
    -90.0 + (score * 180.0) / 100.0
}

/// Builds the gauge view for a (possibly absent) risk score.
pub fn build(score: Option<f64>) -> GaugeView {
    let risk = classify(score);
    GaugeView {
        score: risk.score,
        value: format!("{:.2}%", risk.score),
        needle_angle: needle_angle(risk.score),
        needle_color: risk.color,
        headline: format!("{} Risk", risk.label),
        zones: dial_zones(),
        legend: LEGEND,
    }
}

/// The three fixed dial zones, built from the central threshold constants.
fn dial_zones() -> [GaugeZone; 3] {
    [
        GaugeZone {
            from: hydrate_thresholds::SCORE_MIN,
            to: hydrate_thresholds::MEDIUM_RISK,
            color: band_colors::LOW,
        },
        GaugeZone {
            from: hydrate_thresholds::MEDIUM_RISK,
            to: hydrate_thresholds::HIGH_RISK,
            color: band_colors::MEDIUM,
        },
        GaugeZone {
            from: hydrate_thresholds::HIGH_RISK,
            to: hydrate_thresholds::SCORE_MAX,
            color: band_colors::HIGH,
        },
    ]
}
