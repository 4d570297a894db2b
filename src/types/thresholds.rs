//! Hydrate risk thresholds and band color tokens
//!
//! Every component that mentions a risk boundary pulls it from here: the
//! classifier, the gauge zones, the alert feed, and the KPI accent colors.
//! Threshold literals appear nowhere else in the crate.

use serde::{Deserialize, Serialize};

/// Thresholds for hydrate risk banding
pub mod hydrate_thresholds {
    // === Band Boundaries ===
    /// Scores strictly above this are at least medium risk (%)
    pub const MEDIUM_RISK: f64 = 40.0;
    /// Scores strictly above this are high risk (%)
    pub const HIGH_RISK: f64 = 70.0;

    // === Score Domain ===
    /// Lower bound of the risk score scale (%)
    pub const SCORE_MIN: f64 = 0.0;
    /// Upper bound of the risk score scale (%)
    pub const SCORE_MAX: f64 = 100.0;
}

/// Canonical color tokens per band, shared by every surface
pub mod band_colors {
    /// Low risk (green)
    pub const LOW: &str = "#10b981";
    /// Medium risk (amber)
    pub const MEDIUM: &str = "#f59e0b";
    /// High risk (red)
    pub const HIGH: &str = "#ef4444";
}

/// Risk band derived from a hydrate risk score
///
/// Band boundaries are strict-greater-than on the lower bound: a score of
/// exactly 40 is `Low` and exactly 70 is `Medium`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl RiskBand {
    /// Band for a risk score on the 0-100 scale.
    pub fn from_score(score: f64) -> Self {
        if score > hydrate_thresholds::HIGH_RISK {
            RiskBand::High
        } else if score > hydrate_thresholds::MEDIUM_RISK {
            RiskBand::Medium
        } else {
            RiskBand::Low
        }
    }

    /// Canonical color token for this band.
    pub fn color(self) -> &'static str {
        match self {
            RiskBand::Low => band_colors::LOW,
            RiskBand::Medium => band_colors::MEDIUM,
            RiskBand::High => band_colors::HIGH,
        }
    }

    /// Display-case label for this band.
    pub fn label(self) -> &'static str {
        match self {
            RiskBand::Low => "Low",
            RiskBand::Medium => "Medium",
            RiskBand::High => "High",
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Default for RiskBand {
    fn default() -> Self {
        RiskBand::Low
    }
}
