//! Hydrate risk classification
//!
//! One pure function shared by every presentation surface, so the gauge,
//! the KPI cards, the status line, and the alert feed can never disagree
//! about what a given score means.

use serde::Serialize;

use crate::types::RiskBand;

/// Classification of one risk score: the band plus the canonical color and
/// label every surface renders for it.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct RiskAssessment {
    pub band: RiskBand,
    /// Canonical color token for the band
    pub color: &'static str,
    /// Display-case band label ("Low" / "Medium" / "High")
    pub label: &'static str,
    /// Effective score used for display, with absent normalized to 0
    pub score: f64,
}

/// Classifies a hydrate risk score into its band.
///
/// An absent score is treated as 0 (→ `Low`) for display purposes. The
/// classifier does not distinguish "genuinely zero" from "absent"; callers
/// that care about absence must flag it separately (the KPI demo indicator
/// does exactly that).
pub fn classify(score: Option<f64>) -> RiskAssessment {
    let effective = score.unwrap_or(0.0);
    let band = RiskBand::from_score(effective);
    RiskAssessment {
        band,
        color: band.color(),
        label: band.label(),
        score: effective,
    }
}
