//! Fixed placeholder data rendered when no live telemetry is available
//!
//! The dashboard never shows an empty card grid or a blank chart: a missing
//! reading falls back to one canned sample and an empty history falls back to
//! a canned 15-minute trend window. Both carry an explicit demo flag so the
//! substitution is always visible.

use chrono::{Duration, Utc};

use crate::types::{Reading, TrendSample};

/// Banner shown above the KPI cards while demo data substitutes for a
/// missing reading.
pub const DEMO_BANNER: &str = "Displaying demo data — Connect sensors for live readings";

/// Chip label on the trend chart while the demo sequence is displayed.
pub const DEMO_TREND_LABEL: &str = "Demo data";

/// (temperature °C, pressure bar) pairs for the demo trend window,
/// oldest first, one per minute.
const DEMO_TREND_POINTS: [(f64, f64); 16] = [
    (14.8, 41.2),
    (15.2, 42.5),
    (15.6, 43.8),
    (15.8, 43.1),
    (15.4, 42.6),
    (14.9, 41.8),
    (15.1, 42.2),
    (16.2, 44.2),
    (16.5, 45.1),
    (15.5, 42.9),
    (15.1, 42.3),
    (16.5, 44.8),
    (15.7, 43.5),
    (15.3, 42.7),
    (15.9, 43.9),
    (15.4, 42.6),
];

/// The reading shown on the KPI cards when the live reading has no metrics.
pub fn demo_reading() -> Reading {
    Reading {
        temperature: Some(15.4),
        pressure: Some(42.8),
        hydrate_risk: Some(35.0),
        flow_rate: Some(865.2),
        ..Reading::default()
    }
}

/// The trend sequence shown when the live history is empty: 16 samples at
/// 60-second spacing, the newest stamped now.
pub fn demo_trend_sequence() -> Vec<TrendSample> {
    let now = Utc::now();
    let newest = DEMO_TREND_POINTS.len() - 1;
    DEMO_TREND_POINTS
        .iter()
        .enumerate()
        .map(|(i, &(temperature, pressure))| TrendSample {
            timestamp: now - Duration::seconds(60 * (newest - i) as i64),
            temperature,
            pressure,
        })
        .collect()
}
