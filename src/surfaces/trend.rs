//! Temperature/pressure trend chart view model
//!
//! Displays the live history sequence when there is one, otherwise the fixed
//! demo window. Footer aggregates are computed over whichever sequence is
//! displayed, never over a mix of the two.

use serde::Serialize;

use crate::surfaces::demo::{demo_trend_sequence, DEMO_TREND_LABEL};
use crate::types::TrendSample;

pub const TITLE: &str = "Sensor Trends";
pub const SUBTITLE: &str = "Real-time temperature and pressure monitoring";

/// Mean and max of each displayed series, for the chart footer.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct SeriesStats {
    pub avg_temperature: f64,
    pub max_temperature: f64,
    pub avg_pressure: f64,
    pub max_pressure: f64,
}

impl SeriesStats {
    /// Computes footer aggregates over one displayed sequence.
    pub fn from_samples(samples: &[TrendSample]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        let count = samples.len() as f64;
        let mut stats = Self {
            max_temperature: f64::MIN,
            max_pressure: f64::MIN,
            ..Self::default()
        };
        for sample in samples {
            stats.avg_temperature += sample.temperature;
            stats.avg_pressure += sample.pressure;
            stats.max_temperature = stats.max_temperature.max(sample.temperature);
            stats.max_pressure = stats.max_pressure.max(sample.pressure);
        }
        stats.avg_temperature /= count;
        stats.avg_pressure /= count;
        stats
    }
}

/// The rendered trend chart: the displayed sequence plus its aggregates.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrendView {
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Set iff the demo sequence substitutes for an empty live history.
    pub demo: bool,
    /// Demo chip text, present only while `demo` is set.
    pub demo_label: Option<&'static str>,
    /// Time-ordered samples actually displayed
    pub samples: Vec<TrendSample>,
    pub stats: SeriesStats,
}

/// Builds the chart view from the live history sequence.
///
/// An empty history substitutes the fixed 16-sample demo window and flags it;
/// a non-empty history is displayed as-is. Aggregates always describe the
/// displayed sequence.
pub fn build(history: &[TrendSample]) -> TrendView {
    let demo = history.is_empty();
    let samples = if demo {
        demo_trend_sequence()
    } else {
        history.to_vec()
    };
    let stats = SeriesStats::from_samples(&samples);
    TrendView {
        title: TITLE,
        subtitle: SUBTITLE,
        demo,
        demo_label: if demo { Some(DEMO_TREND_LABEL) } else { None },
        samples,
        stats,
    }
}
