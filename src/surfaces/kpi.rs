//! KPI summary cards: Temperature, Pressure, Hydrate Risk, Flow Rate
//!
//! Pure view-model builder over the latest settled reading. Values are
//! formatted here so every renderer prints the same thing; no surface
//! downstream re-derives a number.

use serde::Serialize;

use crate::risk::classify;
use crate::surfaces::demo::{demo_reading, DEMO_BANNER};
use crate::types::Reading;

/// Placeholder for a metric the backend did not report.
pub const MISSING_VALUE: &str = "N/A";

/// Value color for cards whose text does not follow the risk band.
pub const NEUTRAL_ACCENT: &str = "#111827";

/// Direction of a card's reference trend chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

/// Reference trend chip shown beside a card value.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CardTrend {
    /// Reference delta in percent
    pub value: f64,
    pub direction: TrendDirection,
    /// True when the movement reads as unfavorable (rendered in the alarm
    /// color). Rising risk is adverse; for every other metric falling is.
    pub adverse: bool,
}

/// One rendered metric card.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KpiCard {
    pub label: &'static str,
    /// Metric formatted to 2 decimals with its unit, or `"N/A"`.
    pub value: String,
    pub trend: CardTrend,
    /// Color token for the value text
    pub accent: &'static str,
    pub description: &'static str,
}

/// The four-card summary row.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KpiSummary {
    /// Set iff the whole reading is missing: all four metrics absent (or no
    /// reading at all). A reading with even one live metric is not demo.
    pub demo: bool,
    /// Demo banner text, present only while `demo` is set.
    pub banner: Option<&'static str>,
    pub cards: [KpiCard; 4],
}

/// Builds the card row from the latest settled reading.
///
/// When the reading is absent or carries no metrics at all, the fixed demo
/// reading substitutes and the summary is flagged `demo`. A partially-missing
/// live reading stays live: present fields render, absent fields show `"N/A"`.
pub fn build(reading: Option<&Reading>) -> KpiSummary {
    let live = reading.filter(|r| r.has_any_metric());
    let demo = live.is_none();
    let displayed = match live {
        Some(r) => r.clone(),
        None => demo_reading(),
    };

    let risk = classify(displayed.hydrate_risk);
    let risk_direction = if risk.score > 50.0 {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    };

    let cards = [
        KpiCard {
            label: "Temperature",
            value: metric_value(displayed.temperature, "°C"),
            trend: CardTrend {
                value: 1.20,
                direction: TrendDirection::Down,
                adverse: true,
            },
            accent: NEUTRAL_ACCENT,
            description: "Current pipeline temperature",
        },
        KpiCard {
            label: "Pressure",
            value: metric_value(displayed.pressure, " bar"),
            trend: CardTrend {
                value: 0.80,
                direction: TrendDirection::Up,
                adverse: false,
            },
            accent: NEUTRAL_ACCENT,
            description: "Operating pressure level",
        },
        KpiCard {
            label: "Hydrate Risk",
            value: metric_value(displayed.hydrate_risk, "%"),
            trend: CardTrend {
                value: 5.20,
                direction: risk_direction,
                adverse: risk_direction == TrendDirection::Up,
            },
            accent: risk.color,
            description: "Formation probability",
        },
        KpiCard {
            label: "Flow Rate",
            value: metric_value(displayed.flow_rate, " m³/h"),
            trend: CardTrend {
                value: 3.10,
                direction: TrendDirection::Up,
                adverse: false,
            },
            accent: NEUTRAL_ACCENT,
            description: "Current flow volume",
        },
    ];

    KpiSummary {
        demo,
        banner: if demo { Some(DEMO_BANNER) } else { None },
        cards,
    }
}

fn metric_value(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v:.2}{unit}"),
        None => MISSING_VALUE.to_string(),
    }
}
