//! Sensor reading wire types

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::Mode;

/// Latest sensor sample for the active mode, as returned by
/// `GET /sensors/latest/{mode}`.
///
/// Every metric is optional: backends may omit fields, and a reading with all
/// four metrics absent is treated as "no live data". The envelope fields
/// (`id`, `mode`, `timestamp`) are tolerated but nothing downstream requires
/// them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Reading {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub mode: Option<Mode>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,

    // === Metrics ===
    /// Pipeline temperature (°C)
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Operating pressure (bar)
    #[serde(default)]
    pub pressure: Option<f64>,
    /// Hydrate formation risk score (0-100 %)
    #[serde(default)]
    pub hydrate_risk: Option<f64>,
    /// Flow rate (m³/h)
    #[serde(default)]
    pub flow_rate: Option<f64>,
}

impl Reading {
    /// True when at least one of the four metrics is present.
    pub fn has_any_metric(&self) -> bool {
        self.temperature.is_some()
            || self.pressure.is_some()
            || self.hydrate_risk.is_some()
            || self.flow_rate.is_some()
    }
}

/// One point of the time-ordered sequence consumed by the trend chart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TrendSample {
    pub timestamp: DateTime<Utc>,
    /// Pipeline temperature (°C)
    pub temperature: f64,
    /// Operating pressure (bar)
    pub pressure: f64,
}

impl TrendSample {
    /// Builds a sample from a wire reading. Readings missing the timestamp or
    /// either metric have no place on the chart and yield `None`.
    pub fn from_reading(reading: &Reading) -> Option<Self> {
        Some(Self {
            timestamp: reading.timestamp?,
            temperature: reading.temperature?,
            pressure: reading.pressure?,
        })
    }
}

/// Accepts both RFC 3339 timestamps and the offset-less ISO form some
/// backends emit for UTC (`2026-08-22T12:34:56.789`). Unparseable values
/// deserialize as `None` rather than failing the whole reading.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}
