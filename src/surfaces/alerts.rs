//! Rolling alert feed derived from settled readings
//!
//! One entry is recorded per settled reading whose risk score crosses a
//! band threshold; only the five most recent entries are kept. Scores at or
//! below the medium threshold, and readings without a score, record nothing.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::defaults::ALERT_FEED_CAPACITY;
use crate::types::thresholds::hydrate_thresholds;
use crate::types::Reading;

/// Rendered when the feed has no entries.
pub const NO_ALERTS: &str = "No alerts - system running smoothly";

/// Severity of one alert entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Medium,
    High,
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertLevel::Medium => write!(f, "medium"),
            AlertLevel::High => write!(f, "high"),
        }
    }
}

/// One recorded alert, newest first in the feed.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    /// Wall-clock stamp of the observation
    pub time: String,
}

/// Bounded feed of the most recent threshold crossings.
///
/// Stateful across frames: the renderer feeds it one settled reading per
/// poll settlement, not once per rebuilt frame.
#[derive(Debug, Default)]
pub struct AlertFeed {
    entries: Vec<Alert>,
}

impl AlertFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an alert for the reading's risk score, if it crosses a
    /// threshold. The raw score is interpolated into the message unformatted.
    pub fn observe(&mut self, reading: Option<&Reading>, now: DateTime<Utc>) {
        let score = match reading.and_then(|r| r.hydrate_risk) {
            Some(s) => s,
            None => return,
        };

        let (level, message) = if score > hydrate_thresholds::HIGH_RISK {
            (
                AlertLevel::High,
                format!("Critical hydrate risk: {score}%"),
            )
        } else if score > hydrate_thresholds::MEDIUM_RISK {
            (
                AlertLevel::Medium,
                format!("Moderate hydrate risk: {score}%"),
            )
        } else {
            return;
        };

        self.entries.insert(
            0,
            Alert {
                level,
                message,
                time: now.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            },
        );
        self.entries.truncate(ALERT_FEED_CAPACITY);
    }

    /// Entries newest first.
    pub fn entries(&self) -> &[Alert] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
