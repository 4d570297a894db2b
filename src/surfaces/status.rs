//! Connectivity and risk status strip
//!
//! Tri-state data feed indicator derived from the poll snapshot, plus the
//! classified risk line and the last successful update stamp.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::risk::classify;
use crate::telemetry::PollState;

/// Connectivity of the telemetry feed as the dashboard reports it.
///
/// `Connecting` only ever appears while a fresh poll cycle starts (startup or
/// mode change); a settled cycle is either `Connected` or `Disconnected`
/// until the next restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Connecting,
    Connected,
    Disconnected,
}

impl ConnectionState {
    /// Derives connectivity from one poll snapshot. An unsettled snapshot is
    /// always `Connecting`, regardless of what the previous cycle left in
    /// `error`.
    pub fn from_poll_state(state: &PollState) -> Self {
        if state.loading {
            ConnectionState::Connecting
        } else if state.error.is_some() {
            ConnectionState::Disconnected
        } else {
            ConnectionState::Connected
        }
    }

    /// Data feed label as rendered.
    pub fn label(self) -> &'static str {
        match self {
            ConnectionState::Connecting => "Connecting...",
            ConnectionState::Connected => "Connected",
            ConnectionState::Disconnected => "Disconnected",
        }
    }
}

/// The rendered status strip.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatusSummary {
    pub connection: ConnectionState,
    /// Data feed label ("Connecting..." / "Connected" / "Disconnected")
    pub feed_label: &'static str,
    /// `"{band} ({score:.2}%)"` from the central classifier
    pub risk_line: String,
    /// Last successful update stamp, `"—"` unless connected
    pub last_update: String,
}

/// Builds the status strip from the poll snapshot at render time `now`.
pub fn build(state: &PollState, now: DateTime<Utc>) -> StatusSummary {
    let connection = ConnectionState::from_poll_state(state);
    let risk = classify(state.data.as_ref().and_then(|r| r.hydrate_risk));
    let last_update = match connection {
        ConnectionState::Connected => now.format("%a, %d %b %Y %H:%M:%S UTC").to_string(),
        _ => "—".to_string(),
    };
    StatusSummary {
        connection,
        feed_label: connection.label(),
        risk_line: format!("{} ({:.2}%)", risk.label, risk.score),
        last_update,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::types::Reading;

    fn settled_with_risk(risk: Option<f64>) -> PollState {
        PollState {
            data: Some(Reading {
                hydrate_risk: risk,
                ..Reading::default()
            }),
            loading: false,
            error: None,
        }
    }

    #[test]
    fn test_loading_snapshot_is_connecting() {
        let state = PollState::initial();
        let summary = build(&state, Utc::now());
        assert_eq!(summary.connection, ConnectionState::Connecting);
        assert_eq!(summary.feed_label, "Connecting...");
        assert_eq!(summary.last_update, "—");
    }

    #[test]
    fn test_error_snapshot_is_disconnected_without_update_stamp() {
        let state = PollState {
            data: None,
            loading: false,
            error: Some("Failed to fetch sensor data".to_string()),
        };
        let summary = build(&state, Utc::now());
        assert_eq!(summary.connection, ConnectionState::Disconnected);
        assert_eq!(summary.feed_label, "Disconnected");
        assert_eq!(summary.last_update, "—");
        assert_eq!(summary.risk_line, "Low (0.00%)");
    }

    #[test]
    fn test_connected_snapshot_formats_update_stamp() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let summary = build(&settled_with_risk(Some(55.0)), now);
        assert_eq!(summary.connection, ConnectionState::Connected);
        assert_eq!(summary.last_update, "Thu, 01 Jan 2026 00:00:00 UTC");
    }

    #[test]
    fn test_risk_line_uses_central_classifier() {
        let summary = build(&settled_with_risk(Some(55.0)), Utc::now());
        assert_eq!(summary.risk_line, "Medium (55.00%)");

        let summary = build(&settled_with_risk(Some(85.5)), Utc::now());
        assert_eq!(summary.risk_line, "High (85.50%)");

        let summary = build(&settled_with_risk(None), Utc::now());
        assert_eq!(summary.risk_line, "Low (0.00%)");
    }

    #[test]
    fn test_settled_empty_reading_is_still_connected() {
        let state = PollState {
            data: None,
            loading: false,
            error: None,
        };
        let summary = build(&state, Utc::now());
        assert_eq!(summary.connection, ConnectionState::Connected);
        assert_ne!(summary.last_update, "—");
    }
}
