//! Presentation surfaces: pure view-model builders over poll snapshots
//!
//! Every surface is a synchronous function from already-resolved state to a
//! serializable view struct. Nothing here performs I/O, holds a lock, or
//! mutates the snapshot it is given; the renderer decides when to rebuild.
//!
//! - kpi: the four metric cards
//! - gauge: semicircular risk dial
//! - trend: temperature/pressure history chart
//! - status: connectivity and risk strip
//! - alerts: rolling threshold-crossing feed
//! - demo: fixed fallback data behind the kpi and trend surfaces

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::defaults;
use crate::telemetry::PollState;
use crate::types::{Mode, ModeSelection, Reading, TrendSample};

pub mod alerts;
pub mod demo;
pub mod gauge;
pub mod kpi;
pub mod status;
pub mod trend;

pub use alerts::{Alert, AlertFeed, AlertLevel, NO_ALERTS};
pub use gauge::GaugeView;
pub use kpi::KpiSummary;
pub use status::{ConnectionState, StatusSummary};
pub use trend::{SeriesStats, TrendView};

// ============================================================================
// Dashboard Frame
// ============================================================================

/// One complete rendered dashboard state, assembled from every surface.
///
/// The renderer rebuilds a frame whenever any input changes and either
/// pretty-prints it or emits it as one JSON object.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardFrame {
    pub mode: Mode,
    /// `"Hydrate Risk Dashboard — {Mode}"`
    pub headline: String,
    /// Mode-specific monitoring summary line
    pub subtitle: &'static str,
    /// `"{Mode} Mode Active"` badge text
    pub mode_badge: String,
    pub simulation_mode: bool,
    pub demo_mode: bool,
    pub generated_at: DateTime<Utc>,
    /// Overall health (%): `max(0, 100 − risk)` when a score is present,
    /// else the nominal baseline
    pub system_health: f64,
    pub status: StatusSummary,
    pub kpis: KpiSummary,
    pub gauge: GaugeView,
    pub trend: TrendView,
    /// Alert entries newest first
    pub alerts: Vec<Alert>,
}

/// Overall system health derived from the latest reading's risk score.
pub fn system_health(reading: Option<&Reading>) -> f64 {
    match reading.and_then(|r| r.hydrate_risk) {
        Some(risk) => (100.0 - risk).max(0.0),
        None => defaults::SYSTEM_HEALTH_BASELINE,
    }
}

/// Assembles one frame from the current snapshots. Pure: calling it twice
/// with the same inputs yields the same frame (timestamps included, since
/// `now` is passed in).
pub fn build_frame(
    selection: ModeSelection,
    poll: &PollState,
    history: &[TrendSample],
    alerts: &AlertFeed,
    now: DateTime<Utc>,
) -> DashboardFrame {
    let reading = poll.data.as_ref();
    DashboardFrame {
        mode: selection.mode,
        headline: format!("Hydrate Risk Dashboard — {}", selection.mode.title()),
        subtitle: selection.mode.monitoring_summary(),
        mode_badge: format!("{} Mode Active", selection.mode.title()),
        simulation_mode: selection.simulation_mode,
        demo_mode: selection.demo_mode,
        generated_at: now,
        system_health: system_health(reading),
        status: status::build(poll, now),
        kpis: kpi::build(reading),
        gauge: gauge::build(reading.and_then(|r| r.hydrate_risk)),
        trend: trend::build(history),
        alerts: alerts.entries().to_vec(),
    }
}
