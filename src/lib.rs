//! HydrateWatch: real-time hydrate risk monitoring
//!
//! Data layer and console dashboard for pipeline hydrate-risk telemetry.
//! A mode-aware poll loop feeds classified risk snapshots to pure
//! presentation surfaces; nothing downstream of the poller performs I/O.
//!
//! ## Architecture
//!
//! - **Mode Store**: operating environment selection (offshore / onshore)
//! - **Telemetry Poller**: fixed-cadence fetch of the latest reading, with
//!   generation-tagged settlements so a superseded mode can never overwrite
//!   current state
//! - **Risk Classifier**: one score-to-band function shared by every surface
//! - **Presentation Surfaces**: pure view-model builders (KPI cards, risk
//!   gauge, trend chart, status strip, alert feed)

pub mod config;
pub mod types;
pub mod mode_store;
pub mod risk;
pub mod telemetry;
pub mod surfaces;
pub mod render;
pub mod control;

// Re-export the mode store
pub use mode_store::ModeStore;

// Re-export commonly used types
pub use types::{Mode, ModeSelection, Reading, RiskBand, TrendSample};

// Re-export the poll pipeline
pub use telemetry::{
    HistorySync, HttpTelemetrySource, PollState, TelemetryClient, TelemetryError,
    TelemetryPoller, TelemetrySource,
};

// Re-export classification
pub use risk::{classify, RiskAssessment};

// Re-export frame assembly
pub use surfaces::{build_frame, AlertFeed, DashboardFrame};
