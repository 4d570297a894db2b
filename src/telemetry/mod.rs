//! Telemetry acquisition: backend client, source abstraction, poll loop,
//! and per-mode history sync.

pub mod client;
pub mod history;
pub mod poller;
pub mod source;

pub use client::{TelemetryClient, TelemetryError, GENERIC_FETCH_ERROR};
pub use history::HistorySync;
pub use poller::{PollState, TelemetryPoller};
pub use source::{HttpTelemetrySource, TelemetrySource};
