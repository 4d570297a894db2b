//! Shared data structures for the hydrate monitoring data layer
//!
//! Core types for the dashboard pipeline:
//! - Mode / ModeSelection: operating environment selection
//! - Reading: latest sensor sample wire shape
//! - TrendSample: one point of the trend chart sequence
//! - RiskBand + threshold constants: the single source of truth for banding

mod mode;
mod reading;
// Public because it contains the `hydrate_thresholds` and `band_colors`
// constant sub-modules, which must remain accessible by name.
pub mod thresholds;

pub use mode::*;
pub use reading::*;
pub use thresholds::*;
