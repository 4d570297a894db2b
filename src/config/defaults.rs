//! System-wide default constants.
//!
//! Centralises magic numbers that would otherwise scatter across the
//! codebase. Grouped by subsystem for easy discovery.

// ============================================================================
// Telemetry Poller
// ============================================================================

/// Interval between latest-reading polls (ms).
pub const REFRESH_INTERVAL_MS: u64 = 5_000;

// ============================================================================
// History Sync
// ============================================================================

/// Number of readings requested from the history endpoint per mode selection.
pub const HISTORY_LIMIT: usize = 50;

// ============================================================================
// Backend Client
// ============================================================================

/// HTTP client timeout for backend requests (seconds).
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Versioned API prefix joined onto the backend base URL.
pub const API_PREFIX: &str = "/api/v1";

/// Backend base URL when none is configured.
pub const BACKEND_URL: &str = "http://localhost:8000";

// ============================================================================
// Dashboard
// ============================================================================

/// System health shown when no risk score is available (%).
///
/// The product's nominal "all quiet" baseline, shown instead of claiming a
/// perfect 100 for a feed that is not reporting.
pub const SYSTEM_HEALTH_BASELINE: f64 = 92.0;

/// Maximum entries retained in the recent-alerts feed.
pub const ALERT_FEED_CAPACITY: usize = 5;
