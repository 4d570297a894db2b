//! Telemetry source abstraction.
//!
//! One trait for fetching readings so the poller and history sync do not
//! care whether they are talking to the real backend or a scripted source in
//! tests. The HTTP implementation delegates to [`TelemetryClient`].

use async_trait::async_trait;

use crate::telemetry::client::{TelemetryClient, TelemetryError};
use crate::types::{Mode, Reading};

/// Trait abstracting where sensor readings come from.
///
/// Implementations are shared across concurrently settling fetches, so the
/// methods take `&self` and the object is kept behind an `Arc`.
#[async_trait]
pub trait TelemetrySource: Send + Sync + 'static {
    /// Latest reading for a mode. `Ok(None)` means the backend answered with
    /// no usable body ("no data", not an error).
    async fn latest_reading(&self, mode: Mode) -> Result<Option<Reading>, TelemetryError>;

    /// Historical readings for a mode, oldest first.
    async fn reading_history(
        &self,
        mode: Mode,
        limit: usize,
    ) -> Result<Vec<Reading>, TelemetryError>;

    /// Human-readable name for logging (e.g. "backend-http").
    fn source_name(&self) -> &str;
}

// ============================================================================
// HTTP Source (production backend)
// ============================================================================

/// Production source backed by the sensors HTTP API.
#[derive(Debug, Clone)]
pub struct HttpTelemetrySource {
    client: TelemetryClient,
}

impl HttpTelemetrySource {
    pub fn new(client: TelemetryClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TelemetrySource for HttpTelemetrySource {
    async fn latest_reading(&self, mode: Mode) -> Result<Option<Reading>, TelemetryError> {
        self.client.latest_reading(mode).await
    }

    async fn reading_history(
        &self,
        mode: Mode,
        limit: usize,
    ) -> Result<Vec<Reading>, TelemetryError> {
        self.client.reading_history(mode, limit).await
    }

    fn source_name(&self) -> &str {
        "backend-http"
    }
}
