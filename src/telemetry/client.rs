//! Telemetry Client — HTTP client for the sensors backend
//!
//! Wraps the versioned sensors API (`/api/v1/sensors/...`) behind typed
//! calls. Authentication is a pre-provisioned bearer token attached to every
//! request; acquiring or refreshing the token is not this client's job.

use tracing::warn;

use crate::config::defaults;
use crate::types::{Mode, Reading};

/// Fallback error text when the backend supplies no structured detail.
pub const GENERIC_FETCH_ERROR: &str = "Failed to fetch sensor data";

/// Telemetry client errors
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server returned status {status}")]
    Server {
        status: reqwest::StatusCode,
        /// Structured `detail` string from the error body, when present
        detail: Option<String>,
    },
}

impl TelemetryError {
    /// Human-readable message for the poll state's error slot: a
    /// server-supplied detail verbatim, otherwise the generic fallback.
    pub fn poll_message(&self) -> String {
        match self {
            TelemetryError::Server {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => GENERIC_FETCH_ERROR.to_string(),
        }
    }
}

/// Error body shape used by the backend for non-2xx responses.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    detail: String,
}

/// HTTP client for the telemetry backend
#[derive(Debug, Clone)]
pub struct TelemetryClient {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl TelemetryClient {
    /// Create a new telemetry client
    pub fn new(base_url: &str, api_token: &str, timeout_secs: u64) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
        }
    }

    fn sensors_url(&self, path: &str) -> String {
        format!("{}{}/sensors/{}", self.base_url, defaults::API_PREFIX, path)
    }

    /// Fetch the latest reading for a mode.
    ///
    /// Returns `Ok(None)` when the backend answers 2xx with an empty or
    /// unparseable body — that is "no data", not an error. Non-2xx responses
    /// surface as [`TelemetryError::Server`] with the backend's `detail`
    /// string when one is present.
    pub async fn latest_reading(&self, mode: Mode) -> Result<Option<Reading>, TelemetryError> {
        let resp = self
            .http
            .get(self.sensors_url(&format!("latest/{}", mode)))
            .header("Authorization", format!("Bearer {}", self.api_token))
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            let body = resp.bytes().await?;
            if body.is_empty() {
                return Ok(None);
            }
            match serde_json::from_slice::<Reading>(&body) {
                Ok(reading) => Ok(Some(reading)),
                Err(e) => {
                    warn!(error = %e, "Unparseable latest-reading body, treating as no data");
                    Ok(None)
                }
            }
        } else {
            let detail = resp
                .json::<ErrorBody>()
                .await
                .ok()
                .map(|body| body.detail);
            Err(TelemetryError::Server { status, detail })
        }
    }

    /// Fetch up to `limit` historical readings for a mode, oldest first.
    ///
    /// An unparseable 2xx body yields an empty sequence.
    pub async fn reading_history(
        &self,
        mode: Mode,
        limit: usize,
    ) -> Result<Vec<Reading>, TelemetryError> {
        let resp = self
            .http
            .get(self.sensors_url(&format!("history/{}", mode)))
            .query(&[("limit", limit)])
            .header("Authorization", format!("Bearer {}", self.api_token))
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            let body = resp.bytes().await?;
            match serde_json::from_slice::<Vec<Reading>>(&body) {
                Ok(readings) => Ok(readings),
                Err(e) => {
                    warn!(error = %e, "Unparseable history body, treating as empty");
                    Ok(Vec::new())
                }
            }
        } else {
            let detail = resp
                .json::<ErrorBody>()
                .await
                .ok()
                .map(|body| body.detail);
            Err(TelemetryError::Server { status, detail })
        }
    }
}
