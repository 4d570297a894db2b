//! Per-mode history sync
//!
//! Loads the trend chart's backing sequence: one history fetch when the task
//! starts and one on every mode change. There is no periodic refresh. A
//! failed or unparseable fetch publishes an empty sequence, which makes the
//! trend surface fall back to its demo content; history problems are never
//! surfaced as poll errors.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::telemetry::source::TelemetrySource;
use crate::types::{Mode, ModeSelection, TrendSample};

/// The history sync task. Construct with [`HistorySync::new`], then drive
/// with [`HistorySync::run`] on a spawned task.
pub struct HistorySync {
    source: Arc<dyn TelemetrySource>,
    mode_rx: watch::Receiver<ModeSelection>,
    history_tx: watch::Sender<Vec<TrendSample>>,
    limit: usize,
    cancel_token: CancellationToken,
}

impl HistorySync {
    /// Creates the task and the receiver its sequences are published on.
    pub fn new(
        source: Arc<dyn TelemetrySource>,
        mode_rx: watch::Receiver<ModeSelection>,
        limit: usize,
        cancel_token: CancellationToken,
    ) -> (Self, watch::Receiver<Vec<TrendSample>>) {
        let (history_tx, history_rx) = watch::channel(Vec::new());
        let sync = Self {
            source,
            mode_rx,
            history_tx,
            limit,
            cancel_token,
        };
        (sync, history_rx)
    }

    /// Runs until shutdown.
    pub async fn run(mut self) {
        let mut mode = self.mode_rx.borrow_and_update().mode;

        loop {
            tokio::select! {
                _ = self.cancel_token.cancelled() => {
                    info!("[HistorySync] Shutdown requested, history sync stopped");
                    return;
                }
                _ = self.refresh(mode) => {}
            }

            loop {
                tokio::select! {
                    _ = self.cancel_token.cancelled() => {
                        info!("[HistorySync] Shutdown requested, history sync stopped");
                        return;
                    }
                    changed = self.mode_rx.changed() => {
                        if changed.is_err() {
                            info!("[HistorySync] Mode store closed, history sync stopped");
                            return;
                        }
                        let new_mode = self.mode_rx.borrow_and_update().mode;
                        if new_mode != mode {
                            mode = new_mode;
                            break;
                        }
                    }
                }
            }
        }
    }

    async fn refresh(&self, mode: Mode) {
        match self.source.reading_history(mode, self.limit).await {
            Ok(readings) => {
                let samples: Vec<TrendSample> = readings
                    .iter()
                    .filter_map(TrendSample::from_reading)
                    .collect();
                let skipped = readings.len() - samples.len();
                if skipped > 0 {
                    debug!(
                        "[HistorySync] Skipped {} readings missing chart metrics",
                        skipped
                    );
                }
                info!(
                    "[HistorySync] Loaded {} history samples for {}",
                    samples.len(),
                    mode
                );
                self.history_tx.send_replace(samples);
            }
            Err(e) => {
                warn!("[HistorySync] History fetch failed for {}: {}", mode, e);
                self.history_tx.send_replace(Vec::new());
            }
        }
    }
}
