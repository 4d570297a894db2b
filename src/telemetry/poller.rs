//! Telemetry poll loop
//!
//! Owns the `{data, loading, error}` state for the active mode: one fetch
//! immediately on (re)selection, then one per interval tick. Fetches settle
//! concurrently and report back over a channel, so a hung request delays its
//! own settlement without blocking the next scheduled tick. Every fetch is
//! tagged with the generation current at its start; the loop applies a
//! settlement only when its tag still matches, which makes late responses
//! from a superseded mode (or from before shutdown) structurally unable to
//! overwrite current state.
//!
//! Polling is self-healing: a failed tick publishes an error state and the
//! cadence continues untouched. There are no retries, no backoff, and no
//! request deduplication.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::telemetry::client::TelemetryError;
use crate::telemetry::source::TelemetrySource;
use crate::types::{Mode, ModeSelection, Reading};

/// Poll state for the active mode.
///
/// After the first settlement exactly one of `data` or `error` is populated
/// (`data` may be `None` on success-with-empty-body, which is "no data", not
/// an error). `loading` is true only between a mode (re)selection and that
/// cycle's first settlement.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PollState {
    pub data: Option<Reading>,
    pub loading: bool,
    pub error: Option<String>,
}

impl PollState {
    /// State published at the start of every poll cycle.
    pub fn initial() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }

    /// True once the current cycle's first fetch has settled.
    pub fn is_settled(&self) -> bool {
        !self.loading
    }
}

impl Default for PollState {
    fn default() -> Self {
        Self::initial()
    }
}

type Settlement = (u64, Result<Option<Reading>, TelemetryError>);

/// The poll loop. Construct with [`TelemetryPoller::new`], then drive with
/// [`TelemetryPoller::run`] on a spawned task.
pub struct TelemetryPoller {
    source: Arc<dyn TelemetrySource>,
    mode_rx: watch::Receiver<ModeSelection>,
    state_tx: watch::Sender<PollState>,
    settle_tx: mpsc::UnboundedSender<Settlement>,
    settle_rx: mpsc::UnboundedReceiver<Settlement>,
    refresh_interval: Duration,
    cancel_token: CancellationToken,
    current_generation: u64,
}

impl TelemetryPoller {
    /// Creates the poller and the receiver its snapshots are published on.
    pub fn new(
        source: Arc<dyn TelemetrySource>,
        mode_rx: watch::Receiver<ModeSelection>,
        refresh_interval: Duration,
        cancel_token: CancellationToken,
    ) -> (Self, watch::Receiver<PollState>) {
        let (state_tx, state_rx) = watch::channel(PollState::initial());
        let (settle_tx, settle_rx) = mpsc::unbounded_channel();
        let poller = Self {
            source,
            mode_rx,
            state_tx,
            settle_tx,
            settle_rx,
            refresh_interval,
            cancel_token,
            current_generation: 0,
        };
        (poller, state_rx)
    }

    /// Runs until shutdown. The loop is the only writer of poll state;
    /// spawned fetches only report back through the settlement channel.
    pub async fn run(mut self) {
        let mut mode = self.mode_rx.borrow_and_update().mode;
        let mut interval = self.start_cycle();
        info!(
            "[Poller] Polling {} feed from '{}' every {:?}",
            mode,
            self.source.source_name(),
            self.refresh_interval
        );

        loop {
            tokio::select! {
                _ = self.cancel_token.cancelled() => {
                    // Invalidate anything still in flight before leaving.
                    self.current_generation += 1;
                    info!("[Poller] Shutdown requested, poll loop stopped");
                    return;
                }
                changed = self.mode_rx.changed() => {
                    if changed.is_err() {
                        self.current_generation += 1;
                        info!("[Poller] Mode store closed, poll loop stopped");
                        return;
                    }
                    let new_mode = self.mode_rx.borrow_and_update().mode;
                    // Toggle-only changes leave the running cycle alone.
                    if new_mode != mode {
                        mode = new_mode;
                        self.state_tx.send_replace(PollState::initial());
                        interval = self.start_cycle();
                        info!("[Poller] Mode changed, restarting poll cycle for {}", mode);
                    }
                }
                _ = interval.tick() => {
                    self.spawn_fetch(mode);
                }
                Some((generation, result)) = self.settle_rx.recv() => {
                    if generation == self.current_generation {
                        self.apply_settlement(result);
                    } else {
                        debug!(
                            "[Poller] Discarded stale settlement (generation {}, current {})",
                            generation, self.current_generation
                        );
                    }
                }
            }
        }
    }

    /// Advances the generation and returns a fresh interval whose first tick
    /// fires immediately.
    fn start_cycle(&mut self) -> tokio::time::Interval {
        self.current_generation += 1;
        let mut interval = tokio::time::interval(self.refresh_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    }

    fn spawn_fetch(&self, mode: Mode) {
        let source = Arc::clone(&self.source);
        let settle_tx = self.settle_tx.clone();
        let generation = self.current_generation;
        debug!("[Poller] Tick for {} (generation {})", mode, generation);
        tokio::spawn(async move {
            let result = source.latest_reading(mode).await;
            // A closed channel means the loop already stopped.
            let _ = settle_tx.send((generation, result));
        });
    }

    fn apply_settlement(&self, result: Result<Option<Reading>, TelemetryError>) {
        let next = match result {
            Ok(data) => PollState {
                data,
                loading: false,
                error: None,
            },
            Err(e) => {
                warn!("[Poller] Fetch failed: {}", e);
                PollState {
                    data: None,
                    loading: false,
                    error: Some(e.poll_message()),
                }
            }
        };
        self.state_tx.send_replace(next);
    }
}
