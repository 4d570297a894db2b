//! Lifecycle tests for the telemetry tasks, driven by a scripted source and
//! the paused tokio clock: poll cadence, mode-change restarts, suppression of
//! settlements from a superseded mode, self-healing after backend errors, and
//! the once-per-mode history sync.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::watch;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use hydratewatch::{
    HistorySync, Mode, ModeStore, PollState, Reading, TelemetryError, TelemetryPoller,
    TelemetrySource,
};

/// One scripted response for `latest_reading`. Steps are consumed in call
/// order; once the script runs dry every further call settles with a
/// placeholder reading (temperature 1.0).
enum Step {
    /// Settle immediately with a reading carrying this temperature.
    Reading(f64),
    /// Settle immediately with no data (backend answered with an empty body).
    Empty,
    /// Settle immediately with a server error carrying this detail string.
    ServerError(&'static str),
    /// Sleep for the given milliseconds, then settle with a reading.
    SlowReading(u64, f64),
}

struct ScriptedSource {
    started: Instant,
    script: Mutex<VecDeque<Step>>,
    latest_calls: Mutex<Vec<(Mode, u64)>>,
    history: Mutex<Result<Vec<Reading>, &'static str>>,
    history_calls: Mutex<Vec<(Mode, usize)>>,
}

impl ScriptedSource {
    fn new(steps: Vec<Step>) -> Self {
        Self {
            started: Instant::now(),
            script: Mutex::new(steps.into()),
            latest_calls: Mutex::new(Vec::new()),
            history: Mutex::new(Ok(Vec::new())),
            history_calls: Mutex::new(Vec::new()),
        }
    }

    fn serve_history(&self, readings: Vec<Reading>) {
        *self.history.lock().unwrap() = Ok(readings);
    }

    fn fail_history(&self, detail: &'static str) {
        *self.history.lock().unwrap() = Err(detail);
    }

    /// `(mode, elapsed_ms)` per `latest_reading` call, in call order.
    fn latest_call_log(&self) -> Vec<(Mode, u64)> {
        self.latest_calls.lock().unwrap().clone()
    }

    /// `(mode, limit)` per `reading_history` call, in call order.
    fn history_call_log(&self) -> Vec<(Mode, usize)> {
        self.history_calls.lock().unwrap().clone()
    }

    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

#[async_trait]
impl TelemetrySource for ScriptedSource {
    async fn latest_reading(&self, mode: Mode) -> Result<Option<Reading>, TelemetryError> {
        self.latest_calls
            .lock()
            .unwrap()
            .push((mode, self.elapsed_ms()));
        let step = self.script.lock().unwrap().pop_front();
        match step {
            Some(Step::Reading(temperature)) => Ok(Some(reading_with_temperature(temperature))),
            Some(Step::Empty) => Ok(None),
            Some(Step::ServerError(detail)) => Err(server_error(detail)),
            Some(Step::SlowReading(delay_ms, temperature)) => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(Some(reading_with_temperature(temperature)))
            }
            None => Ok(Some(reading_with_temperature(1.0))),
        }
    }

    async fn reading_history(
        &self,
        mode: Mode,
        limit: usize,
    ) -> Result<Vec<Reading>, TelemetryError> {
        self.history_calls.lock().unwrap().push((mode, limit));
        match &*self.history.lock().unwrap() {
            Ok(readings) => Ok(readings.clone()),
            Err(detail) => Err(server_error(detail)),
        }
    }

    fn source_name(&self) -> &str {
        "scripted"
    }
}

fn reading_with_temperature(temperature: f64) -> Reading {
    Reading {
        temperature: Some(temperature),
        pressure: Some(40.0),
        hydrate_risk: Some(35.0),
        flow_rate: Some(850.0),
        ..Reading::default()
    }
}

fn chart_reading(temperature: f64, pressure: f64) -> Reading {
    Reading {
        timestamp: Some(Utc::now()),
        temperature: Some(temperature),
        pressure: Some(pressure),
        ..Reading::default()
    }
}

fn server_error(detail: &str) -> TelemetryError {
    TelemetryError::Server {
        status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        detail: Some(detail.to_string()),
    }
}

fn spawn_poller(
    source: Arc<ScriptedSource>,
    refresh_ms: u64,
) -> (ModeStore, watch::Receiver<PollState>, CancellationToken) {
    let store = ModeStore::new();
    let cancel = CancellationToken::new();
    let (poller, state_rx) = TelemetryPoller::new(
        source,
        store.subscribe(),
        Duration::from_millis(refresh_ms),
        cancel.clone(),
    );
    tokio::spawn(poller.run());
    (store, state_rx, cancel)
}

fn spawn_history_sync(
    source: Arc<ScriptedSource>,
    limit: usize,
) -> (ModeStore, watch::Receiver<Vec<hydratewatch::TrendSample>>) {
    let store = ModeStore::new();
    let cancel = CancellationToken::new();
    let (sync, history_rx) = HistorySync::new(source, store.subscribe(), limit, cancel);
    tokio::spawn(sync.run());
    (store, history_rx)
}

// ============================================================================
// Poll loop
// ============================================================================

#[tokio::test(start_paused = true)]
async fn polls_immediately_then_on_every_tick() {
    let source = Arc::new(ScriptedSource::new(vec![]));
    let (_store, state_rx, _cancel) = spawn_poller(source.clone(), 5_000);

    tokio::time::sleep(Duration::from_millis(10_500)).await;

    assert_eq!(
        source.latest_call_log(),
        vec![
            (Mode::Offshore, 0),
            (Mode::Offshore, 5_000),
            (Mode::Offshore, 10_000),
        ]
    );
    let state = state_rx.borrow().clone();
    assert!(state.is_settled());
    assert_eq!(state.data.unwrap().temperature, Some(1.0));
    assert!(state.error.is_none());
}

#[tokio::test(start_paused = true)]
async fn cancel_stops_the_cadence() {
    let source = Arc::new(ScriptedSource::new(vec![]));
    let (_store, _state_rx, cancel) = spawn_poller(source.clone(), 5_000);

    tokio::time::sleep(Duration::from_millis(7_500)).await;
    cancel.cancel();
    tokio::time::sleep(Duration::from_millis(20_000)).await;

    assert_eq!(source.latest_call_log().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn mode_change_restarts_the_cycle_from_its_own_clock() {
    let source = Arc::new(ScriptedSource::new(vec![
        Step::Reading(11.0),
        Step::SlowReading(500, 22.0),
    ]));
    let (store, state_rx, _cancel) = spawn_poller(source.clone(), 5_000);

    tokio::time::sleep(Duration::from_millis(2_000)).await;
    assert_eq!(
        state_rx.borrow().data.as_ref().unwrap().temperature,
        Some(11.0)
    );

    store.set_mode(Mode::Onshore);
    tokio::time::sleep(Duration::from_millis(100)).await;

    // The switch republishes the loading state while its fetch is in flight.
    let state = state_rx.borrow().clone();
    assert!(state.loading);
    assert!(state.data.is_none());

    tokio::time::sleep(Duration::from_millis(1_000)).await;
    let state = state_rx.borrow().clone();
    assert!(state.is_settled());
    assert_eq!(state.data.unwrap().temperature, Some(22.0));

    // The restarted interval counts from the switch, not from process start.
    tokio::time::sleep(Duration::from_millis(4_400)).await;
    assert_eq!(
        source.latest_call_log(),
        vec![
            (Mode::Offshore, 0),
            (Mode::Onshore, 2_000),
            (Mode::Onshore, 7_000),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn toggles_do_not_restart_the_cycle() {
    let source = Arc::new(ScriptedSource::new(vec![]));
    let (store, state_rx, _cancel) = spawn_poller(source.clone(), 5_000);

    tokio::time::sleep(Duration::from_millis(1_000)).await;
    store.set_demo_mode(true);
    store.set_simulation_mode(true);
    tokio::time::sleep(Duration::from_millis(1_000)).await;

    // No restart fetch and no loading reset; the settled state stands.
    assert_eq!(source.latest_call_log(), vec![(Mode::Offshore, 0)]);
    assert!(state_rx.borrow().is_settled());

    tokio::time::sleep(Duration::from_millis(3_500)).await;
    assert_eq!(source.latest_call_log().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn stale_settlement_from_superseded_mode_is_discarded() {
    let source = Arc::new(ScriptedSource::new(vec![
        Step::SlowReading(3_000, 111.0),
        Step::Reading(222.0),
    ]));
    let (store, state_rx, _cancel) = spawn_poller(source.clone(), 5_000);

    // Switch while the offshore fetch is still in flight.
    tokio::time::sleep(Duration::from_millis(1_000)).await;
    store.set_mode(Mode::Onshore);

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(
        state_rx.borrow().data.as_ref().unwrap().temperature,
        Some(222.0)
    );

    // The offshore fetch settles two seconds later; its result must not win.
    tokio::time::sleep(Duration::from_millis(3_000)).await;
    let state = state_rx.borrow().clone();
    assert_eq!(state.data.unwrap().temperature, Some(222.0));
    assert!(state.error.is_none());
}

#[tokio::test(start_paused = true)]
async fn backend_error_publishes_detail_then_next_tick_heals() {
    let source = Arc::new(ScriptedSource::new(vec![
        Step::Reading(15.0),
        Step::ServerError("Sensor feed offline"),
        Step::Reading(16.0),
    ]));
    let (_store, state_rx, _cancel) = spawn_poller(source.clone(), 5_000);

    tokio::time::sleep(Duration::from_millis(1_000)).await;
    assert_eq!(
        state_rx.borrow().data.as_ref().unwrap().temperature,
        Some(15.0)
    );

    // Failed tick: data clears and the server's detail string is surfaced.
    tokio::time::sleep(Duration::from_millis(5_000)).await;
    let failed = state_rx.borrow().clone();
    assert!(failed.data.is_none());
    assert!(!failed.loading);
    assert_eq!(failed.error.as_deref(), Some("Sensor feed offline"));

    // The cadence never stopped, so the next tick heals the state on its own.
    tokio::time::sleep(Duration::from_millis(5_000)).await;
    let healed = state_rx.borrow().clone();
    assert_eq!(healed.data.unwrap().temperature, Some(16.0));
    assert!(healed.error.is_none());
    assert_eq!(source.latest_call_log().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn empty_body_settles_as_no_data_without_error() {
    let source = Arc::new(ScriptedSource::new(vec![Step::Empty]));
    let (_store, state_rx, _cancel) = spawn_poller(source.clone(), 5_000);

    tokio::time::sleep(Duration::from_millis(1_000)).await;
    let state = state_rx.borrow().clone();
    assert!(state.is_settled());
    assert!(state.data.is_none());
    assert!(state.error.is_none());
}

// ============================================================================
// History sync
// ============================================================================

#[tokio::test(start_paused = true)]
async fn history_loads_once_then_again_only_on_mode_change() {
    let source = Arc::new(ScriptedSource::new(vec![]));
    source.serve_history(vec![chart_reading(14.0, 40.0), chart_reading(15.0, 41.0)]);
    let (store, history_rx) = spawn_history_sync(source.clone(), 50);

    // One load at startup, none from the passage of time.
    tokio::time::sleep(Duration::from_millis(30_000)).await;
    assert_eq!(source.history_call_log(), vec![(Mode::Offshore, 50)]);
    assert_eq!(history_rx.borrow().len(), 2);

    store.set_mode(Mode::Onshore);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(
        source.history_call_log(),
        vec![(Mode::Offshore, 50), (Mode::Onshore, 50)]
    );

    // Toggles and re-selecting the active mode trigger nothing.
    store.set_demo_mode(true);
    store.set_simulation_mode(true);
    store.set_mode(Mode::Onshore);
    tokio::time::sleep(Duration::from_millis(30_000)).await;
    assert_eq!(source.history_call_log().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn history_skips_readings_missing_chart_metrics() {
    let source = Arc::new(ScriptedSource::new(vec![]));
    source.serve_history(vec![
        chart_reading(14.0, 40.0),
        Reading {
            timestamp: Some(Utc::now()),
            temperature: Some(15.0),
            ..Reading::default()
        },
        Reading {
            temperature: Some(16.0),
            pressure: Some(42.0),
            ..Reading::default()
        },
    ]);
    let (_store, history_rx) = spawn_history_sync(source.clone(), 50);

    tokio::time::sleep(Duration::from_millis(100)).await;
    let samples = history_rx.borrow().clone();
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].temperature, 14.0);
}

#[tokio::test(start_paused = true)]
async fn history_failure_publishes_an_empty_sequence() {
    let source = Arc::new(ScriptedSource::new(vec![]));
    source.serve_history(vec![chart_reading(14.0, 40.0)]);
    let (store, history_rx) = spawn_history_sync(source.clone(), 50);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(history_rx.borrow().len(), 1);

    // A failed refresh clears the sequence instead of keeping stale samples.
    source.fail_history("history store unavailable");
    store.set_mode(Mode::Onshore);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(history_rx.borrow().is_empty());
}
