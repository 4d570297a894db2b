//! HydrateWatch - pipeline hydrate risk console dashboard
//!
//! Polls the sensors backend for the active operating mode, classifies the
//! hydrate risk score, and renders dashboard frames to the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Poll the default backend (http://localhost:8000), offshore mode
//! hydratewatch
//!
//! # Onshore feed from a remote backend, 2 s cadence
//! hydratewatch --backend-url http://sensors.internal:8000 --mode onshore --interval-ms 2000
//!
//! # One JSON object per frame, for piping
//! hydratewatch --json
//! ```
//!
//! While running, line commands on stdin drive the feed:
//! `mode offshore|onshore`, `simulation on|off`, `demo on|off`, `status`, `quit`.
//!
//! # Environment Variables
//!
//! - `HYDRATEWATCH_CONFIG`: path to the config TOML (when `--config` is not given)
//! - `HYDRATEWATCH_API_TOKEN`: bearer token for the sensors API
//! - `RUST_LOG`: logging level (default: info)

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use hydratewatch::config::{self, defaults, MonitorConfig};
use hydratewatch::control::run_control_channel;
use hydratewatch::mode_store::ModeStore;
use hydratewatch::render::run_renderer;
use hydratewatch::telemetry::{
    HistorySync, HttpTelemetrySource, TelemetryClient, TelemetryPoller, TelemetrySource,
};
use hydratewatch::types::ModeSelection;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "hydratewatch")]
#[command(about = "HydrateWatch pipeline hydrate risk monitor")]
#[command(version)]
struct CliArgs {
    /// Path to a config TOML file (skips the HYDRATEWATCH_CONFIG search)
    #[arg(long)]
    config: Option<String>,

    /// Backend base URL, e.g. http://localhost:8000
    #[arg(long)]
    backend_url: Option<String>,

    /// Operating mode at startup: offshore or onshore
    #[arg(long)]
    mode: Option<String>,

    /// Poll interval in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// History readings fetched per mode selection
    #[arg(long)]
    history_limit: Option<usize>,

    /// Emit one JSON object per dashboard frame instead of text blocks
    #[arg(long)]
    json: bool,
}

/// Resolve configuration: file (or search order), then CLI overrides,
/// then validation so an override cannot smuggle in an unusable value.
fn load_config(args: &CliArgs) -> Result<MonitorConfig> {
    let mut cfg = match &args.config {
        Some(path) => MonitorConfig::load_from_file(Path::new(path))?,
        None => MonitorConfig::load(),
    };

    if let Some(url) = &args.backend_url {
        cfg.backend.base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(ms) = args.interval_ms {
        cfg.poll.refresh_interval_ms = ms;
    }
    if let Some(limit) = args.history_limit {
        cfg.poll.history_limit = limit;
    }
    if let Some(mode) = &args.mode {
        cfg.display.initial_mode = mode.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    }
    if args.json {
        cfg.display.json_frames = true;
    }

    cfg.validate()?;
    Ok(cfg)
}

// ============================================================================
// Task Names for Supervisor Logging
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum TaskName {
    TelemetryPoller,
    HistorySync,
    Renderer,
    ControlChannel,
}

impl std::fmt::Display for TaskName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskName::TelemetryPoller => write!(f, "TelemetryPoller"),
            TaskName::HistorySync => write!(f, "HistorySync"),
            TaskName::Renderer => write!(f, "Renderer"),
            TaskName::ControlChannel => write!(f, "ControlChannel"),
        }
    }
}

/// Run the supervisor loop: monitor tasks, cancel everything on failure.
async fn run_supervisor(
    task_set: &mut JoinSet<Result<TaskName>>,
    cancel_token: CancellationToken,
) -> Result<()> {
    info!("Supervisor: all tasks spawned, monitoring...");

    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => {
                info!("Supervisor: shutdown signal received");
                break;
            }
            result = task_set.join_next() => {
                match result {
                    Some(Ok(Ok(task_name))) => {
                        info!("Supervisor: task {} completed normally", task_name);
                    }
                    Some(Ok(Err(e))) => {
                        error!("Supervisor: task failed with error: {}", e);
                        cancel_token.cancel();
                        return Err(e);
                    }
                    Some(Err(e)) => {
                        error!("Supervisor: task panicked: {}", e);
                        cancel_token.cancel();
                        return Err(anyhow::anyhow!("Task panicked: {}", e));
                    }
                    None => {
                        info!("Supervisor: all tasks completed");
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();
    config::init(load_config(&args)?);
    let cfg = config::get();

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("  HydrateWatch - Pipeline Hydrate Risk Monitor");
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("");
    info!("  Backend:  {}{}", cfg.backend.base_url, defaults::API_PREFIX);
    info!("  Mode:     {}", cfg.display.initial_mode);
    info!(
        "  Cadence:  {}ms poll | {} history readings per mode",
        cfg.poll.refresh_interval_ms, cfg.poll.history_limit
    );
    info!(
        "  Output:   {}",
        if cfg.display.json_frames {
            "JSON frames"
        } else {
            "text frames"
        }
    );
    info!("");

    if cfg.backend.api_token.is_empty() {
        warn!("No API token configured (HYDRATEWATCH_API_TOKEN) — requests will be unauthenticated");
    }

    let store = ModeStore::with_selection(ModeSelection {
        mode: cfg.display.initial_mode,
        ..ModeSelection::default()
    });

    let client = TelemetryClient::new(
        &cfg.backend.base_url,
        &cfg.backend.api_token,
        cfg.backend.request_timeout_secs,
    );
    let source: Arc<dyn TelemetrySource> = Arc::new(HttpTelemetrySource::new(client));

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("🛑 Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    let (poller, poll_rx) = TelemetryPoller::new(
        Arc::clone(&source),
        store.subscribe(),
        Duration::from_millis(cfg.poll.refresh_interval_ms),
        cancel_token.clone(),
    );
    let (history, history_rx) = HistorySync::new(
        Arc::clone(&source),
        store.subscribe(),
        cfg.poll.history_limit,
        cancel_token.clone(),
    );

    let mut task_set: JoinSet<Result<TaskName>> = JoinSet::new();

    // Task 1: Telemetry Poller
    task_set.spawn(async move {
        info!("[Poller] Task starting");
        poller.run().await;
        Ok(TaskName::TelemetryPoller)
    });

    // Task 2: History Sync
    task_set.spawn(async move {
        info!("[HistorySync] Task starting");
        history.run().await;
        Ok(TaskName::HistorySync)
    });

    // Task 3: Frame Renderer
    let render_mode_rx = store.subscribe();
    let render_cancel = cancel_token.clone();
    let json_frames = cfg.display.json_frames;
    task_set.spawn(async move {
        info!("[Renderer] Task starting");
        run_renderer(render_mode_rx, poll_rx, history_rx, json_frames, render_cancel).await;
        Ok(TaskName::Renderer)
    });

    // Task 4: stdin Control Channel
    let control_store = store.clone();
    let control_cancel = cancel_token.clone();
    task_set.spawn(async move {
        info!("[Control] Task starting");
        run_control_channel(control_store, control_cancel).await;
        Ok(TaskName::ControlChannel)
    });

    run_supervisor(&mut task_set, cancel_token).await?;

    info!("");
    info!("✓ HydrateWatch shutdown complete");
    Ok(())
}
