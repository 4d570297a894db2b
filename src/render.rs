//! Console renderer task
//!
//! Bridges the data layer to the terminal via `tokio::sync::watch` channels:
//! whenever the mode selection, the poll snapshot, or the history sequence
//! changes, the task assembles a fresh `DashboardFrame` and emits it, either
//! as a human-readable block or as one JSON object per line (`--json`).
//!
//! The renderer owns the alert feed: it observes exactly one settled reading
//! per poll settlement, so rebuilds triggered by the other inputs can never
//! duplicate alert entries.

use chrono::Utc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::surfaces::kpi::TrendDirection;
use crate::surfaces::{build_frame, AlertFeed, DashboardFrame, NO_ALERTS};
use crate::telemetry::PollState;
use crate::types::{ModeSelection, TrendSample};

const FRAME_DIVIDER: &str =
    "════════════════════════════════════════════════════════════════════";

/// Runs until cancelled or until any input channel closes.
pub async fn run_renderer(
    mut mode_rx: watch::Receiver<ModeSelection>,
    mut poll_rx: watch::Receiver<PollState>,
    mut history_rx: watch::Receiver<Vec<TrendSample>>,
    json_frames: bool,
    cancel_token: CancellationToken,
) {
    let mut alerts = AlertFeed::new();

    // First frame up front, so the terminal shows the Connecting state
    // before the first settlement lands.
    emit(&mode_rx, &poll_rx, &history_rx, &alerts, json_frames);

    loop {
        tokio::select! {
            () = cancel_token.cancelled() => {
                info!("[Renderer] Shutting down");
                return;
            }
            result = poll_rx.changed() => {
                if result.is_err() {
                    info!("[Renderer] Poll channel closed");
                    return;
                }
                let state = poll_rx.borrow_and_update().clone();
                alerts.observe(state.data.as_ref(), Utc::now());
                emit(&mode_rx, &poll_rx, &history_rx, &alerts, json_frames);
            }
            result = mode_rx.changed() => {
                if result.is_err() {
                    info!("[Renderer] Mode channel closed");
                    return;
                }
                let _ = mode_rx.borrow_and_update();
                emit(&mode_rx, &poll_rx, &history_rx, &alerts, json_frames);
            }
            result = history_rx.changed() => {
                if result.is_err() {
                    info!("[Renderer] History channel closed");
                    return;
                }
                let _ = history_rx.borrow_and_update();
                emit(&mode_rx, &poll_rx, &history_rx, &alerts, json_frames);
            }
        }
    }
}

fn emit(
    mode_rx: &watch::Receiver<ModeSelection>,
    poll_rx: &watch::Receiver<PollState>,
    history_rx: &watch::Receiver<Vec<TrendSample>>,
    alerts: &AlertFeed,
    json_frames: bool,
) {
    let selection = *mode_rx.borrow();
    let poll = poll_rx.borrow().clone();
    let history = history_rx.borrow().clone();
    let frame = build_frame(selection, &poll, &history, alerts, Utc::now());

    if json_frames {
        match serde_json::to_string(&frame) {
            Ok(line) => println!("{line}"),
            Err(e) => warn!("[Renderer] Failed to serialize frame: {}", e),
        }
    } else {
        println!("{}", format_frame(&frame));
    }
}

/// Formats one frame as a terminal text block.
pub fn format_frame(frame: &DashboardFrame) -> String {
    let mut lines = vec![
        FRAME_DIVIDER.to_string(),
        frame.headline.clone(),
        frame.subtitle.to_string(),
        format!(
            "{} | System Health: {:.2}%",
            frame.mode_badge, frame.system_health
        ),
        format!(
            "Data Feed: {} | Hydrate Risk: {} | Last Update: {}",
            frame.status.feed_label, frame.status.risk_line, frame.status.last_update
        ),
    ];

    if let Some(banner) = frame.kpis.banner {
        lines.push(format!("  * {banner}"));
    }
    for card in &frame.kpis.cards {
        let direction = match card.trend.direction {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
        };
        lines.push(format!(
            "  {:<14}{:<14}({} {:.2}%)  {}",
            card.label, card.value, direction, card.trend.value, card.description
        ));
    }

    lines.push(format!(
        "Risk Gauge: {} ({}, needle {:.1}°)",
        frame.gauge.value, frame.gauge.headline, frame.gauge.needle_angle
    ));

    let trend_suffix = match frame.trend.demo_label {
        Some(label) => format!(" [{label}]"),
        None => String::new(),
    };
    lines.push(format!(
        "{}: {} samples{}",
        frame.trend.title,
        frame.trend.samples.len(),
        trend_suffix
    ));
    lines.push(format!(
        "  Avg Temp {:.2}°C | Max Temp {:.2}°C | Avg Pressure {:.2} bar | Max Pressure {:.2} bar",
        frame.trend.stats.avg_temperature,
        frame.trend.stats.max_temperature,
        frame.trend.stats.avg_pressure,
        frame.trend.stats.max_pressure
    ));

    if frame.alerts.is_empty() {
        lines.push(format!("Recent Alerts: {NO_ALERTS}"));
    } else {
        lines.push(format!("Recent Alerts ({}):", frame.alerts.len()));
        for alert in &frame.alerts {
            lines.push(format!("  [{}] {} ({})", alert.level, alert.message, alert.time));
        }
    }

    lines.join("\n")
}
