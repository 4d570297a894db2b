//! Interactive control channel
//!
//! Reads line-oriented commands from stdin and applies them to the mode
//! store while the dashboard runs:
//!
//!   mode offshore|onshore
//!   simulation on|off
//!   demo on|off
//!   status
//!   quit
//!
//! Unknown or malformed commands are logged and skipped; they never stop
//! the channel.

use std::str::FromStr;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::mode_store::ModeStore;
use crate::types::Mode;

/// One parsed control line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    SetMode(Mode),
    SetSimulation(bool),
    SetDemo(bool),
    Status,
    Quit,
}

/// Parses one trimmed, non-empty control line.
pub fn parse_command(line: &str) -> Result<ControlCommand, String> {
    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or_default().to_ascii_lowercase();

    match verb.as_str() {
        "mode" => {
            let arg = parts
                .next()
                .ok_or_else(|| "mode requires an argument: offshore or onshore".to_string())?;
            Ok(ControlCommand::SetMode(Mode::from_str(arg)?))
        }
        "simulation" => Ok(ControlCommand::SetSimulation(parse_toggle("simulation", parts.next())?)),
        "demo" => Ok(ControlCommand::SetDemo(parse_toggle("demo", parts.next())?)),
        "status" => Ok(ControlCommand::Status),
        "quit" | "exit" => Ok(ControlCommand::Quit),
        other => Err(format!(
            "Unknown command '{other}' (expected mode, simulation, demo, status, or quit)"
        )),
    }
}

fn parse_toggle(verb: &str, arg: Option<&str>) -> Result<bool, String> {
    match arg.map(str::to_ascii_lowercase).as_deref() {
        Some("on") => Ok(true),
        Some("off") => Ok(false),
        _ => Err(format!("{verb} requires 'on' or 'off'")),
    }
}

/// Background task: apply stdin commands to the mode store.
///
/// Exits on `quit` (which also cancels the whole process), on stdin EOF, or
/// on cancellation.
pub async fn run_control_channel(store: ModeStore, cancel_token: CancellationToken) {
    let mut reader = BufReader::new(tokio::io::stdin());
    let mut line_buffer = String::with_capacity(256);

    loop {
        line_buffer.clear();
        tokio::select! {
            () = cancel_token.cancelled() => {
                info!("[Control] Shutting down");
                return;
            }
            result = reader.read_line(&mut line_buffer) => {
                match result {
                    Ok(0) => {
                        info!("[Control] stdin closed, control channel ending");
                        return;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!("[Control] Failed to read stdin: {}", e);
                        return;
                    }
                }
            }
        }

        let line = line_buffer.trim();
        if line.is_empty() {
            continue;
        }

        match parse_command(line) {
            Ok(ControlCommand::SetMode(mode)) => store.set_mode(mode),
            Ok(ControlCommand::SetSimulation(enabled)) => store.set_simulation_mode(enabled),
            Ok(ControlCommand::SetDemo(enabled)) => store.set_demo_mode(enabled),
            Ok(ControlCommand::Status) => {
                let selection = store.current();
                info!(
                    "[Control] mode={} simulation_mode={} demo_mode={}",
                    selection.mode, selection.simulation_mode, selection.demo_mode
                );
            }
            Ok(ControlCommand::Quit) => {
                info!("[Control] Quit requested");
                cancel_token.cancel();
                return;
            }
            Err(e) => warn!("[Control] {}", e),
        }
    }
}
