//! Operating mode selection and its display metadata

use serde::{Deserialize, Serialize};

/// Operating environment for the telemetry feed.
///
/// Exactly one mode is active at a time; selecting a mode restarts the
/// telemetry poll cycle against that mode's feed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Offshore,
    Onshore,
}

impl Mode {
    /// Path segment used by the sensors API (`/sensors/latest/{mode}`).
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Offshore => "offshore",
            Mode::Onshore => "onshore",
        }
    }

    /// Short display title.
    pub fn title(self) -> &'static str {
        match self {
            Mode::Offshore => "Offshore",
            Mode::Onshore => "Onshore",
        }
    }

    /// One-line description of the operating environment.
    pub fn description(self) -> &'static str {
        match self {
            Mode::Offshore => "High-pressure, low-temperature subsea pipeline conditions",
            Mode::Onshore => "Ambient temperature with operational flow control",
        }
    }

    /// Dashboard subtitle for this environment.
    pub fn monitoring_summary(self) -> &'static str {
        match self {
            Mode::Offshore => {
                "Real-time monitoring under high-pressure, low-temperature subsea conditions."
            }
            Mode::Onshore => {
                "Real-time monitoring influenced by ambient temperature and operational control."
            }
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "offshore" => Ok(Mode::Offshore),
            "onshore" => Ok(Mode::Onshore),
            other => Err(format!(
                "Mode must be 'offshore' or 'onshore', got '{other}'"
            )),
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Offshore
    }
}

/// The full mode selection shared across the system.
///
/// The two toggles are independent of each other and of `mode`; neither
/// affects which feed is polled. They parameterize the upload and
/// demo-generation collaborators outside this data layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModeSelection {
    pub mode: Mode,
    pub simulation_mode: bool,
    pub demo_mode: bool,
}

impl Default for ModeSelection {
    fn default() -> Self {
        Self {
            mode: Mode::Offshore,
            simulation_mode: false,
            demo_mode: false,
        }
    }
}
