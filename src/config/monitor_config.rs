//! Monitor configuration loaded from TOML
//!
//! Every tunable of the monitoring binary is a field here. Each section
//! implements `Default` with the built-in constants, so a missing or partial
//! config file always yields a working setup.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use crate::types::Mode;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one monitor deployment.
///
/// Load with `MonitorConfig::load()` which searches:
/// 1. `$HYDRATEWATCH_CONFIG` env var
/// 2. `./hydratewatch.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// Backend connection settings
    #[serde(default)]
    pub backend: BackendConfig,

    /// Poll cadence and history depth
    #[serde(default)]
    pub poll: PollConfig,

    /// Console output settings
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            poll: PollConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl MonitorConfig {
    /// Load configuration using the standard search order:
    /// 1. `$HYDRATEWATCH_CONFIG` environment variable
    /// 2. `./hydratewatch.toml` in the current working directory
    /// 3. Built-in defaults
    ///
    /// After loading, `HYDRATEWATCH_API_TOKEN` overrides the configured API
    /// token so deployments can keep the secret out of the file.
    pub fn load() -> Self {
        let mut config = Self::load_file_or_defaults();
        config.apply_env_overrides();
        config
    }

    fn load_file_or_defaults() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var("HYDRATEWATCH_CONFIG") {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded monitor config from HYDRATEWATCH_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from HYDRATEWATCH_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "HYDRATEWATCH_CONFIG points to non-existent file, falling back");
            }
        }

        // 2. Check ./hydratewatch.toml
        let local = PathBuf::from("hydratewatch.toml");
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded monitor config from ./hydratewatch.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./hydratewatch.toml, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No hydratewatch.toml found — using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var("HYDRATEWATCH_API_TOKEN") {
            if !token.is_empty() {
                self.backend.api_token = token;
                info!("API token taken from HYDRATEWATCH_API_TOKEN");
            }
        }
    }

    /// Validate the configuration for internal consistency.
    ///
    /// Rules:
    /// - Poll interval and request timeout must be non-zero
    /// - History limit must be non-zero
    /// - Backend base URL must be an http(s) URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        if self.poll.refresh_interval_ms == 0 {
            errors.push("poll.refresh_interval_ms must be greater than 0".to_string());
        }
        if self.poll.history_limit == 0 {
            errors.push("poll.history_limit must be greater than 0".to_string());
        }
        if self.backend.request_timeout_secs == 0 {
            errors.push("backend.request_timeout_secs must be greater than 0".to_string());
        }
        if !self.backend.base_url.starts_with("http://")
            && !self.backend.base_url.starts_with("https://")
        {
            errors.push(format!(
                "backend.base_url must start with http:// or https:// (got '{}')",
                self.backend.base_url
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Backend connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the telemetry backend (without the API prefix)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token attached to every request. Usually supplied via
    /// `HYDRATEWATCH_API_TOKEN` rather than the file.
    #[serde(default)]
    pub api_token: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_token: String::new(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

/// Poll cadence and history depth.
#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    /// Interval between latest-reading polls (ms)
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,

    /// Readings requested from the history endpoint per mode selection
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: default_refresh_interval_ms(),
            history_limit: default_history_limit(),
        }
    }
}

/// Console output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Mode selected at startup
    #[serde(default)]
    pub initial_mode: Mode,

    /// Emit one JSON object per dashboard frame instead of text blocks
    #[serde(default)]
    pub json_frames: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            initial_mode: Mode::default(),
            json_frames: false,
        }
    }
}

fn default_base_url() -> String {
    defaults::BACKEND_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    defaults::HTTP_TIMEOUT_SECS
}

fn default_refresh_interval_ms() -> u64 {
    defaults::REFRESH_INTERVAL_MS
}

fn default_history_limit() -> usize {
    defaults::HISTORY_LIMIT
}

// ============================================================================
// Errors
// ============================================================================

/// Errors from loading or validating a config file.
#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_validates() {
        let config = MonitorConfig::default();
        assert!(config.validate().is_ok(), "Default config must always validate");
    }

    #[test]
    fn test_empty_toml_produces_defaults() {
        let config: MonitorConfig = toml::from_str("").expect("empty TOML should parse");
        assert_eq!(config.poll.refresh_interval_ms, 5_000);
        assert_eq!(config.poll.history_limit, 50);
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert_eq!(config.backend.request_timeout_secs, 30);
        assert_eq!(config.display.initial_mode, Mode::Offshore);
        assert!(!config.display.json_frames);
    }

    #[test]
    fn test_partial_toml_override() {
        let toml_str = r#"
[backend]
base_url = "https://telemetry.example.com"

[poll]
refresh_interval_ms = 1000
"#;
        let config: MonitorConfig = toml::from_str(toml_str).expect("partial TOML should parse");
        // Overridden values
        assert_eq!(config.backend.base_url, "https://telemetry.example.com");
        assert_eq!(config.poll.refresh_interval_ms, 1000);
        // Non-overridden values retain defaults
        assert_eq!(config.poll.history_limit, 50);
        assert_eq!(config.backend.request_timeout_secs, 30);
    }

    #[test]
    fn test_initial_mode_parses_from_toml() {
        let config: MonitorConfig =
            toml::from_str("[display]\ninitial_mode = \"onshore\"").expect("should parse");
        assert_eq!(config.display.initial_mode, Mode::Onshore);
    }

    #[test]
    fn test_validation_catches_zero_interval() {
        let mut config = MonitorConfig::default();
        config.poll.refresh_interval_ms = 0;
        let result = config.validate();
        assert!(result.is_err(), "Zero poll interval should fail validation");
        if let Err(ConfigError::Validation(errors)) = result {
            assert!(errors.iter().any(|e| e.contains("refresh_interval_ms")));
        }
    }

    #[test]
    fn test_validation_catches_bad_base_url() {
        let mut config = MonitorConfig::default();
        config.backend.base_url = "telemetry.example.com".to_string();
        assert!(config.validate().is_err(), "URL without scheme should fail");
    }

    #[test]
    fn test_load_from_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "[backend]\nbase_url = \"http://10.0.0.5:8000\"\n\n[poll]\nhistory_limit = 120"
        )
        .expect("write config");

        let config = MonitorConfig::load_from_file(file.path()).expect("should load");
        assert_eq!(config.backend.base_url, "http://10.0.0.5:8000");
        assert_eq!(config.poll.history_limit, 120);
    }

    #[test]
    fn test_load_from_file_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[poll]\nrefresh_interval_ms = 0").expect("write config");

        let result = MonitorConfig::load_from_file(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
