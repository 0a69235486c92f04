//! Configuration and settings management for ScaraKit
//!
//! Configuration is organized into logical sections:
//! - Arm geometry (link lengths, joint limits)
//! - Controller connection (host, port, pacing)
//! - Path defaults (resolution, automatic pen handling)
//! - Logging (log file, level)
//!
//! Every section falls back to its defaults, so a file only needs the keys it changes.

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use scarakit_communication::ConnectionParams;
use scarakit_designer::Resolution;
use scarakit_kinematics::ArmGeometry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Arm geometry settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmSettings {
    /// Shoulder-to-elbow length
    pub inner_arm_length: f64,
    /// Elbow-to-tool length
    pub outer_arm_length: f64,
    /// Shoulder joint limit in degrees
    pub theta1_max_deg: f64,
    /// Elbow joint limit in degrees
    pub theta2_max_deg: f64,
}

impl Default for ArmSettings {
    fn default() -> Self {
        let arm = ArmGeometry::default();
        Self {
            inner_arm_length: arm.inner_arm_length,
            outer_arm_length: arm.outer_arm_length,
            theta1_max_deg: arm.theta1_max_deg,
            theta2_max_deg: arm.theta2_max_deg,
        }
    }
}

impl ArmSettings {
    pub fn to_geometry(&self) -> ConfigResult<ArmGeometry> {
        ArmGeometry::new(
            self.inner_arm_length,
            self.outer_arm_length,
            self.theta1_max_deg,
            self.theta2_max_deg,
        )
        .map_err(|e| ConfigError::InvalidArm(e.to_string()))
    }
}

/// Controller connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    /// Controller host name or address
    pub host: String,
    /// Controller TCP port
    pub port: u16,
    /// Connection timeout in milliseconds
    pub timeout_ms: u64,
    /// Pause after every command in milliseconds
    pub send_delay_ms: u64,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        let params = ConnectionParams::default();
        Self {
            host: params.host,
            port: params.port,
            timeout_ms: params.timeout_ms,
            send_delay_ms: params.send_delay_ms,
        }
    }
}

impl ConnectionSettings {
    pub fn to_params(&self) -> ConnectionParams {
        ConnectionParams {
            host: self.host.clone(),
            port: self.port,
            timeout_ms: self.timeout_ms,
            send_delay_ms: self.send_delay_ms,
        }
    }
}

/// Path generation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Resolution used when a shape command does not name one
    pub default_resolution: Resolution,
    /// Lift the pen, move to the start, lower it, trace and lift again for every shape
    pub auto_pen: bool,
    /// Largest joint step allowed between consecutive samples, unlimited when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_joint_step_deg: Option<f64>,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            default_resolution: Resolution::Medium,
            auto_pen: true,
            max_joint_step_deg: None,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Operator log, truncated at the start of every run
    pub log_file: PathBuf,
    /// Default tracing level when RUST_LOG is not set
    pub level: String,
    /// Echo operator diagnostics to the console as well as the log file
    pub mirror_console: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("log.txt"),
            level: "info".to_string(),
            mirror_console: true,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub arm: ArmSettings,
    pub connection: ConnectionSettings,
    pub paths: PathSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config_dir>/scarakit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("scarakit").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::LoadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Like [`load_from_file`](Self::load_from_file), but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| SettingsError::SaveError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        self.arm.to_geometry()?;

        if self.connection.host.trim().is_empty() {
            return Err(out_of_range("connection.host", "<empty>"));
        }
        if self.connection.port == 0 {
            return Err(out_of_range("connection.port", 0));
        }
        if self.connection.timeout_ms == 0 {
            return Err(out_of_range("connection.timeout_ms", 0));
        }

        if let Some(step) = self.paths.max_joint_step_deg {
            if !step.is_finite() || step <= 0.0 {
                return Err(out_of_range("paths.max_joint_step_deg", step));
            }
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(out_of_range("logging.level", &self.logging.level));
        }

        Ok(())
    }
}

fn out_of_range(key: &str, value: impl ToString) -> ConfigError {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
}
