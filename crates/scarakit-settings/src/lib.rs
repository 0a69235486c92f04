//! ScaraKit Settings Crate
//!
//! Arm geometry, controller connection, path defaults and logging options,
//! loaded from JSON or TOML.

pub mod config;
pub mod error;

pub use config::{ArmSettings, Config, ConnectionSettings, LoggingSettings, PathSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
