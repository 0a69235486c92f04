//! # ScaraKit
//!
//! Drives a two-link SCARA robot from a file of drawing commands.
//!
//! ## Architecture
//!
//! ScaraKit is organized as a workspace with multiple crates:
//!
//! 1. **scarakit-core** - Geometry types, coordinate transform, errors, report sinks
//! 2. **scarakit-kinematics** - Forward/inverse kinematics and path validation
//! 3. **scarakit-designer** - Line, arc, polygon and Bezier path generators
//! 4. **scarakit-communication** - Controller line protocol and TCP transport
//! 5. **scarakit-settings** - JSON/TOML configuration
//! 6. **scarakit-commands** - Command file parsing and the dispatcher state machine
//! 7. **scarakit** - Command line entry point that wires the crates together

pub mod cli;

pub use cli::{run, Cli};

pub use scarakit_commands::{
    CommandDispatcher, DispatchOptions, LineOutcome, LineState, RunSummary, Session,
};
pub use scarakit_communication::{
    Communicator, ConnectionParams, NoOpCommunicator, RobotCommand, TcpCommunicator,
};
pub use scarakit_core::{
    ArmConfiguration, Error, JointAngles, Reporter, Result, ToolPosition, TransformMatrix,
};
pub use scarakit_designer::{PathShape, Resolution, Shape};
pub use scarakit_kinematics::{ArmGeometry, KinematicsSolver, PathValidator};
pub use scarakit_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging on stderr with:
/// - RUST_LOG environment variable support, falling back to `default_level`
/// - Target, level and line numbers on every event
///
/// Stdout is left to the operator console.
pub fn init_logging(default_level: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)?,
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
