//! # ScaraKit Core
//!
//! Core types and utilities for ScaraKit.
//! Provides the geometry value types, the accumulated coordinate transform,
//! the error taxonomy, and the diagnostic report sinks shared by every crate.

pub mod angles;
pub mod error;
pub mod geometry;
pub mod report;
pub mod transform;

pub use angles::{map_angle_deg, nint};
pub use error::{CommandError, ConnectionError, Error, GeometryError, Result};
pub use geometry::{ArmConfiguration, JointAngles, ToolPosition};
pub use report::{ConsoleSink, FanoutReporter, LogFileSink, MemorySink, Reporter};
pub use transform::TransformMatrix;
