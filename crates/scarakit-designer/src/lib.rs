//! # ScaraKit Designer
//!
//! Turns drawing primitives into ordered sample sequences for the arm.
//!
//! Every generator produces a fixed-length `Vec<ToolPosition>`; the number of samples
//! is decided by the [`Resolution`] policy from the shape's length before any point
//! is generated.

pub mod model;
pub mod resolution;

pub use model::{
    ArcPath, LinePath, PathShape, QuadraticBezierPath, RectanglePath, Shape, TrianglePath,
};
pub use resolution::{
    num_path_points, ParseResolutionError, Resolution, MAX_PATH_POINTS, MIN_PATH_POINTS,
};
