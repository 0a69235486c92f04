//! # ScaraKit Kinematics
//!
//! Closed-form kinematics for a two-link planar arm:
//! - **Forward kinematics**: joint angles to tool position
//! - **Inverse kinematics**: tool position to LEFT/RIGHT joint solutions with
//!   workspace annulus and joint limit checks
//! - **Path validation**: all-or-nothing reachability of a sampled path and the
//!   joint travel it needs under each configuration

pub mod arm;
pub mod solver;
pub mod validator;

pub use arm::{ArmGeometry, ArmGeometryError};
pub use solver::{InverseSolution, KinematicsSolver};
pub use validator::{PathCheck, PathCheckResult, PathValidator};
