//! Geometry value types
//!
//! Plain `Copy` values shared by the kinematics solver, the path generators,
//! and the command dispatcher.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cartesian coordinates of the tool tip in workspace units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ToolPosition {
    pub x: f64,
    pub y: f64,
}

impl ToolPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance from the shoulder joint (the origin).
    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance_to(&self, other: &ToolPosition) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Linear interpolation, `t = 0` gives `self` and `t = 1` gives `other`.
    pub fn lerp(&self, other: &ToolPosition, t: f64) -> ToolPosition {
        ToolPosition::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn approx_eq(&self, other: &ToolPosition, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl fmt::Display for ToolPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Shoulder and elbow angles in degrees.
///
/// `theta1_deg` is measured from the fixed base frame, `theta2_deg` relative to the inner arm.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JointAngles {
    pub theta1_deg: f64,
    pub theta2_deg: f64,
}

impl JointAngles {
    pub fn new(theta1_deg: f64, theta2_deg: f64) -> Self {
        Self {
            theta1_deg,
            theta2_deg,
        }
    }

    /// The home position, both links along the x axis.
    pub fn home() -> Self {
        Self::default()
    }

    /// Sum of the absolute joint changes needed to move from `self` to `other`.
    pub fn travel_to(&self, other: &JointAngles) -> f64 {
        (other.theta1_deg - self.theta1_deg).abs() + (other.theta2_deg - self.theta2_deg).abs()
    }
}

impl fmt::Display for JointAngles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "theta1 = {:.2} deg, theta2 = {:.2} deg",
            self.theta1_deg, self.theta2_deg
        )
    }
}

/// The two inverse kinematics solution branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ArmConfiguration {
    /// Elbow to the left of the shoulder-to-tool ray (negative elbow angle)
    Left,
    /// Elbow to the right of the shoulder-to-tool ray (positive elbow angle)
    Right,
}

impl ArmConfiguration {
    pub const ALL: [ArmConfiguration; 2] = [ArmConfiguration::Left, ArmConfiguration::Right];

    /// Sign applied to the elbow angle for this branch.
    pub fn elbow_sign(&self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl fmt::Display for ArmConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "LEFT"),
            Self::Right => write!(f, "RIGHT"),
        }
    }
}

impl std::str::FromStr for ArmConfiguration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LEFT" => Ok(Self::Left),
            "RIGHT" => Ok(Self::Right),
            _ => Err(format!("Unknown arm configuration: {}", s)),
        }
    }
}
