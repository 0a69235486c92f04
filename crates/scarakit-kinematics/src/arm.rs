//! Physical description of the two-link arm

use scarakit_core::JointAngles;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Slack used for limit comparisons so that points exactly on a boundary are accepted.
pub const LIMIT_TOLERANCE: f64 = 1e-9;

/// Errors raised when an arm description is physically meaningless.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArmGeometryError {
    /// A link length is zero, negative, or not finite.
    #[error("Invalid {link} length: {value}")]
    InvalidLinkLength { link: &'static str, value: f64 },

    /// A joint limit is outside (0, 180] degrees.
    #[error("Invalid {joint} limit: {value} deg (valid: 0..=180)")]
    InvalidJointLimit { joint: &'static str, value: f64 },
}

/// Link lengths and joint limits of a SCARA arm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArmGeometry {
    /// Shoulder-to-elbow length (L1)
    pub inner_arm_length: f64,
    /// Elbow-to-tool length (L2)
    pub outer_arm_length: f64,
    /// Maximum magnitude of the shoulder angle in degrees
    pub theta1_max_deg: f64,
    /// Maximum magnitude of the elbow angle in degrees
    pub theta2_max_deg: f64,
}

impl Default for ArmGeometry {
    fn default() -> Self {
        Self {
            inner_arm_length: 350.0,
            outer_arm_length: 250.0,
            theta1_max_deg: 150.0,
            theta2_max_deg: 170.0,
        }
    }
}

impl ArmGeometry {
    pub fn new(
        inner_arm_length: f64,
        outer_arm_length: f64,
        theta1_max_deg: f64,
        theta2_max_deg: f64,
    ) -> Result<Self, ArmGeometryError> {
        let geometry = Self {
            inner_arm_length,
            outer_arm_length,
            theta1_max_deg,
            theta2_max_deg,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    pub fn validate(&self) -> Result<(), ArmGeometryError> {
        for (link, value) in [
            ("inner arm", self.inner_arm_length),
            ("outer arm", self.outer_arm_length),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ArmGeometryError::InvalidLinkLength { link, value });
            }
        }
        for (joint, value) in [
            ("shoulder", self.theta1_max_deg),
            ("elbow", self.theta2_max_deg),
        ] {
            if !value.is_finite() || value <= 0.0 || value > 180.0 {
                return Err(ArmGeometryError::InvalidJointLimit { joint, value });
            }
        }
        Ok(())
    }

    /// Maximum reach, arm fully extended.
    pub fn lmax(&self) -> f64 {
        self.inner_arm_length + self.outer_arm_length
    }

    /// Closest approach to the shoulder with the elbow at its maximum bend.
    pub fn lmin(&self) -> f64 {
        let l1 = self.inner_arm_length;
        let l2 = self.outer_arm_length;
        let bend = std::f64::consts::PI - self.theta2_max_deg.to_radians();
        (l1 * l1 + l2 * l2 - 2.0 * l1 * l2 * bend.cos()).max(0.0).sqrt()
    }

    /// True if `radius` lies inside the reachable annulus.
    pub fn in_annulus(&self, radius: f64) -> bool {
        radius >= self.lmin() - LIMIT_TOLERANCE && radius <= self.lmax() + LIMIT_TOLERANCE
    }

    pub fn within_joint_limits(&self, angles: &JointAngles) -> bool {
        angles.theta1_deg.abs() <= self.theta1_max_deg + LIMIT_TOLERANCE
            && angles.theta2_deg.abs() <= self.theta2_max_deg + LIMIT_TOLERANCE
    }
}
