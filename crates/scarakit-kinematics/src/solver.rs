//! Forward and inverse kinematics
//!
//! Inverse kinematics always computes both arm configurations. A configuration is
//! reported as `None` when the point lies outside the reachable annulus or when the
//! solved angles break a joint limit.

use crate::arm::ArmGeometry;
use scarakit_core::{map_angle_deg, ArmConfiguration, GeometryError, JointAngles, ToolPosition};

/// Both inverse kinematics solutions for one tool position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InverseSolution {
    pub left: Option<JointAngles>,
    pub right: Option<JointAngles>,
}

impl InverseSolution {
    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn get(&self, configuration: ArmConfiguration) -> Option<JointAngles> {
        match configuration {
            ArmConfiguration::Left => self.left,
            ArmConfiguration::Right => self.right,
        }
    }

    pub fn can_reach(&self, configuration: ArmConfiguration) -> bool {
        self.get(configuration).is_some()
    }

    /// True if at least one configuration reaches the point.
    pub fn is_reachable(&self) -> bool {
        self.left.is_some() || self.right.is_some()
    }

    /// The reachable solution needing the least joint travel from `current`.
    /// Ties go to the LEFT configuration.
    pub fn closest_to(&self, current: &JointAngles) -> Option<(ArmConfiguration, JointAngles)> {
        match (self.left, self.right) {
            (Some(l), Some(r)) => {
                if current.travel_to(&r) < current.travel_to(&l) {
                    Some((ArmConfiguration::Right, r))
                } else {
                    Some((ArmConfiguration::Left, l))
                }
            }
            (Some(l), None) => Some((ArmConfiguration::Left, l)),
            (None, Some(r)) => Some((ArmConfiguration::Right, r)),
            (None, None) => None,
        }
    }
}

/// Kinematics for one arm geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct KinematicsSolver {
    geometry: ArmGeometry,
}

impl KinematicsSolver {
    pub fn new(geometry: ArmGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &ArmGeometry {
        &self.geometry
    }

    /// Tool position for a pair of joint angles. No limit checks.
    pub fn forward(&self, angles: &JointAngles) -> ToolPosition {
        let l1 = self.geometry.inner_arm_length;
        let l2 = self.geometry.outer_arm_length;
        let t1 = angles.theta1_deg.to_radians();
        let t12 = t1 + angles.theta2_deg.to_radians();
        ToolPosition::new(
            l1 * t1.cos() + l2 * t12.cos(),
            l1 * t1.sin() + l2 * t12.sin(),
        )
    }

    /// Like [`forward`](Self::forward) but rejects angles outside the joint limits.
    pub fn forward_checked(&self, angles: &JointAngles) -> Result<ToolPosition, GeometryError> {
        if !self.geometry.within_joint_limits(angles) {
            return Err(GeometryError::JointLimit {
                theta1_deg: angles.theta1_deg,
                theta2_deg: angles.theta2_deg,
            });
        }
        Ok(self.forward(angles))
    }

    pub fn inverse(&self, position: &ToolPosition) -> InverseSolution {
        let radius = position.radius();
        if !self.geometry.in_annulus(radius) {
            tracing::debug!(
                "{} outside annulus [{:.3}, {:.3}]",
                position,
                self.geometry.lmin(),
                self.geometry.lmax()
            );
            return InverseSolution::unreachable();
        }

        let l1 = self.geometry.inner_arm_length;
        let l2 = self.geometry.outer_arm_length;
        let cos_theta2 = ((radius * radius - l1 * l1 - l2 * l2) / (2.0 * l1 * l2)).clamp(-1.0, 1.0);
        let bend = cos_theta2.acos();

        let solve = |configuration: ArmConfiguration| -> Option<JointAngles> {
            let theta2 = configuration.elbow_sign() * bend;
            let theta1 = position.y.atan2(position.x)
                - (l2 * theta2.sin()).atan2(l1 + l2 * theta2.cos());
            let angles = JointAngles::new(
                map_angle_deg(theta1.to_degrees()),
                map_angle_deg(theta2.to_degrees()),
            );
            if self.geometry.within_joint_limits(&angles) {
                Some(angles)
            } else {
                tracing::debug!("{} arm exceeds joint limits at {}", configuration, position);
                None
            }
        };

        InverseSolution {
            left: solve(ArmConfiguration::Left),
            right: solve(ArmConfiguration::Right),
        }
    }

    /// Solves a single point for a forced configuration, or for the least-motion one.
    pub fn solve_point(
        &self,
        position: &ToolPosition,
        configuration: Option<ArmConfiguration>,
        current: &JointAngles,
    ) -> Result<(ArmConfiguration, JointAngles), GeometryError> {
        let solution = self.inverse(position);
        match configuration {
            Some(config) => solution.get(config).map(|a| (config, a)).ok_or_else(|| {
                GeometryError::ConfigurationUnreachable {
                    configuration: config.to_string(),
                    x: position.x,
                    y: position.y,
                }
            }),
            None => solution
                .closest_to(current)
                .ok_or(GeometryError::Unreachable {
                    x: position.x,
                    y: position.y,
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn solver() -> KinematicsSolver {
        KinematicsSolver::new(ArmGeometry::default())
    }

    #[test]
    fn test_forward_home_is_fully_extended() {
        let p = solver().forward(&JointAngles::home());
        assert!(p.approx_eq(&ToolPosition::new(600.0, 0.0), EPS));
    }

    #[test]
    fn test_forward_right_angle_elbow() {
        let p = solver().forward(&JointAngles::new(0.0, 90.0));
        assert!(p.approx_eq(&ToolPosition::new(350.0, 250.0), EPS));
    }

    #[test]
    fn test_forward_checked_rejects_out_of_limit_angles() {
        let err = solver()
            .forward_checked(&JointAngles::new(0.0, 175.0))
            .unwrap_err();
        assert!(matches!(err, GeometryError::JointLimit { .. }));
    }

    #[test]
    fn test_inverse_point_on_x_axis() {
        // L = 350: interior elbow angle acos(0.3571) = 69.08 deg, elbow angle 180 - 69.08
        let s = solver();
        let target = ToolPosition::new(350.0, 0.0);
        let solution = s.inverse(&target);

        let left = solution.left.expect("left reachable");
        let right = solution.right.expect("right reachable");
        assert!((right.theta2_deg - 110.9248).abs() < 1e-3, "{}", right);
        assert!((left.theta2_deg + 110.9248).abs() < 1e-3, "{}", left);
        assert!((right.theta1_deg + left.theta1_deg).abs() < EPS);
        assert!(right.theta1_deg < 0.0);

        assert!(s.forward(&left).approx_eq(&target, EPS));
        assert!(s.forward(&right).approx_eq(&target, EPS));
    }

    #[test]
    fn test_inverse_outside_annulus() {
        let s = solver();
        assert!(!s.inverse(&ToolPosition::new(700.0, 0.0)).is_reachable());
        assert!(!s.inverse(&ToolPosition::new(50.0, 50.0)).is_reachable());
        assert!(!s.inverse(&ToolPosition::new(0.0, 0.0)).is_reachable());
    }

    #[test]
    fn test_inverse_joint_limit_blocks_one_configuration() {
        // Fully extended directly behind the base: the shoulder would need 180 deg.
        let s = solver();
        let solution = s.inverse(&ToolPosition::new(-600.0, 0.0));
        assert!(!solution.is_reachable());

        // Behind and slightly to the side: only one branch keeps the shoulder within 150 deg.
        let solution = s.inverse(&ToolPosition::new(-450.0, 150.0));
        assert_ne!(solution.left.is_some(), solution.right.is_some());
    }

    #[test]
    fn test_fully_extended_configurations_coincide() {
        let solution = solver().inverse(&ToolPosition::new(0.0, 600.0));
        let left = solution.left.unwrap();
        let right = solution.right.unwrap();
        assert!((left.theta1_deg - 90.0).abs() < EPS);
        assert!(left.theta2_deg.abs() < EPS);
        assert!((left.theta1_deg - right.theta1_deg).abs() < EPS);
    }

    #[test]
    fn test_closest_to_prefers_least_travel() {
        let s = solver();
        let solution = s.inverse(&ToolPosition::new(350.0, 0.0));
        let right = solution.right.unwrap();
        let (config, angles) = solution.closest_to(&right).unwrap();
        assert_eq!(config, ArmConfiguration::Right);
        assert_eq!(angles, right);

        // From home both are equally far; LEFT wins the tie.
        let (config, _) = solution.closest_to(&JointAngles::home()).unwrap();
        assert_eq!(config, ArmConfiguration::Left);
    }

    #[test]
    fn test_solve_point_forced_configuration() {
        let s = solver();
        let target = ToolPosition::new(-450.0, 150.0);
        let solution = s.inverse(&target);
        let blocked = if solution.left.is_none() {
            ArmConfiguration::Left
        } else {
            ArmConfiguration::Right
        };
        let err = s
            .solve_point(&target, Some(blocked), &JointAngles::home())
            .unwrap_err();
        assert!(matches!(err, GeometryError::ConfigurationUnreachable { .. }));

        let (config, _) = s
            .solve_point(&target, Some(blocked.other()), &JointAngles::home())
            .unwrap();
        assert_eq!(config, blocked.other());
    }
}
