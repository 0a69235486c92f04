//! Round-trip and reachability properties of the inverse kinematics solver

use proptest::prelude::*;
use scarakit_core::{ArmConfiguration, ToolPosition};
use scarakit_kinematics::{ArmGeometry, KinematicsSolver};

fn solver() -> KinematicsSolver {
    KinematicsSolver::new(ArmGeometry::default())
}

fn polar(radius: f64, angle_deg: f64) -> ToolPosition {
    let (s, c) = angle_deg.to_radians().sin_cos();
    ToolPosition::new(radius * c, radius * s)
}

proptest! {
    // Angles are kept within +/-100 deg of the x axis so both branches respect the
    // shoulder limit; the annulus test alone does not guarantee it behind the base.
    #[test]
    fn inverse_solutions_round_trip_through_forward(
        fraction in 0.001f64..0.999,
        angle in -100.0f64..100.0,
    ) {
        let s = solver();
        let geometry = s.geometry();
        let radius = geometry.lmin() + fraction * (geometry.lmax() - geometry.lmin());
        let target = polar(radius, angle);

        let solution = s.inverse(&target);
        for config in ArmConfiguration::ALL {
            let angles = solution.get(config);
            prop_assert!(angles.is_some(), "{} unreachable for {}", config, target);
            let back = s.forward(&angles.unwrap());
            prop_assert!(back.approx_eq(&target, 1e-6), "{} -> {}", target, back);
        }
    }

    #[test]
    fn solutions_always_respect_joint_limits(
        x in -700.0f64..700.0,
        y in -700.0f64..700.0,
    ) {
        let s = solver();
        let solution = s.inverse(&ToolPosition::new(x, y));
        for config in ArmConfiguration::ALL {
            if let Some(angles) = solution.get(config) {
                prop_assert!(s.geometry().within_joint_limits(&angles));
                prop_assert!(s.forward(&angles).approx_eq(&ToolPosition::new(x, y), 1e-6));
            }
        }
    }

    #[test]
    fn points_inside_min_radius_are_unreachable(
        fraction in 0.0f64..0.999,
        angle in -180.0f64..180.0,
    ) {
        let s = solver();
        let target = polar(fraction * s.geometry().lmin(), angle);
        let solution = s.inverse(&target);
        prop_assert!(!solution.can_reach(ArmConfiguration::Left));
        prop_assert!(!solution.can_reach(ArmConfiguration::Right));
    }

    #[test]
    fn points_beyond_max_radius_are_unreachable(
        extra in 0.001f64..500.0,
        angle in -180.0f64..180.0,
    ) {
        let s = solver();
        let target = polar(s.geometry().lmax() + extra, angle);
        prop_assert!(!s.inverse(&target).is_reachable());
    }
}
