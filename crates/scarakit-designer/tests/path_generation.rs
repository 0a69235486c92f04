use proptest::prelude::*;
use scarakit_core::{GeometryError, JointAngles, ToolPosition, TransformMatrix};
use scarakit_designer::{
    num_path_points, ArcPath, LinePath, PathShape, QuadraticBezierPath, RectanglePath,
    Resolution, Shape, TrianglePath, MAX_PATH_POINTS,
};
use scarakit_kinematics::{KinematicsSolver, PathValidator};

fn reach(solver: &KinematicsSolver) -> f64 {
    solver.geometry().lmax()
}

#[test]
fn test_triangle_with_vertex_outside_workspace_is_rejected() {
    let solver = KinematicsSolver::default();
    let tri = Shape::Triangle(TrianglePath::new(
        ToolPosition::new(300.0, 0.0),
        ToolPosition::new(400.0, 100.0),
        ToolPosition::new(700.0, 0.0),
    ));
    let err = tri
        .transformed_samples(&TransformMatrix::identity(), Resolution::Medium, reach(&solver))
        .unwrap_err();
    assert_eq!(
        err,
        GeometryError::OutsideWorkspace {
            shape: "TRIANGLE".to_string(),
            x: 700.0,
            y: 0.0,
            reach: 600.0,
        }
    );
}

#[test]
fn test_triangle_through_inner_hole_is_not_drawable() {
    // every vertex is within reach but the edge from (300, 0) to (-300, 0) crosses the base
    let solver = KinematicsSolver::default();
    let tri = Shape::Triangle(TrianglePath::new(
        ToolPosition::new(300.0, 0.0),
        ToolPosition::new(0.0, 300.0),
        ToolPosition::new(-300.0, 0.0),
    ));
    let samples = tri
        .transformed_samples(&TransformMatrix::identity(), Resolution::Medium, reach(&solver))
        .unwrap();
    let check = PathValidator::new(&solver).check(&samples, &JointAngles::home());
    assert!(!check.is_drawable());
    assert!(check.into_best().is_none());
}

#[test]
fn test_rectangle_inside_workspace_is_drawable() {
    let solver = KinematicsSolver::default();
    let rect = Shape::Rectangle(RectanglePath::new(ToolPosition::new(250.0, -100.0), 150.0, 200.0));
    let samples = rect
        .transformed_samples(&TransformMatrix::identity(), Resolution::High, reach(&solver))
        .unwrap();
    let check = PathValidator::new(&solver).check(&samples, &JointAngles::home());
    assert!(check.left.drawable);
    assert!(check.right.drawable);
}

#[test]
fn test_translated_line_moves_every_sample() {
    let line = Shape::Line(LinePath::new(
        ToolPosition::new(0.0, 0.0),
        ToolPosition::new(0.0, 100.0),
    ));
    let mut tm = TransformMatrix::identity();
    tm.compose_translation(300.0, 0.0);
    let pts = line.transformed_samples(&tm, Resolution::Medium, 600.0).unwrap();
    assert_eq!(pts.len(), 6);
    assert!(pts.iter().all(|p| (p.x - 300.0).abs() < 1e-9));
}

#[test]
fn test_bezier_count_uses_estimated_length() {
    let curve = QuadraticBezierPath::new(
        ToolPosition::new(300.0, 0.0),
        ToolPosition::new(450.0, 150.0),
        ToolPosition::new(300.0, 300.0),
    );
    for res in Resolution::ALL {
        assert_eq!(
            curve.samples(res).len(),
            num_path_points(curve.length(), res)
        );
    }
}

#[test]
fn test_extreme_coordinates_never_allocate() {
    let mut huge_scale = TransformMatrix::identity();
    huge_scale.compose_scale(1e15, 1e15);
    let cases = [
        (
            Shape::Line(LinePath::new(
                ToolPosition::new(300.0, 0.0),
                ToolPosition::new(1e20, 0.0),
            )),
            TransformMatrix::identity(),
        ),
        (
            Shape::Arc(ArcPath::new(ToolPosition::new(0.0, 0.0), 1e12, 0.0, 360.0)),
            huge_scale,
        ),
        (
            Shape::Arc(ArcPath::new(ToolPosition::new(400.0, 0.0), 50.0, 0.0, 1e12)),
            TransformMatrix::identity(),
        ),
        (
            Shape::Rectangle(RectanglePath::new(ToolPosition::new(300.0, 0.0), 1e300, 1e300)),
            TransformMatrix::identity(),
        ),
    ];
    for (shape, tm) in cases {
        let result = shape.transformed_samples(&tm, Resolution::High, 600.0);
        assert!(
            matches!(
                result,
                Err(GeometryError::OutsideWorkspace { .. } | GeometryError::TooManyPoints { .. })
            ),
            "{} gave {:?}",
            shape.name(),
            result.map(|s| s.len())
        );
    }
}

proptest! {
    #[test]
    fn prop_line_samples_are_evenly_spaced(
        x0 in -500.0f64..500.0, y0 in -500.0f64..500.0,
        x1 in -500.0f64..500.0, y1 in -500.0f64..500.0,
    ) {
        let line = LinePath::new(ToolPosition::new(x0, y0), ToolPosition::new(x1, y1));
        let pts = line.samples(Resolution::Medium);
        prop_assert!(pts.len() >= 2);
        prop_assert_eq!(pts[0], line.start);
        prop_assert_eq!(pts[pts.len() - 1], line.end);
        let step = line.length() / (pts.len() - 1) as f64;
        for w in pts.windows(2) {
            prop_assert!((w[0].distance_to(&w[1]) - step).abs() < 1e-6);
        }
    }

    #[test]
    fn prop_point_count_never_below_two(len in 0.0f64..5000.0) {
        for res in Resolution::ALL {
            prop_assert!(num_path_points(len, res) >= 2);
        }
    }

    #[test]
    fn prop_accepted_paths_stay_within_budget(
        x in -1e18f64..1e18, y in -1e18f64..1e18, sweep in -1e12f64..1e12,
    ) {
        let line = Shape::Line(LinePath::new(ToolPosition::new(300.0, 0.0), ToolPosition::new(x, y)));
        let arc = Shape::Arc(ArcPath::new(ToolPosition::new(300.0, 0.0), 100.0, 0.0, sweep));
        for shape in [line, arc] {
            if let Ok(samples) =
                shape.transformed_samples(&TransformMatrix::identity(), Resolution::High, 600.0)
            {
                prop_assert!(samples.len() <= MAX_PATH_POINTS);
                prop_assert!(samples.iter().all(|p| p.radius() <= 600.0 + 1e-6));
            }
        }
    }
}
