use scarakit_core::{GeometryError, ToolPosition, TransformMatrix};
use serde::{Deserialize, Serialize};

use crate::resolution::{num_path_points, Resolution, MAX_PATH_POINTS};

mod arc;
mod bezier;
mod line;
mod rectangle;
mod triangle;

pub use arc::ArcPath;
pub use bezier::QuadraticBezierPath;
pub use line::LinePath;
pub use rectangle::RectanglePath;
pub use triangle::TrianglePath;

/// A drawable primitive that can be sampled into tool positions.
pub trait PathShape {
    /// Human readable shape name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Path length that feeds the resolution policy.
    fn length(&self) -> f64;

    /// Points every sampling passes through, whatever the resolution.
    fn anchors(&self) -> Vec<ToolPosition>;

    /// Ordered samples from the first point of the path to the last.
    fn samples(&self, resolution: Resolution) -> Vec<ToolPosition>;

    fn num_points(&self, resolution: Resolution) -> usize {
        num_path_points(self.length(), resolution)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Line(LinePath),
    Arc(ArcPath),
    Triangle(TrianglePath),
    Rectangle(RectanglePath),
    QuadraticBezier(QuadraticBezierPath),
}

impl Shape {
    /// Samples the shape as seen through `transform`.
    ///
    /// Shapes defined by control points have those points mapped first and are then
    /// sampled, so the sample count follows the transformed length. Arcs are sampled
    /// on their literal circle and each sample is mapped afterwards; their count uses
    /// the literal length times the largest stretch of the transform.
    ///
    /// Nothing is generated when a point the path must pass through lies beyond
    /// `max_reach` from the origin, or when the path needs more than
    /// [`MAX_PATH_POINTS`] samples.
    pub fn transformed_samples(
        &self,
        transform: &TransformMatrix,
        resolution: Resolution,
        max_reach: f64,
    ) -> Result<Vec<ToolPosition>, GeometryError> {
        let mapped = match self {
            Shape::Arc(arc) => {
                self.ensure_within_reach(&transform.apply_all(&arc.anchors()), max_reach)?;
                let n = num_path_points(arc.length() * transform.max_stretch(), resolution);
                self.ensure_point_budget(n)?;
                let samples = transform.apply_all(&arc.samples_with_count(n));
                self.log_sampled(samples.len(), resolution);
                return Ok(samples);
            }
            Shape::Line(line) => Shape::Line(line.transformed(transform)),
            Shape::Triangle(tri) => Shape::Triangle(tri.transformed(transform)),
            Shape::Rectangle(rect) => Shape::Rectangle(rect.transformed(transform)),
            Shape::QuadraticBezier(curve) => Shape::QuadraticBezier(curve.transformed(transform)),
        };

        self.ensure_within_reach(&mapped.anchors(), max_reach)?;
        self.ensure_point_budget(mapped.num_points(resolution))?;
        let samples = mapped.samples(resolution);
        self.log_sampled(samples.len(), resolution);
        Ok(samples)
    }

    fn ensure_within_reach(
        &self,
        anchors: &[ToolPosition],
        max_reach: f64,
    ) -> Result<(), GeometryError> {
        // NaN radii fail the comparison and are rejected too
        match anchors.iter().find(|p| !(p.radius() <= max_reach)) {
            Some(p) => Err(GeometryError::OutsideWorkspace {
                shape: self.name().to_string(),
                x: p.x,
                y: p.y,
                reach: max_reach,
            }),
            None => Ok(()),
        }
    }

    fn ensure_point_budget(&self, points: usize) -> Result<(), GeometryError> {
        if points > MAX_PATH_POINTS {
            return Err(GeometryError::TooManyPoints {
                shape: self.name().to_string(),
                points,
                max: MAX_PATH_POINTS,
            });
        }
        Ok(())
    }

    fn log_sampled(&self, count: usize, resolution: Resolution) {
        tracing::debug!(
            "{} sampled into {} points at {} resolution",
            self.name(),
            count,
            resolution
        );
    }
}

impl PathShape for Shape {
    fn name(&self) -> &'static str {
        match self {
            Shape::Line(s) => s.name(),
            Shape::Arc(s) => s.name(),
            Shape::Triangle(s) => s.name(),
            Shape::Rectangle(s) => s.name(),
            Shape::QuadraticBezier(s) => s.name(),
        }
    }

    fn length(&self) -> f64 {
        match self {
            Shape::Line(s) => s.length(),
            Shape::Arc(s) => s.length(),
            Shape::Triangle(s) => s.length(),
            Shape::Rectangle(s) => s.length(),
            Shape::QuadraticBezier(s) => s.length(),
        }
    }

    fn anchors(&self) -> Vec<ToolPosition> {
        match self {
            Shape::Line(s) => s.anchors(),
            Shape::Arc(s) => s.anchors(),
            Shape::Triangle(s) => s.anchors(),
            Shape::Rectangle(s) => s.anchors(),
            Shape::QuadraticBezier(s) => s.anchors(),
        }
    }

    fn samples(&self, resolution: Resolution) -> Vec<ToolPosition> {
        match self {
            Shape::Line(s) => s.samples(resolution),
            Shape::Arc(s) => s.samples(resolution),
            Shape::Triangle(s) => s.samples(resolution),
            Shape::Rectangle(s) => s.samples(resolution),
            Shape::QuadraticBezier(s) => s.samples(resolution),
        }
    }

    fn num_points(&self, resolution: Resolution) -> usize {
        match self {
            Shape::Line(s) => s.num_points(resolution),
            Shape::Arc(s) => s.num_points(resolution),
            Shape::Triangle(s) => s.num_points(resolution),
            Shape::Rectangle(s) => s.num_points(resolution),
            Shape::QuadraticBezier(s) => s.num_points(resolution),
        }
    }
}

/// Evenly spaced samples from `start` to `end`, both included.
pub(crate) fn sample_segment(
    start: ToolPosition,
    end: ToolPosition,
    resolution: Resolution,
) -> Vec<ToolPosition> {
    let n = num_path_points(start.distance_to(&end), resolution);
    let last = n - 1;
    (0..n)
        .map(|i| {
            if i == last {
                end
            } else {
                start.lerp(&end, i as f64 / last as f64)
            }
        })
        .collect()
}

/// Samples the closed outline through `vertices`, returning to the first vertex.
///
/// Each edge is sampled at its own length; the vertex shared by two edges appears once.
pub(crate) fn sample_closed_outline(
    vertices: &[ToolPosition],
    resolution: Resolution,
) -> Vec<ToolPosition> {
    let mut points: Vec<ToolPosition> = Vec::new();
    for (i, start) in vertices.iter().enumerate() {
        let end = vertices[(i + 1) % vertices.len()];
        let segment = sample_segment(*start, end, resolution);
        let skip = usize::from(!points.is_empty());
        points.extend(segment.into_iter().skip(skip));
    }
    points
}

/// Sample count of [`sample_closed_outline`] without generating the samples.
pub(crate) fn outline_point_count(vertices: &[ToolPosition], resolution: Resolution) -> usize {
    let edges = vertices.len();
    let total = vertices
        .iter()
        .enumerate()
        .map(|(i, v)| num_path_points(v.distance_to(&vertices[(i + 1) % edges]), resolution))
        .fold(0usize, usize::saturating_add);
    total.saturating_sub(edges.saturating_sub(1))
}

pub(crate) fn outline_length(vertices: &[ToolPosition]) -> f64 {
    vertices
        .iter()
        .enumerate()
        .map(|(i, v)| v.distance_to(&vertices[(i + 1) % vertices.len()]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_endpoints_are_exact() {
        let a = ToolPosition::new(300.0, 0.0);
        let b = ToolPosition::new(300.0, 100.0);
        let pts = sample_segment(a, b, Resolution::Medium);
        assert_eq!(pts.len(), 6);
        assert_eq!(pts[0], a);
        assert_eq!(pts[5], b);
    }

    #[test]
    fn test_closed_outline_has_no_duplicate_joins() {
        let square = [
            ToolPosition::new(0.0, 0.0),
            ToolPosition::new(100.0, 0.0),
            ToolPosition::new(100.0, 100.0),
            ToolPosition::new(0.0, 100.0),
        ];
        let pts = sample_closed_outline(&square, Resolution::Medium);
        // four edges of 6 points, three shared joins removed, the closing join kept
        assert_eq!(pts.len(), 4 * 6 - 3);
        for w in pts.windows(2) {
            assert!(w[0] != w[1]);
        }
        assert_eq!(pts.first(), pts.last());
        assert_eq!(outline_length(&square), 400.0);
    }

    #[test]
    fn test_outline_point_count_matches_samples() {
        let tri = [
            ToolPosition::new(300.0, 0.0),
            ToolPosition::new(400.0, 0.0),
            ToolPosition::new(300.0, 100.0),
        ];
        for res in Resolution::ALL {
            assert_eq!(
                outline_point_count(&tri, res),
                sample_closed_outline(&tri, res).len()
            );
        }
    }

    const REACH: f64 = 600.0;

    #[test]
    fn test_arc_is_transformed_after_sampling() {
        let arc = Shape::Arc(ArcPath::new(ToolPosition::new(0.0, 0.0), 100.0, 0.0, 90.0));
        let mut tm = TransformMatrix::identity();
        tm.compose_scale(2.0, 1.0);
        let pts = arc.transformed_samples(&tm, Resolution::Medium, REACH).unwrap();
        assert!(pts[0].approx_eq(&ToolPosition::new(200.0, 0.0), 1e-9));
        assert!(pts.last().unwrap().approx_eq(&ToolPosition::new(0.0, 100.0), 1e-9));
    }

    #[test]
    fn test_scaled_arc_count_follows_stretch() {
        let arc = Shape::Arc(ArcPath::new(ToolPosition::new(0.0, 0.0), 50.0, 0.0, 90.0));
        let mut tm = TransformMatrix::identity();
        tm.compose_scale(4.0, 4.0);
        let pts = arc.transformed_samples(&tm, Resolution::Medium, REACH).unwrap();
        // the 200-unit radius arc it becomes: 314.16 / 500 * 31 = 19.48
        let direct = ArcPath::new(ToolPosition::new(0.0, 0.0), 200.0, 0.0, 90.0);
        assert_eq!(pts.len(), 19);
        assert_eq!(pts.len(), direct.num_points(Resolution::Medium));
    }

    #[test]
    fn test_line_sample_count_follows_transformed_length() {
        let line = Shape::Line(LinePath::new(
            ToolPosition::new(0.0, 0.0),
            ToolPosition::new(100.0, 0.0),
        ));
        let mut tm = TransformMatrix::identity();
        tm.compose_scale(5.0, 5.0);
        // 500 units after scaling
        let pts = line.transformed_samples(&tm, Resolution::Low, REACH).unwrap();
        assert_eq!(pts.len(), 11);
        assert_eq!(line.samples(Resolution::Low).len(), 2);
    }

    #[test]
    fn test_far_endpoint_is_rejected_before_sampling() {
        let line = Shape::Line(LinePath::new(
            ToolPosition::new(300.0, 0.0),
            ToolPosition::new(1e20, 0.0),
        ));
        let err = line
            .transformed_samples(&TransformMatrix::identity(), Resolution::High, REACH)
            .unwrap_err();
        assert!(matches!(err, GeometryError::OutsideWorkspace { .. }), "{:?}", err);
    }

    #[test]
    fn test_scaled_arc_beyond_reach_is_rejected() {
        let arc = Shape::Arc(ArcPath::new(ToolPosition::new(0.0, 0.0), 1e12, 0.0, 360.0));
        let mut tm = TransformMatrix::identity();
        tm.compose_scale(1e15, 1e15);
        let err = arc
            .transformed_samples(&tm, Resolution::Medium, REACH)
            .unwrap_err();
        assert!(matches!(err, GeometryError::OutsideWorkspace { .. }), "{:?}", err);
    }

    #[test]
    fn test_huge_sweep_exceeds_point_budget() {
        let arc = Shape::Arc(ArcPath::new(ToolPosition::new(400.0, 0.0), 50.0, 0.0, 1e9));
        let err = arc
            .transformed_samples(&TransformMatrix::identity(), Resolution::Low, REACH)
            .unwrap_err();
        match err {
            GeometryError::TooManyPoints { shape, points, max } => {
                assert_eq!(shape, "ARC");
                assert_eq!(max, MAX_PATH_POINTS);
                assert!(points > max);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_far_bezier_control_point_exceeds_point_budget() {
        let curve = Shape::QuadraticBezier(QuadraticBezierPath::new(
            ToolPosition::new(300.0, 0.0),
            ToolPosition::new(1e12, 1e12),
            ToolPosition::new(300.0, 100.0),
        ));
        let err = curve
            .transformed_samples(&TransformMatrix::identity(), Resolution::Low, REACH)
            .unwrap_err();
        assert!(matches!(err, GeometryError::TooManyPoints { .. }), "{:?}", err);
    }
}
