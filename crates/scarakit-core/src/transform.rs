//! 2D homogeneous transform applied to literal path coordinates
//!
//! The matrix starts as identity. Each rotate/translate/scale command builds its own
//! 3x3 matrix `M` and pre-multiplies it into the accumulated transform (`TM = M * TM`),
//! so operations take effect on points in the order they were issued.

use crate::geometry::ToolPosition;
use nalgebra::{Matrix3, Vector3};

/// Accumulated affine transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformMatrix {
    matrix: Matrix3<f64>,
}

impl Default for TransformMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl TransformMatrix {
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Resets the transform to identity.
    pub fn reset(&mut self) {
        self.matrix = Matrix3::identity();
    }

    pub fn is_identity(&self) -> bool {
        self.matrix == Matrix3::identity()
    }

    /// Raw matrix, row-major access via `m[(row, col)]`.
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// Rotation about the origin, counter-clockwise in degrees.
    pub fn compose_rotation(&mut self, angle_deg: f64) {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        #[rustfmt::skip]
        let rotation = Matrix3::new(
            cos, -sin, 0.0,
            sin,  cos, 0.0,
            0.0,  0.0, 1.0,
        );
        self.premultiply(&rotation);
    }

    pub fn compose_translation(&mut self, dx: f64, dy: f64) {
        #[rustfmt::skip]
        let translation = Matrix3::new(
            1.0, 0.0, dx,
            0.0, 1.0, dy,
            0.0, 0.0, 1.0,
        );
        self.premultiply(&translation);
    }

    pub fn compose_scale(&mut self, sx: f64, sy: f64) {
        #[rustfmt::skip]
        let scale = Matrix3::new(
            sx,  0.0, 0.0,
            0.0, sy,  0.0,
            0.0, 0.0, 1.0,
        );
        self.premultiply(&scale);
    }

    fn premultiply(&mut self, m: &Matrix3<f64>) {
        self.matrix = m * self.matrix;
        tracing::trace!("transform matrix now {:?}", self.matrix);
    }

    /// Maps a point through the transform.
    pub fn apply(&self, point: ToolPosition) -> ToolPosition {
        let v = self.matrix * Vector3::new(point.x, point.y, 1.0);
        ToolPosition::new(v.x, v.y)
    }

    pub fn apply_all(&self, points: &[ToolPosition]) -> Vec<ToolPosition> {
        points.iter().map(|p| self.apply(*p)).collect()
    }

    /// Largest factor by which the transform stretches any direction, i.e. the larger
    /// singular value of the linear part. Translation does not contribute.
    pub fn max_stretch(&self) -> f64 {
        let m = &self.matrix;
        let (a, b, c, d) = (m[(0, 0)], m[(0, 1)], m[(1, 0)], m[(1, 1)]);
        let sum = a * a + b * b + c * c + d * d;
        let det = a * d - b * c;
        let spread = (sum * sum - 4.0 * det * det).max(0.0).sqrt();
        ((sum + spread) / 2.0).sqrt()
    }
}
