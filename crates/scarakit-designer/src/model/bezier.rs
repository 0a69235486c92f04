use scarakit_core::{ToolPosition, TransformMatrix};
use serde::{Deserialize, Serialize};

use super::PathShape;
use crate::resolution::Resolution;

/// Points used for the chord-sum length estimate.
const LENGTH_ESTIMATE_POINTS: usize = 1000;

/// Quadratic Bezier curve from `p0` to `p2` pulled towards `p1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadraticBezierPath {
    pub p0: ToolPosition,
    pub p1: ToolPosition,
    pub p2: ToolPosition,
}

impl QuadraticBezierPath {
    pub fn new(p0: ToolPosition, p1: ToolPosition, p2: ToolPosition) -> Self {
        Self { p0, p1, p2 }
    }

    /// `B(t) = (1-t)^2 P0 + 2(1-t)t P1 + t^2 P2`
    pub fn point_at(&self, t: f64) -> ToolPosition {
        let u = 1.0 - t;
        let a = u * u;
        let b = 2.0 * u * t;
        let c = t * t;
        ToolPosition::new(
            a * self.p0.x + b * self.p1.x + c * self.p2.x,
            a * self.p0.y + b * self.p1.y + c * self.p2.y,
        )
    }

    pub fn transformed(&self, transform: &TransformMatrix) -> Self {
        Self::new(
            transform.apply(self.p0),
            transform.apply(self.p1),
            transform.apply(self.p2),
        )
    }
}

impl PathShape for QuadraticBezierPath {
    fn name(&self) -> &'static str {
        "QUADRATIC_BEZIER"
    }

    /// Sum of chord lengths between 1000 equally spaced parameter values.
    fn length(&self) -> f64 {
        let last = (LENGTH_ESTIMATE_POINTS - 1) as f64;
        let mut previous = self.p0;
        let mut len = 0.0;
        for n in 1..LENGTH_ESTIMATE_POINTS {
            let p = self.point_at(n as f64 / last);
            len += previous.distance_to(&p);
            previous = p;
        }
        len
    }

    /// The curve always starts at `p0` and ends at `p2`; `p1` is only pulled towards.
    fn anchors(&self) -> Vec<ToolPosition> {
        vec![self.p0, self.p2]
    }

    fn samples(&self, resolution: Resolution) -> Vec<ToolPosition> {
        let n = self.num_points(resolution);
        let last = (n - 1) as f64;
        (0..n).map(|i| self.point_at(i as f64 / last)).collect()
    }
}
