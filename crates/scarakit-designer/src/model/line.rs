use scarakit_core::{ToolPosition, TransformMatrix};
use serde::{Deserialize, Serialize};

use super::{sample_segment, PathShape};
use crate::resolution::Resolution;

/// Straight segment from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePath {
    pub start: ToolPosition,
    pub end: ToolPosition,
}

impl LinePath {
    pub fn new(start: ToolPosition, end: ToolPosition) -> Self {
        Self { start, end }
    }

    pub fn transformed(&self, transform: &TransformMatrix) -> Self {
        Self::new(transform.apply(self.start), transform.apply(self.end))
    }
}

impl PathShape for LinePath {
    fn name(&self) -> &'static str {
        "LINE"
    }

    fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    fn anchors(&self) -> Vec<ToolPosition> {
        vec![self.start, self.end]
    }

    fn samples(&self, resolution: Resolution) -> Vec<ToolPosition> {
        sample_segment(self.start, self.end, resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_line_medium() {
        let line = LinePath::new(ToolPosition::new(300.0, 0.0), ToolPosition::new(300.0, 100.0));
        let pts = line.samples(Resolution::Medium);
        assert_eq!(pts.len(), 6);
        for (i, p) in pts.iter().enumerate() {
            assert!(p.approx_eq(&ToolPosition::new(300.0, 20.0 * i as f64), 1e-9));
        }
    }

    #[test]
    fn test_degenerate_line_keeps_two_points() {
        let p = ToolPosition::new(400.0, 10.0);
        let pts = LinePath::new(p, p).samples(Resolution::High);
        assert_eq!(pts, vec![p, p]);
    }
}
