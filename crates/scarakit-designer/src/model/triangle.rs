use scarakit_core::{ToolPosition, TransformMatrix};
use serde::{Deserialize, Serialize};

use super::{outline_length, outline_point_count, sample_closed_outline, PathShape};
use crate::resolution::Resolution;

/// Closed triangle traced `p0 -> p1 -> p2 -> p0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrianglePath {
    pub vertices: [ToolPosition; 3],
}

impl TrianglePath {
    pub fn new(p0: ToolPosition, p1: ToolPosition, p2: ToolPosition) -> Self {
        Self {
            vertices: [p0, p1, p2],
        }
    }

    pub fn transformed(&self, transform: &TransformMatrix) -> Self {
        Self {
            vertices: self.vertices.map(|v| transform.apply(v)),
        }
    }
}

impl PathShape for TrianglePath {
    fn name(&self) -> &'static str {
        "TRIANGLE"
    }

    fn length(&self) -> f64 {
        outline_length(&self.vertices)
    }

    fn anchors(&self) -> Vec<ToolPosition> {
        self.vertices.to_vec()
    }

    fn samples(&self, resolution: Resolution) -> Vec<ToolPosition> {
        sample_closed_outline(&self.vertices, resolution)
    }

    fn num_points(&self, resolution: Resolution) -> usize {
        outline_point_count(&self.vertices, resolution)
    }
}
