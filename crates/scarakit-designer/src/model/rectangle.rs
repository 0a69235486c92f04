use scarakit_core::{ToolPosition, TransformMatrix};
use serde::{Deserialize, Serialize};

use super::{outline_length, outline_point_count, sample_closed_outline, PathShape};
use crate::resolution::Resolution;

/// Closed four-sided outline.
///
/// Built axis-aligned from a corner and extents; after a transform the corners may
/// describe any parallelogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectanglePath {
    pub corners: [ToolPosition; 4],
}

impl RectanglePath {
    /// Rectangle with one corner at `corner`, spanning `width` along x and `height` along y.
    /// Negative extents grow towards negative x or y.
    pub fn new(corner: ToolPosition, width: f64, height: f64) -> Self {
        let ToolPosition { x, y } = corner;
        Self {
            corners: [
                corner,
                ToolPosition::new(x + width, y),
                ToolPosition::new(x + width, y + height),
                ToolPosition::new(x, y + height),
            ],
        }
    }

    pub fn transformed(&self, transform: &TransformMatrix) -> Self {
        Self {
            corners: self.corners.map(|c| transform.apply(c)),
        }
    }
}

impl PathShape for RectanglePath {
    fn name(&self) -> &'static str {
        "RECTANGLE"
    }

    fn length(&self) -> f64 {
        outline_length(&self.corners)
    }

    fn anchors(&self) -> Vec<ToolPosition> {
        self.corners.to_vec()
    }

    fn samples(&self, resolution: Resolution) -> Vec<ToolPosition> {
        sample_closed_outline(&self.corners, resolution)
    }

    fn num_points(&self, resolution: Resolution) -> usize {
        outline_point_count(&self.corners, resolution)
    }
}
