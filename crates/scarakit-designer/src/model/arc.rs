use scarakit_core::ToolPosition;
use serde::{Deserialize, Serialize};

use super::PathShape;
use crate::resolution::{Resolution, MIN_PATH_POINTS};

/// Circular arc around `center`, starting at `start_angle_deg` and turning by `sweep_deg`.
///
/// A positive sweep runs counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcPath {
    pub center: ToolPosition,
    pub radius: f64,
    pub start_angle_deg: f64,
    pub sweep_deg: f64,
}

impl ArcPath {
    pub fn new(center: ToolPosition, radius: f64, start_angle_deg: f64, sweep_deg: f64) -> Self {
        Self {
            center,
            radius,
            start_angle_deg,
            sweep_deg,
        }
    }

    pub fn point_at(&self, angle_deg: f64) -> ToolPosition {
        let a = angle_deg.to_radians();
        ToolPosition::new(
            self.center.x + self.radius * a.cos(),
            self.center.y + self.radius * a.sin(),
        )
    }

    /// `n` points evenly spaced by angle over the sweep, both ends included.
    pub fn samples_with_count(&self, n: usize) -> Vec<ToolPosition> {
        let n = n.max(MIN_PATH_POINTS);
        let last = (n - 1) as f64;
        (0..n)
            .map(|i| self.point_at(self.start_angle_deg + self.sweep_deg * i as f64 / last))
            .collect()
    }
}

impl PathShape for ArcPath {
    fn name(&self) -> &'static str {
        "ARC"
    }

    fn length(&self) -> f64 {
        self.radius.abs() * self.sweep_deg.abs().to_radians()
    }

    fn anchors(&self) -> Vec<ToolPosition> {
        vec![
            self.point_at(self.start_angle_deg),
            self.point_at(self.start_angle_deg + self.sweep_deg),
        ]
    }

    fn samples(&self, resolution: Resolution) -> Vec<ToolPosition> {
        self.samples_with_count(self.num_points(resolution))
    }
}
