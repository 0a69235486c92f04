use scarakit_core::nint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Every path has at least a start and an end point.
pub const MIN_PATH_POINTS: usize = 2;

/// Upper bound on samples generated for one path. Longer paths are rejected
/// before any point is generated.
pub const MAX_PATH_POINTS: usize = 100_000;

/// Path length that the per-resolution point counts refer to.
const REFERENCE_LENGTH: f64 = 500.0;

/// Sample density for generated paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Resolution {
    Low,
    #[default]
    Medium,
    High,
}

impl Resolution {
    pub const ALL: [Resolution; 3] = [Resolution::Low, Resolution::Medium, Resolution::High];

    /// Number of samples per 500 units of path length.
    pub fn points_per_500_units(&self) -> u32 {
        match self {
            Self::Low => 11,
            Self::Medium => 31,
            Self::High => 51,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        };
        write!(f, "{}", s)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown resolution '{0}' (expected LOW, MEDIUM or HIGH)")]
pub struct ParseResolutionError(pub String);

impl FromStr for Resolution {
    type Err = ParseResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            _ => Err(ParseResolutionError(s.to_string())),
        }
    }
}

/// Number of samples for a path of length `len`: `nint(len / 500 * k)`, never fewer than two.
pub fn num_path_points(len: f64, resolution: Resolution) -> usize {
    let raw = nint(len.abs() / REFERENCE_LENGTH * f64::from(resolution.points_per_500_units()));
    usize::try_from(raw.max(0))
        .unwrap_or(usize::MAX)
        .max(MIN_PATH_POINTS)
}
