//! Path reachability checks
//!
//! A path is drawable under a configuration only if every sample solves under that
//! configuration. Partial paths are never accepted.

use crate::solver::KinematicsSolver;
use scarakit_core::{ArmConfiguration, JointAngles, ToolPosition};

/// Outcome of checking a path under one arm configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathCheckResult {
    pub drawable: bool,
    /// Sum of |d theta1| + |d theta2| from the starting angles through every sample.
    pub total_angle_delta_deg: f64,
    /// Joint angles for every sample; empty when the path is not drawable.
    pub angles: Vec<JointAngles>,
    /// Index of the first sample that failed, if any.
    pub first_failure: Option<usize>,
}

impl PathCheckResult {
    fn failed_at(index: usize) -> Self {
        Self {
            drawable: false,
            total_angle_delta_deg: 0.0,
            angles: Vec::new(),
            first_failure: Some(index),
        }
    }
}

/// Per-configuration results for one path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathCheck {
    pub left: PathCheckResult,
    pub right: PathCheckResult,
}

impl PathCheck {
    pub fn get(&self, configuration: ArmConfiguration) -> &PathCheckResult {
        match configuration {
            ArmConfiguration::Left => &self.left,
            ArmConfiguration::Right => &self.right,
        }
    }

    pub fn is_drawable(&self) -> bool {
        self.left.drawable || self.right.drawable
    }

    /// The drawable configuration with the least joint travel. Ties go to LEFT.
    pub fn best(&self) -> Option<ArmConfiguration> {
        match (self.left.drawable, self.right.drawable) {
            (true, true) => {
                if self.right.total_angle_delta_deg < self.left.total_angle_delta_deg {
                    Some(ArmConfiguration::Right)
                } else {
                    Some(ArmConfiguration::Left)
                }
            }
            (true, false) => Some(ArmConfiguration::Left),
            (false, true) => Some(ArmConfiguration::Right),
            (false, false) => None,
        }
    }

    /// Consumes the check, returning the chosen configuration and its joint angles.
    pub fn into_best(self) -> Option<(ArmConfiguration, Vec<JointAngles>)> {
        let best = self.best()?;
        let result = match best {
            ArmConfiguration::Left => self.left,
            ArmConfiguration::Right => self.right,
        };
        Some((best, result.angles))
    }
}

/// Walks sample sequences through inverse kinematics.
#[derive(Debug, Clone, Copy)]
pub struct PathValidator<'a> {
    solver: &'a KinematicsSolver,
    max_joint_step_deg: Option<f64>,
}

impl<'a> PathValidator<'a> {
    pub fn new(solver: &'a KinematicsSolver) -> Self {
        Self {
            solver,
            max_joint_step_deg: None,
        }
    }

    /// Rejects paths where either joint moves more than `step_deg` between consecutive samples.
    pub fn with_max_joint_step(mut self, step_deg: Option<f64>) -> Self {
        self.max_joint_step_deg = step_deg;
        self
    }

    pub fn check(&self, samples: &[ToolPosition], start: &JointAngles) -> PathCheck {
        PathCheck {
            left: self.check_configuration(samples, ArmConfiguration::Left, start),
            right: self.check_configuration(samples, ArmConfiguration::Right, start),
        }
    }

    pub fn check_configuration(
        &self,
        samples: &[ToolPosition],
        configuration: ArmConfiguration,
        start: &JointAngles,
    ) -> PathCheckResult {
        let mut angles = Vec::with_capacity(samples.len());
        let mut total = 0.0;
        let mut previous = *start;

        for (index, sample) in samples.iter().enumerate() {
            let Some(solved) = self.solver.inverse(sample).get(configuration) else {
                tracing::debug!(
                    "{} arm cannot reach sample {} of {} at {}",
                    configuration,
                    index,
                    samples.len(),
                    sample
                );
                return PathCheckResult::failed_at(index);
            };

            // the move onto the first sample is done pen-up, so no step limit applies
            if index > 0 && self.exceeds_step(&previous, &solved) {
                tracing::debug!(
                    "{} arm jumps from {} to {} at sample {}",
                    configuration,
                    previous,
                    solved,
                    index
                );
                return PathCheckResult::failed_at(index);
            }

            total += previous.travel_to(&solved);
            previous = solved;
            angles.push(solved);
        }

        PathCheckResult {
            drawable: true,
            total_angle_delta_deg: total,
            angles,
            first_failure: None,
        }
    }

    fn exceeds_step(&self, from: &JointAngles, to: &JointAngles) -> bool {
        match self.max_joint_step_deg {
            Some(limit) => {
                (to.theta1_deg - from.theta1_deg).abs() > limit
                    || (to.theta2_deg - from.theta2_deg).abs() > limit
            }
            None => false,
        }
    }
}
