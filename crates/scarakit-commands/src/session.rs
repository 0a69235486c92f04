//! Per-run robot state
//!
//! The coordinate transform and the last commanded joint angles are owned by the
//! caller and handed to the dispatcher for every line.

use scarakit_communication::{MotorSpeed, PenColor, RobotCommand};
use scarakit_core::{JointAngles, TransformMatrix};

/// State carried from one command line to the next.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    /// Accumulated coordinate transform applied to literal coordinates.
    pub transform: TransformMatrix,
    /// Joint angles of the last motion sent to the robot.
    pub current_angles: JointAngles,
    pub pen_down: bool,
    pub pen_color: PenColor,
    pub motor_speed: MotorSpeed,
    pub cycle_pen_colors: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the tracked robot state after `command` was sent.
    pub fn record(&mut self, command: &RobotCommand) {
        match command {
            RobotCommand::PenUp => self.pen_down = false,
            RobotCommand::PenDown => self.pen_down = true,
            RobotCommand::CyclePenColors(on) => self.cycle_pen_colors = *on,
            RobotCommand::PenColor(color) => self.pen_color = *color,
            RobotCommand::MotorSpeed(speed) => self.motor_speed = *speed,
            RobotCommand::Home => self.current_angles = JointAngles::home(),
            RobotCommand::RotateJoint(angles) => self.current_angles = *angles,
            RobotCommand::ClearTrace
            | RobotCommand::ClearRemoteCommandLog
            | RobotCommand::ClearPositionLog
            | RobotCommand::ShutdownSimulation
            | RobotCommand::End => {}
        }
    }
}
