//! Controller line protocol
//!
//! Each [`RobotCommand`] renders through `Display` as one space-separated ASCII line
//! without the terminating newline. Cartesian motion never reaches the controller;
//! it is always converted to [`RobotCommand::RotateJoint`] first.

use scarakit_core::JointAngles;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Joint motor speed setting of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MotorSpeed {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for MotorSpeed {
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
#[error("Unknown motor speed '{0}' (expected LOW, MEDIUM or HIGH)")]
pub struct ParseMotorSpeedError(pub String);

impl FromStr for MotorSpeed {
    type Err = ParseMotorSpeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            _ => Err(ParseMotorSpeedError(s.to_string())),
        }
    }
}

/// Pen colour as 8-bit RGB components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PenColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PenColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for PenColor {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}

impl fmt::Display for PenColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.r, self.g, self.b)
    }
}

/// A command understood by the robot controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RobotCommand {
    PenUp,
    PenDown,
    CyclePenColors(bool),
    PenColor(PenColor),
    ClearTrace,
    ClearRemoteCommandLog,
    ClearPositionLog,
    ShutdownSimulation,
    End,
    Home,
    MotorSpeed(MotorSpeed),
    RotateJoint(JointAngles),
}

impl fmt::Display for RobotCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PenUp => write!(f, "PEN_UP"),
            Self::PenDown => write!(f, "PEN_DOWN"),
            Self::CyclePenColors(on) => {
                write!(f, "CYCLE_PEN_COLORS {}", if *on { "ON" } else { "OFF" })
            }
            Self::PenColor(color) => write!(f, "PEN_COLOR {}", color),
            Self::ClearTrace => write!(f, "CLEAR_TRACE"),
            Self::ClearRemoteCommandLog => write!(f, "CLEAR_REMOTE_COMMAND_LOG"),
            Self::ClearPositionLog => write!(f, "CLEAR_POSITION_LOG"),
            Self::ShutdownSimulation => write!(f, "SHUTDOWN_SIMULATION"),
            Self::End => write!(f, "END"),
            Self::Home => write!(f, "HOME"),
            Self::MotorSpeed(speed) => write!(f, "MOTOR_SPEED {}", speed),
            Self::RotateJoint(angles) => write!(
                f,
                "ROTATE_JOINT ANG1 {:.2} ANG2 {:.2}",
                angles.theta1_deg, angles.theta2_deg
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_commands() {
        assert_eq!(RobotCommand::PenUp.to_string(), "PEN_UP");
        assert_eq!(RobotCommand::PenDown.to_string(), "PEN_DOWN");
        assert_eq!(
            RobotCommand::ClearRemoteCommandLog.to_string(),
            "CLEAR_REMOTE_COMMAND_LOG"
        );
        assert_eq!(
            RobotCommand::ShutdownSimulation.to_string(),
            "SHUTDOWN_SIMULATION"
        );
        assert_eq!(RobotCommand::End.to_string(), "END");
    }

    #[test]
    fn test_parameterized_commands() {
        assert_eq!(
            RobotCommand::CyclePenColors(true).to_string(),
            "CYCLE_PEN_COLORS ON"
        );
        assert_eq!(
            RobotCommand::PenColor(PenColor::new(255, 0, 128)).to_string(),
            "PEN_COLOR 255 0 128"
        );
        assert_eq!(
            RobotCommand::MotorSpeed(MotorSpeed::High).to_string(),
            "MOTOR_SPEED HIGH"
        );
    }

    #[test]
    fn test_rotate_joint_uses_two_decimals() {
        let cmd = RobotCommand::RotateJoint(JointAngles::new(-55.46237, 110.92476));
        assert_eq!(cmd.to_string(), "ROTATE_JOINT ANG1 -55.46 ANG2 110.92");
    }

    #[test]
    fn test_motor_speed_parse() {
        assert_eq!("low".parse::<MotorSpeed>().unwrap(), MotorSpeed::Low);
        assert!("fast".parse::<MotorSpeed>().is_err());
    }
}
