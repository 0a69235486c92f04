//! # ScaraKit Communication
//!
//! Everything between the command dispatcher and the robot controller.
//! Commands are serialized into the controller's ASCII line protocol and written
//! to a [`Communicator`], normally a TCP connection to the controller.

pub mod command;
pub mod communication;

pub use command::{MotorSpeed, ParseMotorSpeedError, PenColor, RobotCommand};
pub use communication::{
    tcp::TcpCommunicator, Communicator, ConnectionParams, NoOpCommunicator,
    RecordingCommunicator,
};
