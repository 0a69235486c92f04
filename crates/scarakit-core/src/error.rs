//! Error handling for ScaraKit
//!
//! Provides error types for every stage a command line passes through:
//! - Command errors (keyword lookup and parameter parsing)
//! - Geometry errors (reachability and joint limits)
//! - Connection errors (writes to the robot controller)
//!
//! Command and geometry errors are recoverable: the offending line is rejected and
//! processing continues. Connection errors are fatal for the run.

use thiserror::Error;

/// Command error type
///
/// Represents problems with the text of a command line itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    /// The line holds no tokens
    #[error("Blank line")]
    BlankLine,

    /// The first token is not a known keyword
    #[error("Unknown command keyword: {keyword}")]
    UnknownKeyword {
        /// The unrecognised keyword.
        keyword: String,
    },

    /// A required parameter is absent
    #[error("Missing {param} parameter for {command}")]
    MissingParameter {
        /// The command keyword.
        command: String,
        /// The name of the missing parameter.
        param: String,
    },

    /// More tokens than the command accepts
    #[error("Too many parameters for {command}: unexpected '{extra}'")]
    ExtraParameters {
        /// The command keyword.
        command: String,
        /// The first unexpected token.
        extra: String,
    },

    /// A parameter is present but unusable
    #[error("Invalid {param} parameter '{value}' for {command}: {reason}")]
    InvalidParameter {
        /// The command keyword.
        command: String,
        /// The parameter name.
        param: String,
        /// The offending token.
        value: String,
        /// Why the token was rejected.
        reason: String,
    },
}

/// Geometry error type
///
/// Raised when a requested point, joint move, or path cannot be executed by the arm.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// No arm configuration reaches the point
    #[error("Point ({x:.2}, {y:.2}) is outside the reachable workspace")]
    Unreachable {
        /// Tool x coordinate.
        x: f64,
        /// Tool y coordinate.
        y: f64,
    },

    /// The requested configuration cannot reach the point
    #[error("{configuration} arm cannot reach point ({x:.2}, {y:.2})")]
    ConfigurationUnreachable {
        /// The configuration name.
        configuration: String,
        /// Tool x coordinate.
        x: f64,
        /// Tool y coordinate.
        y: f64,
    },

    /// Joint angles outside the limits of the arm
    #[error("Joint angles ({theta1_deg:.2}, {theta2_deg:.2}) exceed the joint limits")]
    JointLimit {
        /// Shoulder angle in degrees.
        theta1_deg: f64,
        /// Elbow angle in degrees.
        theta2_deg: f64,
    },

    /// Neither configuration can draw every sample of the path
    #[error("Cannot draw {shape}: not every one of its {samples} points is reachable by a single arm configuration")]
    PathNotDrawable {
        /// The shape keyword.
        shape: String,
        /// Number of samples checked.
        samples: usize,
    },

    /// A point the path must pass through lies beyond the arm's reach
    #[error("Cannot draw {shape}: point ({x:.2}, {y:.2}) is beyond the arm's reach of {reach:.2}")]
    OutsideWorkspace {
        /// The shape keyword.
        shape: String,
        /// Tool x coordinate.
        x: f64,
        /// Tool y coordinate.
        y: f64,
        /// Maximum reach of the arm.
        reach: f64,
    },

    /// The path would need more samples than a single command may produce
    #[error("Cannot draw {shape}: {points} points exceeds the limit of {max}")]
    TooManyPoints {
        /// The shape keyword.
        shape: String,
        /// Samples the resolution policy asked for.
        points: usize,
        /// Upper bound on samples per path.
        max: usize,
    },
}

/// Connection error type
///
/// Represents failures talking to the robot controller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConnectionError {
    /// No open connection
    #[error("Robot controller not connected")]
    NotConnected,

    /// The controller could not be reached
    #[error("Failed to connect to {address}: {reason}")]
    FailedToConnect {
        /// The controller address.
        address: String,
        /// The reason the connection failed.
        reason: String,
    },

    /// The address could not be parsed or resolved
    #[error("Invalid controller address: {address}")]
    InvalidAddress {
        /// The offending address.
        address: String,
    },

    /// A write to the controller failed
    #[error("Failed to send command: {reason}")]
    WriteFailed {
        /// The reason for the failure.
        reason: String,
    },
}

/// Main error type for ScaraKit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Command syntax error
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Geometric infeasibility
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Transport failure
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if the run can continue with the next line after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Command(_) | Error::Geometry(_))
    }

    /// Check if this is a connection error
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Error::Connection(_))
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_display() {
        let err = CommandError::MissingParameter {
            command: "LINE".to_string(),
            param: "y1".to_string(),
        };
        assert_eq!(err.to_string(), "Missing y1 parameter for LINE");

        let err = CommandError::UnknownKeyword {
            keyword: "JUMP".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown command keyword: JUMP");
    }

    #[test]
    fn test_geometry_error_display() {
        let err = GeometryError::Unreachable { x: 700.0, y: 0.0 };
        assert_eq!(
            err.to_string(),
            "Point (700.00, 0.00) is outside the reachable workspace"
        );

        let err = GeometryError::TooManyPoints {
            shape: "ARC".to_string(),
            points: 250_000,
            max: 100_000,
        };
        assert_eq!(
            err.to_string(),
            "Cannot draw ARC: 250000 points exceeds the limit of 100000"
        );
    }

    #[test]
    fn test_recoverability() {
        let err: Error = CommandError::BlankLine.into();
        assert!(err.is_recoverable());

        let err: Error = GeometryError::JointLimit {
            theta1_deg: 160.0,
            theta2_deg: 0.0,
        }
        .into();
        assert!(err.is_recoverable());
        assert!(err.is_geometry_error());

        let err: Error = ConnectionError::NotConnected.into();
        assert!(!err.is_recoverable());
        assert!(err.is_connection_error());

        let err: Error = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe").into();
        assert!(!err.is_recoverable());
    }
}
