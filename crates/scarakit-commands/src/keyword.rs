use std::fmt;

/// Every command keyword a command file may start a line with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    RotateJoint,
    MotorSpeed,
    PenUp,
    PenDown,
    CyclePenColors,
    PenColor,
    ClearTrace,
    ClearRemoteCommandLog,
    ClearPositionLog,
    ShutdownSimulation,
    End,
    Home,
    Line,
    Arc,
    MoveTo,
    Triangle,
    Rectangle,
    QuadraticBezier,
    Rotate,
    Translate,
    Scale,
    ResetTransformMatrix,
}

impl Keyword {
    pub const ALL: [Keyword; 22] = [
        Keyword::RotateJoint,
        Keyword::MotorSpeed,
        Keyword::PenUp,
        Keyword::PenDown,
        Keyword::CyclePenColors,
        Keyword::PenColor,
        Keyword::ClearTrace,
        Keyword::ClearRemoteCommandLog,
        Keyword::ClearPositionLog,
        Keyword::ShutdownSimulation,
        Keyword::End,
        Keyword::Home,
        Keyword::Line,
        Keyword::Arc,
        Keyword::MoveTo,
        Keyword::Triangle,
        Keyword::Rectangle,
        Keyword::QuadraticBezier,
        Keyword::Rotate,
        Keyword::Translate,
        Keyword::Scale,
        Keyword::ResetTransformMatrix,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RotateJoint => "ROTATE_JOINT",
            Self::MotorSpeed => "MOTOR_SPEED",
            Self::PenUp => "PEN_UP",
            Self::PenDown => "PEN_DOWN",
            Self::CyclePenColors => "CYCLE_PEN_COLORS",
            Self::PenColor => "PEN_COLOR",
            Self::ClearTrace => "CLEAR_TRACE",
            Self::ClearRemoteCommandLog => "CLEAR_REMOTE_COMMAND_LOG",
            Self::ClearPositionLog => "CLEAR_POSITION_LOG",
            Self::ShutdownSimulation => "SHUTDOWN_SIMULATION",
            Self::End => "END",
            Self::Home => "HOME",
            Self::Line => "LINE",
            Self::Arc => "ARC",
            Self::MoveTo => "MOVE_TO",
            Self::Triangle => "TRIANGLE",
            Self::Rectangle => "RECTANGLE",
            Self::QuadraticBezier => "QUADRATIC_BEZIER",
            Self::Rotate => "ROTATE",
            Self::Translate => "TRANSLATE",
            Self::Scale => "SCALE",
            Self::ResetTransformMatrix => "RESET_TRANSFORM_MATRIX",
        }
    }

    /// Case-insensitive exact match against the keyword table.
    pub fn lookup(token: &str) -> Option<Keyword> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(token))
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_round_trips_every_keyword() {
        for k in Keyword::ALL {
            assert_eq!(Keyword::lookup(k.as_str()), Some(k));
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive_but_exact() {
        assert_eq!(Keyword::lookup("move_to"), Some(Keyword::MoveTo));
        assert_eq!(Keyword::lookup("Home"), Some(Keyword::Home));
        assert_eq!(Keyword::lookup("MOVE"), None);
        assert_eq!(Keyword::lookup("HOMES"), None);
    }
}
