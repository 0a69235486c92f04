//! Parameter parsing
//!
//! Turns the tokens following a keyword into a typed [`Command`]. Every keyword
//! has a fixed parameter list; missing, extra or malformed tokens reject the line.

use crate::keyword::Keyword;
use scarakit_communication::{MotorSpeed, PenColor};
use scarakit_core::{ArmConfiguration, CommandError, JointAngles, ToolPosition};
use scarakit_designer::{
    ArcPath, LinePath, QuadraticBezierPath, RectanglePath, Resolution, Shape, TrianglePath,
};
use std::fmt::Display;
use std::str::FromStr;

/// A fully parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    RotateJoint(JointAngles),
    MotorSpeed(MotorSpeed),
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
    MoveTo {
        target: ToolPosition,
        configuration: Option<ArmConfiguration>,
    },
    Draw {
        shape: Shape,
        resolution: Option<Resolution>,
    },
    Rotate(f64),
    Translate(f64, f64),
    Scale(f64, f64),
    ResetTransformMatrix,
}

/// Parses the parameter tokens of `keyword`.
pub fn parse_parameters(keyword: Keyword, params: &[String]) -> Result<Command, CommandError> {
    let mut cursor = ParamCursor::new(keyword, params);

    let command = match keyword {
        Keyword::RotateJoint => {
            cursor.skip_label("ANG1");
            let theta1 = cursor.number("theta1")?;
            cursor.skip_label("ANG2");
            let theta2 = cursor.number("theta2")?;
            Command::RotateJoint(JointAngles::new(theta1, theta2))
        }
        Keyword::MotorSpeed => Command::MotorSpeed(cursor.word("speed")?),
        Keyword::PenUp => Command::PenUp,
        Keyword::PenDown => Command::PenDown,
        Keyword::CyclePenColors => Command::CyclePenColors(cursor.on_off("mode")?),
        Keyword::PenColor => Command::PenColor(PenColor::new(
            cursor.color_component("red")?,
            cursor.color_component("green")?,
            cursor.color_component("blue")?,
        )),
        Keyword::ClearTrace => Command::ClearTrace,
        Keyword::ClearRemoteCommandLog => Command::ClearRemoteCommandLog,
        Keyword::ClearPositionLog => Command::ClearPositionLog,
        Keyword::ShutdownSimulation => Command::ShutdownSimulation,
        Keyword::End => Command::End,
        Keyword::Home => Command::Home,
        Keyword::MoveTo => Command::MoveTo {
            target: cursor.point("x", "y")?,
            configuration: cursor.optional("arm configuration")?,
        },
        Keyword::Line => {
            let start = cursor.point("x0", "y0")?;
            let end = cursor.point("x1", "y1")?;
            Command::Draw {
                shape: Shape::Line(LinePath::new(start, end)),
                resolution: cursor.optional("resolution")?,
            }
        }
        Keyword::Arc => {
            let center = cursor.point("xc", "yc")?;
            let radius = cursor.number("radius")?;
            if radius <= 0.0 {
                return Err(cursor.invalid("radius", radius, "must be greater than zero"));
            }
            let start_angle = cursor.number("start angle")?;
            let sweep = cursor.number("sweep angle")?;
            if sweep == 0.0 {
                return Err(cursor.invalid("sweep angle", sweep, "must not be zero"));
            }
            Command::Draw {
                shape: Shape::Arc(ArcPath::new(center, radius, start_angle, sweep)),
                resolution: cursor.optional("resolution")?,
            }
        }
        Keyword::Triangle => {
            let p0 = cursor.point("x0", "y0")?;
            let p1 = cursor.point("x1", "y1")?;
            let p2 = cursor.point("x2", "y2")?;
            Command::Draw {
                shape: Shape::Triangle(TrianglePath::new(p0, p1, p2)),
                resolution: cursor.optional("resolution")?,
            }
        }
        Keyword::Rectangle => {
            let corner = cursor.point("x", "y")?;
            let width = cursor.number("width")?;
            if width == 0.0 {
                return Err(cursor.invalid("width", width, "must not be zero"));
            }
            let height = cursor.number("height")?;
            if height == 0.0 {
                return Err(cursor.invalid("height", height, "must not be zero"));
            }
            Command::Draw {
                shape: Shape::Rectangle(RectanglePath::new(corner, width, height)),
                resolution: cursor.optional("resolution")?,
            }
        }
        Keyword::QuadraticBezier => {
            let p0 = cursor.point("x0", "y0")?;
            let p1 = cursor.point("x1", "y1")?;
            let p2 = cursor.point("x2", "y2")?;
            Command::Draw {
                shape: Shape::QuadraticBezier(QuadraticBezierPath::new(p0, p1, p2)),
                resolution: cursor.optional("resolution")?,
            }
        }
        Keyword::Rotate => Command::Rotate(cursor.number("angle")?),
        Keyword::Translate => Command::Translate(cursor.number("dx")?, cursor.number("dy")?),
        Keyword::Scale => {
            let sx = cursor.number("scale")?;
            let sy = if cursor.has_more() {
                cursor.number("y scale")?
            } else {
                sx
            };
            Command::Scale(sx, sy)
        }
        Keyword::ResetTransformMatrix => Command::ResetTransformMatrix,
    };

    cursor.finish()?;
    Ok(command)
}

struct ParamCursor<'a> {
    keyword: Keyword,
    tokens: &'a [String],
    pos: usize,
}

impl<'a> ParamCursor<'a> {
    fn new(keyword: Keyword, tokens: &'a [String]) -> Self {
        Self {
            keyword,
            tokens,
            pos: 0,
        }
    }

    fn has_more(&self) -> bool {
        self.pos < self.tokens.len()
    }

    fn next_token(&mut self, param: &str) -> Result<&'a str, CommandError> {
        let token = self
            .tokens
            .get(self.pos)
            .ok_or_else(|| CommandError::MissingParameter {
                command: self.keyword.to_string(),
                param: param.to_string(),
            })?;
        self.pos += 1;
        Ok(token.as_str())
    }

    fn skip_label(&mut self, label: &str) {
        if self.tokens.get(self.pos).is_some_and(|t| t == label) {
            self.pos += 1;
        }
    }

    fn number(&mut self, param: &str) -> Result<f64, CommandError> {
        let token = self.next_token(param)?;
        match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            Ok(_) => Err(self.invalid(param, token, "must be a finite number")),
            Err(_) => Err(self.invalid(param, token, "expected a number")),
        }
    }

    fn point(&mut self, x: &str, y: &str) -> Result<ToolPosition, CommandError> {
        Ok(ToolPosition::new(self.number(x)?, self.number(y)?))
    }

    fn word<T>(&mut self, param: &str) -> Result<T, CommandError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let token = self.next_token(param)?;
        token
            .parse::<T>()
            .map_err(|e| self.invalid(param, token, e))
    }

    /// Parses the next token if there is one.
    fn optional<T>(&mut self, param: &str) -> Result<Option<T>, CommandError>
    where
        T: FromStr,
        T::Err: Display,
    {
        if self.has_more() {
            self.word(param).map(Some)
        } else {
            Ok(None)
        }
    }

    fn on_off(&mut self, param: &str) -> Result<bool, CommandError> {
        let token = self.next_token(param)?;
        match token {
            "ON" => Ok(true),
            "OFF" => Ok(false),
            _ => Err(self.invalid(param, token, "expected ON or OFF")),
        }
    }

    fn color_component(&mut self, param: &str) -> Result<u8, CommandError> {
        let token = self.next_token(param)?;
        token
            .parse::<u8>()
            .map_err(|_| self.invalid(param, token, "expected an integer from 0 to 255"))
    }

    fn invalid(&self, param: &str, value: impl Display, reason: impl Display) -> CommandError {
        CommandError::InvalidParameter {
            command: self.keyword.to_string(),
            param: param.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    fn finish(&self) -> Result<(), CommandError> {
        match self.tokens.get(self.pos) {
            Some(extra) => Err(CommandError::ExtraParameters {
                command: self.keyword.to_string(),
                extra: extra.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn parse(line: &str) -> Result<Command, CommandError> {
        let tokens = tokenize(line);
        let keyword = Keyword::lookup(&tokens[0]).expect("known keyword");
        parse_parameters(keyword, &tokens[1..])
    }

    #[test]
    fn test_rotate_joint_labels_are_optional() {
        let expected = Command::RotateJoint(JointAngles::new(45.0, -30.5));
        assert_eq!(parse("ROTATE_JOINT ANG1 45 ANG2 -30.5").unwrap(), expected);
        assert_eq!(parse("rotate_joint 45, -30.5").unwrap(), expected);
        assert_eq!(parse("ROTATE_JOINT ang1:45 -30.5").unwrap(), expected);
    }

    #[test]
    fn test_move_to_with_and_without_configuration() {
        assert_eq!(
            parse("MOVE_TO 300 100 left").unwrap(),
            Command::MoveTo {
                target: ToolPosition::new(300.0, 100.0),
                configuration: Some(ArmConfiguration::Left),
            }
        );
        assert!(matches!(
            parse("MOVE_TO 300 100").unwrap(),
            Command::MoveTo {
                configuration: None,
                ..
            }
        ));
        assert!(matches!(
            parse("MOVE_TO 300 100 UP"),
            Err(CommandError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_shape_resolution_is_optional() {
        match parse("LINE 300 0 300 100 high").unwrap() {
            Command::Draw { resolution, .. } => assert_eq!(resolution, Some(Resolution::High)),
            other => panic!("unexpected {:?}", other),
        }
        match parse("TRIANGLE 300 0 400 0 300 100").unwrap() {
            Command::Draw { shape, resolution } => {
                assert!(matches!(shape, Shape::Triangle(_)));
                assert_eq!(resolution, None);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_missing_and_extra_parameters() {
        assert_eq!(
            parse("LINE 300 0 300"),
            Err(CommandError::MissingParameter {
                command: "LINE".to_string(),
                param: "y1".to_string(),
            })
        );
        assert_eq!(
            parse("HOME now"),
            Err(CommandError::ExtraParameters {
                command: "HOME".to_string(),
                extra: "NOW".to_string(),
            })
        );
        assert!(matches!(
            parse("LINE 300 0 300 100 MEDIUM 7"),
            Err(CommandError::ExtraParameters { .. })
        ));
    }

    #[test]
    fn test_malformed_numbers() {
        assert!(matches!(
            parse("TRANSLATE 10 abc"),
            Err(CommandError::InvalidParameter { .. })
        ));
        assert!(matches!(
            parse("ROTATE inf"),
            Err(CommandError::InvalidParameter { .. })
        ));
        assert!(matches!(
            parse("ROTATE NaN"),
            Err(CommandError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_shape_parameter_ranges() {
        assert!(parse("ARC 300 0 0 0 90").is_err());
        assert!(parse("ARC 300 0 50 0 0").is_err());
        assert!(parse("ARC 300 0 50 0 -90 low").is_ok());
        assert!(parse("RECTANGLE 300 0 0 100").is_err());
        assert!(parse("RECTANGLE 300 0 -50 100").is_ok());
    }

    #[test]
    fn test_pen_color_components() {
        assert_eq!(
            parse("PEN_COLOR 255 128 0").unwrap(),
            Command::PenColor(PenColor::new(255, 128, 0))
        );
        assert!(parse("PEN_COLOR 256 0 0").is_err());
        assert!(parse("PEN_COLOR -1 0 0").is_err());
        assert!(parse("PEN_COLOR 1.5 0 0").is_err());
        assert!(parse("PEN_COLOR 1 2").is_err());
    }

    #[test]
    fn test_word_parameters() {
        assert_eq!(
            parse("MOTOR_SPEED high").unwrap(),
            Command::MotorSpeed(MotorSpeed::High)
        );
        assert_eq!(parse("CYCLE_PEN_COLORS off").unwrap(), Command::CyclePenColors(false));
        assert!(parse("CYCLE_PEN_COLORS maybe").is_err());
        assert!(parse("MOTOR_SPEED").is_err());
    }

    #[test]
    fn test_scale_uniform_or_per_axis() {
        assert_eq!(parse("SCALE 2").unwrap(), Command::Scale(2.0, 2.0));
        assert_eq!(parse("SCALE 2 0.5").unwrap(), Command::Scale(2.0, 0.5));
        assert!(parse("SCALE 2 0.5 1").is_err());
    }
}
