//! Command dispatcher state machine
//!
//! Every line moves through
//! `AwaitingLine -> CommandRecognized -> ParameterValid -> Dispatched`, or drops to
//! `Rejected` at the first stage that fails. Robot commands for a line are built in
//! full before the first one is sent, so a rejected line never moves the arm.

use crate::keyword::Keyword;
use crate::parser::{parse_parameters, Command};
use crate::session::Session;
use crate::tokenizer::tokenize;
use scarakit_communication::{Communicator, RobotCommand};
use scarakit_core::{CommandError, Error, GeometryError, JointAngles, Reporter, Result};
use scarakit_designer::{PathShape, Resolution, Shape};
use scarakit_kinematics::arm::LIMIT_TOLERANCE;
use scarakit_kinematics::{KinematicsSolver, PathValidator};
use std::fmt;
use std::path::Path;

/// Reported after a line's commands were all written to the robot.
pub const SUCCESS_MESSAGE: &str = "Command sent to robot!";

/// Stages of processing for a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState {
    AwaitingLine,
    CommandRecognized,
    ParameterValid,
    Dispatched,
    Rejected,
}

impl fmt::Display for LineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::AwaitingLine => "AWAITING_LINE",
            Self::CommandRecognized => "COMMAND_RECOGNIZED",
            Self::ParameterValid => "PARAMETER_VALID",
            Self::Dispatched => "DISPATCHED",
            Self::Rejected => "REJECTED",
        };
        f.write_str(s)
    }
}

/// Why a line was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    Syntax(CommandError),
    Geometry(GeometryError),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(e) => write!(f, "{}", e),
            Self::Geometry(e) => write!(f, "{}", e),
        }
    }
}

impl From<CommandError> for RejectReason {
    fn from(e: CommandError) -> Self {
        Self::Syntax(e)
    }
}

impl From<GeometryError> for RejectReason {
    fn from(e: GeometryError) -> Self {
        Self::Geometry(e)
    }
}

/// Result of processing one line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// The line was executed; `sent` robot commands were written.
    Dispatched { keyword: Keyword, sent: usize },
    /// The line was skipped. `stage` is the last state reached before rejection.
    Rejected {
        stage: LineState,
        reason: RejectReason,
    },
}

impl LineOutcome {
    pub fn state(&self) -> LineState {
        match self {
            Self::Dispatched { .. } => LineState::Dispatched,
            Self::Rejected { .. } => LineState::Rejected,
        }
    }

    pub fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched { .. })
    }
}

/// Counts for a whole command file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub lines: usize,
    pub dispatched: usize,
    pub rejected: usize,
}

/// Dispatch behaviour that comes from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchOptions {
    /// Resolution for shape commands that do not name one.
    pub default_resolution: Resolution,
    /// Wrap every shape in pen up / move / pen down ... pen up.
    pub auto_pen: bool,
    /// Largest joint step between consecutive path samples.
    pub max_joint_step_deg: Option<f64>,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            default_resolution: Resolution::Medium,
            auto_pen: true,
            max_joint_step_deg: None,
        }
    }
}

/// Everything a line decided before anything is sent.
struct PlannedLine {
    keyword: Keyword,
    commands: Vec<RobotCommand>,
    /// Extra operator message reported once the commands are sent.
    note: Option<String>,
}

/// Executes command lines against a [`Session`].
pub struct CommandDispatcher {
    solver: KinematicsSolver,
    options: DispatchOptions,
    communicator: Box<dyn Communicator>,
    reporter: Box<dyn Reporter>,
}

impl CommandDispatcher {
    pub fn new(
        solver: KinematicsSolver,
        options: DispatchOptions,
        communicator: Box<dyn Communicator>,
        reporter: Box<dyn Reporter>,
    ) -> Self {
        Self {
            solver,
            options,
            communicator,
            reporter,
        }
    }

    pub fn options(&self) -> &DispatchOptions {
        &self.options
    }

    pub fn communicator_mut(&mut self) -> &mut dyn Communicator {
        self.communicator.as_mut()
    }

    /// Processes one line. Syntax and geometry problems come back as
    /// [`LineOutcome::Rejected`]; `Err` means the run cannot continue.
    pub fn process_line(
        &mut self,
        session: &mut Session,
        line_no: usize,
        line: &str,
    ) -> Result<LineOutcome> {
        let text = line.trim_end_matches(&['\r', '\n'][..]);
        self.reporter.report(&format!("Line {:02}: {}", line_no, text))?;

        let mut stage = LineState::AwaitingLine;
        match self.execute(session, &mut stage, text) {
            Ok(planned) => {
                let sent = self.send_all(session, line_no, &planned.commands)?;
                tracing::trace!("line {}: {} -> {}", line_no, stage, LineState::Dispatched);
                if let Some(note) = &planned.note {
                    self.reporter.report(note)?;
                }
                if sent > 0 {
                    self.reporter.report(SUCCESS_MESSAGE)?;
                }
                Ok(LineOutcome::Dispatched {
                    keyword: planned.keyword,
                    sent,
                })
            }
            Err(reason) => {
                tracing::warn!("Line {} rejected at {}: {}", line_no, stage, reason);
                self.reporter
                    .report(&format!("Line {:02} rejected: {}", line_no, reason))?;
                Ok(LineOutcome::Rejected { stage, reason })
            }
        }
    }

    /// Processes every line in order, numbering from 1.
    pub fn run_lines<'a, I>(&mut self, session: &mut Session, lines: I) -> Result<RunSummary>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut summary = RunSummary::default();
        for (index, line) in lines.into_iter().enumerate() {
            let outcome = self.process_line(session, index + 1, line)?;
            summary.lines += 1;
            if outcome.is_dispatched() {
                summary.dispatched += 1;
            } else {
                summary.rejected += 1;
            }
        }
        tracing::info!(
            "Processed {} lines: {} dispatched, {} rejected",
            summary.lines,
            summary.dispatched,
            summary.rejected
        );
        Ok(summary)
    }

    pub fn run_file(&mut self, session: &mut Session, path: &Path) -> Result<RunSummary> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::other(format!("Cannot open command file {}: {}", path.display(), e))
        })?;
        tracing::info!("Running command file {}", path.display());
        self.run_lines(session, content.lines())
    }

    /// Recognizes, parses and plans a line without touching the robot.
    fn execute(
        &self,
        session: &mut Session,
        stage: &mut LineState,
        line: &str,
    ) -> std::result::Result<PlannedLine, RejectReason> {
        let tokens = tokenize(line);
        let first = tokens.first().ok_or(CommandError::BlankLine)?;
        let keyword = Keyword::lookup(first).ok_or_else(|| CommandError::UnknownKeyword {
            keyword: first.clone(),
        })?;
        *stage = LineState::CommandRecognized;

        let command = parse_parameters(keyword, &tokens[1..])?;
        *stage = LineState::ParameterValid;

        let mut note = None;
        let commands = self.plan(session, command, &mut note)?;
        Ok(PlannedLine {
            keyword,
            commands,
            note,
        })
    }

    /// Robot commands for one parsed command. Transform commands update the session
    /// directly and produce nothing to send.
    fn plan(
        &self,
        session: &mut Session,
        command: Command,
        note: &mut Option<String>,
    ) -> std::result::Result<Vec<RobotCommand>, GeometryError> {
        let commands = match command {
            Command::RotateJoint(angles) => {
                let position = self.solver.forward_checked(&angles)?;
                tracing::info!("Joint move {} puts the tool at {}", angles, position);
                *note = Some(format!("Tool position: {}", position));
                vec![RobotCommand::RotateJoint(angles)]
            }
            Command::MotorSpeed(speed) => vec![RobotCommand::MotorSpeed(speed)],
            Command::PenUp => vec![RobotCommand::PenUp],
            Command::PenDown => vec![RobotCommand::PenDown],
            Command::CyclePenColors(on) => vec![RobotCommand::CyclePenColors(on)],
            Command::PenColor(color) => vec![RobotCommand::PenColor(color)],
            Command::ClearTrace => vec![RobotCommand::ClearTrace],
            Command::ClearRemoteCommandLog => vec![RobotCommand::ClearRemoteCommandLog],
            Command::ClearPositionLog => vec![RobotCommand::ClearPositionLog],
            Command::ShutdownSimulation => vec![RobotCommand::ShutdownSimulation],
            Command::End => vec![RobotCommand::End],
            Command::Home => vec![RobotCommand::Home],
            Command::MoveTo {
                target,
                configuration,
            } => {
                let position = session.transform.apply(target);
                let (config, angles) =
                    self.solver
                        .solve_point(&position, configuration, &session.current_angles)?;
                tracing::info!("Moving to {} with the {} arm", position, config);
                vec![RobotCommand::RotateJoint(angles)]
            }
            Command::Draw { shape, resolution } => self.plan_shape(
                session,
                &shape,
                resolution.unwrap_or(self.options.default_resolution),
            )?,
            Command::Rotate(angle) => {
                session.transform.compose_rotation(angle);
                Vec::new()
            }
            Command::Translate(dx, dy) => {
                session.transform.compose_translation(dx, dy);
                Vec::new()
            }
            Command::Scale(sx, sy) => {
                session.transform.compose_scale(sx, sy);
                Vec::new()
            }
            Command::ResetTransformMatrix => {
                session.transform.reset();
                Vec::new()
            }
        };
        Ok(commands)
    }

    fn plan_shape(
        &self,
        session: &Session,
        shape: &Shape,
        resolution: Resolution,
    ) -> std::result::Result<Vec<RobotCommand>, GeometryError> {
        let reach = self.solver.geometry().lmax() + LIMIT_TOLERANCE;
        let samples = shape.transformed_samples(&session.transform, resolution, reach)?;
        let check = PathValidator::new(&self.solver)
            .with_max_joint_step(self.options.max_joint_step_deg)
            .check(&samples, &session.current_angles);
        tracing::debug!(
            "{}: LEFT travel {:.2} deg (drawable {}), RIGHT travel {:.2} deg (drawable {})",
            shape.name(),
            check.left.total_angle_delta_deg,
            check.left.drawable,
            check.right.total_angle_delta_deg,
            check.right.drawable
        );

        let (config, angles) = check
            .into_best()
            .ok_or_else(|| GeometryError::PathNotDrawable {
                shape: shape.name().to_string(),
                samples: samples.len(),
            })?;
        tracing::info!(
            "Drawing {} with {} points using the {} arm",
            shape.name(),
            angles.len(),
            config
        );

        Ok(self.path_commands(&angles))
    }

    fn path_commands(&self, angles: &[JointAngles]) -> Vec<RobotCommand> {
        let Some((first, rest)) = angles.split_first() else {
            return Vec::new();
        };
        if !self.options.auto_pen {
            return angles.iter().copied().map(RobotCommand::RotateJoint).collect();
        }

        let mut commands = Vec::with_capacity(angles.len() + 3);
        commands.push(RobotCommand::PenUp);
        commands.push(RobotCommand::RotateJoint(*first));
        commands.push(RobotCommand::PenDown);
        commands.extend(rest.iter().copied().map(RobotCommand::RotateJoint));
        commands.push(RobotCommand::PenUp);
        commands
    }

    fn send_all(
        &mut self,
        session: &mut Session,
        line_no: usize,
        commands: &[RobotCommand],
    ) -> Result<usize> {
        for command in commands {
            let wire = command.to_string();
            if let Err(e) = self.communicator.send_command(&wire) {
                tracing::error!("Line {} aborted while sending '{}': {}", line_no, wire, e);
                self.reporter
                    .report(&format!("Line {:02}: robot communication failed: {}", line_no, e))?;
                return Err(e);
            }
            session.record(command);
        }
        Ok(commands.len())
    }
}
