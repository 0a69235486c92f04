//! Command line interface

use anyhow::Context;
use clap::Parser;
use scarakit_commands::{CommandDispatcher, DispatchOptions, RunSummary, Session};
use scarakit_communication::{Communicator, NoOpCommunicator, TcpCommunicator};
use scarakit_core::{ConsoleSink, FanoutReporter, LogFileSink};
use scarakit_designer::Resolution;
use scarakit_kinematics::KinematicsSolver;
use scarakit_settings::Config;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "scarakit", version, about = "Draw with a SCARA robot from a command file")]
pub struct Cli {
    /// Command file to run
    pub file: PathBuf,

    /// Configuration file (.toml or .json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Robot controller host
    #[arg(long)]
    pub host: Option<String>,

    /// Robot controller port
    #[arg(long)]
    pub port: Option<u16>,

    /// Operator log file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Resolution for shapes that do not name one
    #[arg(long)]
    pub resolution: Option<Resolution>,

    /// Validate and log every command without connecting to the robot
    #[arg(long)]
    pub dry_run: bool,

    /// Tracing filter used when RUST_LOG is not set
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Loads the configuration file and applies the command line overrides.
    ///
    /// Without `--config` the platform default location is used when it exists.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_file(path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => match Config::default_path() {
                Ok(path) => Config::load_or_default(&path)?,
                Err(_) => Config::default(),
            },
        };
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.connection.host = host.clone();
        }
        if let Some(port) = self.port {
            config.connection.port = port;
        }
        if let Some(log_file) = &self.log_file {
            config.logging.log_file = log_file.clone();
        }
        if let Some(resolution) = self.resolution {
            config.paths.default_resolution = resolution;
        }
    }
}

/// Runs the command file named on the command line.
pub fn run(cli: &Cli, config: Config) -> anyhow::Result<RunSummary> {
    let geometry = config.arm.to_geometry()?;

    let mut reporter = FanoutReporter::new();
    reporter.add_sink(Box::new(
        LogFileSink::create(&config.logging.log_file).context("Failed to open operator log")?,
    ));
    if config.logging.mirror_console {
        reporter.add_sink(Box::new(ConsoleSink));
    }

    let params = config.connection.to_params();
    let mut communicator: Box<dyn Communicator> = if cli.dry_run {
        Box::new(NoOpCommunicator::new())
    } else {
        Box::new(TcpCommunicator::new())
    };
    communicator
        .connect(&params)
        .with_context(|| format!("Unable to reach robot controller at {}", params.address()))?;

    let options = DispatchOptions {
        default_resolution: config.paths.default_resolution,
        auto_pen: config.paths.auto_pen,
        max_joint_step_deg: config.paths.max_joint_step_deg,
    };
    let mut dispatcher = CommandDispatcher::new(
        KinematicsSolver::new(geometry),
        options,
        communicator,
        Box::new(reporter),
    );

    let mut session = Session::new();
    let result = dispatcher.run_file(&mut session, &cli.file);
    if let Err(e) = dispatcher.communicator_mut().disconnect() {
        tracing::warn!("Disconnect failed: {}", e);
    }

    let summary = result.with_context(|| format!("Run of {} aborted", cli.file.display()))?;
    Ok(summary)
}
