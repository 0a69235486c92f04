use clap::Parser;
use scarakit::{init_logging, run, Cli, BUILD_DATE, VERSION};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    init_logging(cli.log_level.as_deref().unwrap_or(&config.logging.level))?;
    tracing::info!("ScaraKit {} (built {})", VERSION, BUILD_DATE);

    let summary = run(&cli, config)?;
    if summary.rejected > 0 {
        tracing::warn!("{} of {} lines were rejected", summary.rejected, summary.lines);
    }

    Ok(())
}
