mod bootstrap;
mod commands;

use std::io::{BufWriter, Write};

use anyhow::Result;
use clap::Parser;
use stats_core::settings::{Command, Settings};

fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(settings.effective_log_level())?;
    tracing::debug!("match-stats v{} starting", env!("CARGO_PKG_VERSION"));

    let hero_names = settings.hero_names.as_deref();
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match &settings.command {
        Command::Histogram(args) => {
            tracing::info!("Building weekly histograms from {}", args.dir.display());
            commands::run_histogram(args, hero_names, &mut out)?;
        }
        Command::Correlations(args) => {
            tracing::info!("Sorting hero correlations from {}", args.dir.display());
            commands::run_correlations(args, hero_names, &mut out)?;
        }
        Command::Continuity(args) => {
            commands::run_continuity(args, std::io::stdin().lock(), &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}
