//! QuestLoc CLI - Command-line interface for the localization pipeline

pub mod commands;
pub mod progress;

use std::path::PathBuf;

use clap::Parser;
use commands::Commands;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "questloc")]
#[command(version, about = "QuestLoc: FTB Quests localization pipeline", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./questloc.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Run the QuestLoc CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    cli.command.execute(config)?;

    Ok(())
}
