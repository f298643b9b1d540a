//! VoiceLine CLI - inspection tools for voice folders and story scripts

pub mod commands;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "voiceline")]
#[command(about = "VoiceLine: dialogue voice-line naming and WAV tools", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Run the VoiceLine CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    cli.command.execute()?;

    Ok(())
}
