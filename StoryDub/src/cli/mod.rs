//! StoryDub CLI - replay story scripts through the dubbing pipeline

pub mod commands;

use std::path::{Path, PathBuf};

use clap::Parser;
use commands::Commands;

use crate::config::{DEFAULT_CONFIG_NAME, DubConfig};

#[derive(Parser)]
#[command(name = "storydub")]
#[command(about = "StoryDub: voice-over playback for story dialogue", long_about = None)]
struct Cli {
    /// Config file (defaults to ./storydub.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the voice folder
    #[arg(long, global = true)]
    voices: Option<PathBuf>,

    /// Override the gain multiplier
    #[arg(short, long, global = true)]
    gain: Option<f32>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_NAME))
    }

    /// File values (or defaults) with command-line overrides applied
    fn effective_config(&self, path: &Path) -> anyhow::Result<DubConfig> {
        let mut config = if path.is_file() {
            DubConfig::load(path)?
        } else if self.config.is_some() {
            anyhow::bail!("config file not found: {}", path.display());
        } else {
            DubConfig::default()
        };

        if let Some(voices) = &self.voices {
            config.voice_folder.clone_from(voices);
        }
        if let Some(gain) = self.gain {
            config.gain_multiplier = gain;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Run the StoryDub CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let path = cli.config_path();
    let config = cli.effective_config(&path)?;
    cli.command.execute(&path, config)?;

    Ok(())
}
