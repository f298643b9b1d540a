use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::config::DubConfig;

pub mod config;
pub mod play;
pub mod replay;

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a story script, playing each line's voice file
    Replay {
        /// Story script (JSON)
        script: PathBuf,

        /// Simulate fast-forward: lines are skipped, nothing plays
        #[arg(long)]
        skip: bool,

        /// Pause between lines, after the clip ends
        #[arg(long, default_value_t = 0)]
        line_delay_ms: u64,
    },

    /// Play one WAV file through the gain stage
    Play {
        /// WAV file
        file: PathBuf,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Write a config file with the effective settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective settings
    Show,
}

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self, config_path: &Path, config: DubConfig) -> anyhow::Result<()> {
        match self {
            Commands::Replay {
                script,
                skip,
                line_delay_ms,
            } => replay::execute(script, &config, *skip, *line_delay_ms),
            Commands::Play { file } => play::execute(file, &config),
            Commands::Config { action } => match action {
                ConfigAction::Init { force } => config::init(config_path, &config, *force),
                ConfigAction::Show => config::show(config_path, &config),
            },
        }
    }
}
