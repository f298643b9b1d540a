use clap::Subcommand;
use std::path::PathBuf;

pub mod execute;
pub mod story;
pub mod wav;

#[derive(Subcommand)]
pub enum Commands {
    /// Print the stable hash used in fallback file names
    Hash {
        /// Dialogue text (exactly as shown on screen)
        text: String,
    },

    /// Extract the day label from a dialogue key
    Day {
        /// Dialogue key, e.g. "Day3_intro_12"
        key: String,
    },

    /// Resolve the voice file for a line and check that it exists
    Locate {
        /// Voice folder
        #[arg(long)]
        voices: PathBuf,

        /// Speaker name
        #[arg(short, long)]
        speaker: String,

        /// Dialogue key (keyed naming)
        #[arg(short, long, conflicts_with_all = ["text", "day"])]
        key: Option<String>,

        /// Dialogue text (fallback naming)
        #[arg(short, long, required_unless_present = "key")]
        text: Option<String>,

        /// Day label for fallback naming (defaults to "Common")
        #[arg(short, long)]
        day: Option<String>,
    },

    /// Show WAV header information
    Inspect {
        /// WAV file
        file: PathBuf,
    },

    /// Apply the gain stage to a WAV file offline
    Amplify {
        /// Source WAV file
        source: PathBuf,

        /// Output WAV file (16-bit PCM)
        destination: PathBuf,

        /// Gain multiplier (values <= 1.0 leave samples unchanged)
        #[arg(short, long)]
        gain: f32,
    },

    /// Report which lines of a story script have voice files
    Coverage {
        /// Story script (JSON)
        script: PathBuf,

        /// Voice folder
        #[arg(long)]
        voices: PathBuf,

        /// Only list lines without a voice file
        #[arg(long)]
        missing_only: bool,
    },
}
