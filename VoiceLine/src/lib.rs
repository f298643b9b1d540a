#![allow(non_snake_case)]
//! # VoiceLine
//!
//! Engine library behind `StoryDub`: everything needed to turn a story
//! dialogue line into a voice file on disk, without touching an audio
//! device.
//!
//! ## Pieces
//!
//! - **Dialogue keys** - `{scene_id}_{speak_index}` per speak command, assigned
//!   once when a scene is materialized ([`story::KeyRegistry`])
//! - **Day context** - a coarse `Day{n}` label mined from keys
//!   ([`story::DayContext`])
//! - **Asset locator** - keyed and hash-fallback file names, plus the
//!   once-per-name missing-file ledger ([`locator`])
//! - **WAV + gain** - decoding to `f32` and the clamping gain stage
//!   ([`formats::wav`])
//!
//! ## Quick Start
//!
//! ```no_run
//! use voiceline::prelude::*;
//!
//! let locator = AssetLocator::new("VoiceData");
//! let mut ledger = MissingFileLedger::open("VoiceData/_MISSING_FILES.txt");
//! let day = DayContext::new();
//!
//! let path = locator.locate_fallback("Angela", "Good morning, manager.", &day);
//! if let AssetLookup::Found(path) = locator.lookup(&path, "Good morning, manager.", &mut ledger) {
//!     let mut audio = load_wav_file(&path)?;
//!     audio.amplify(2.0);
//! }
//! # Ok::<(), voiceline::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `voiceline` command-line binary

pub mod error;
pub mod formats;
pub mod locator;
pub mod story;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::wav::{DecodedAudio, WavError, amplify, decode_wav, load_wav_file};
    pub use crate::locator::{AssetLocator, AssetLookup, MissingFileLedger};
    pub use crate::story::{
        CommandHandle, DayContext, DialogueKey, KeyRegistry, SceneCommand, SpeakLine,
        StoryCommand, StoryScript,
    };
    pub use crate::utils::stable_hash;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
