#![allow(non_snake_case)]
//! `StoryDub` - voice-over playback for story dialogue
//!
//! Sits between a story host and the [`voiceline`] engine. The host reports
//! two events: a scene's data being loaded, and a dialogue line about to be
//! shown. [`session::DubSession`] turns those into voice file lookups and
//! requests on a single [`playback::PlaybackSlot`], which decodes, applies
//! the configured gain and plays the newest request only.
//!
//! ## Feature Flags
//!
//! - `audio` - Rodio output on the default device
//! - `cli` - The `storydub` binary (needs `audio`)

// Re-export voiceline
pub use voiceline;

pub mod config;
pub mod error;
pub mod playback;
pub mod session;

#[cfg(all(feature = "cli", feature = "audio"))]
pub mod cli;

pub use config::DubConfig;
pub use error::{Error, Result};
pub use session::{DubSession, LineOutcome};
