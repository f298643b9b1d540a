//! Story command types
//!
//! These mirror the host's scene data closely enough to drive key
//! assignment: an ordered list of commands per scene, where only speak
//! commands carry a voice line.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity of one command object in the host.
///
/// The host distinguishes commands by object identity; any stable handle
/// works here (sequence numbers for scripts, addresses for a live hook).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandHandle(pub u64);

impl fmt::Display for CommandHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single line of spoken dialogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakLine {
    /// Speaker name as it appears in voice file names
    pub speaker: String,
    /// On-screen text of the line
    pub text: String,
}

/// Command payload within a scene
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoryCommand {
    /// A dialogue line
    Speak(SpeakLine),
    /// Anything else (music cues, portraits, waits...)
    Other {
        #[serde(default)]
        name: String,
    },
}

impl StoryCommand {
    /// Returns the speak payload if this is a speak command
    pub fn as_speak(&self) -> Option<&SpeakLine> {
        match self {
            StoryCommand::Speak(line) => Some(line),
            StoryCommand::Other { .. } => None,
        }
    }

    pub fn is_speak(&self) -> bool {
        matches!(self, StoryCommand::Speak(_))
    }
}

/// A command together with its host identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneCommand {
    pub handle: CommandHandle,
    pub command: StoryCommand,
}

impl SceneCommand {
    pub fn speak(handle: u64, speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            handle: CommandHandle(handle),
            command: StoryCommand::Speak(SpeakLine {
                speaker: speaker.into(),
                text: text.into(),
            }),
        }
    }

    pub fn other(handle: u64, name: impl Into<String>) -> Self {
        Self {
            handle: CommandHandle(handle),
            command: StoryCommand::Other { name: name.into() },
        }
    }
}

/// Stable identifier of one speak line: `{scene_id}_{speak_index}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DialogueKey(String);

impl DialogueKey {
    /// Build the key for the `index`-th speak command of `scene_id`
    pub fn new(scene_id: &str, index: usize) -> Self {
        Self(format!("{scene_id}_{index}"))
    }

    /// Wrap an already formatted key, e.g. one typed by a user
    pub fn from_raw(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DialogueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DialogueKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
