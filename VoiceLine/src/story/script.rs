//! JSON story scripts
//!
//! A story script stands in for the host's scene data so a session can be
//! replayed (or audited) without the game running. Scenes marked
//! `"keyed": false` never reach the key registry, which is how lines that
//! take the fallback naming path are modelled.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::types::{CommandHandle, SceneCommand, StoryCommand};
use crate::error::{Error, Result};

fn default_true() -> bool {
    true
}

/// Root of a story script file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoryScript {
    #[serde(default)]
    pub scenes: Vec<SceneScript>,
}

/// One scene as written in the script
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneScript {
    pub id: String,
    /// Whether the scene's data passes through the key resolver
    #[serde(default = "default_true")]
    pub keyed: bool,
    #[serde(default)]
    pub commands: Vec<StoryCommand>,
}

/// A scene whose commands have been given host handles
#[derive(Debug, Clone)]
pub struct MaterializedScene {
    pub id: String,
    pub keyed: bool,
    pub commands: Vec<SceneCommand>,
}

impl StoryScript {
    /// Parse a script from JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        let script: StoryScript = serde_json::from_str(content)?;
        script.validate()?;
        Ok(script)
    }

    /// Load a script from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    fn validate(&self) -> Result<()> {
        if let Some(scene) = self.scenes.iter().find(|s| s.id.trim().is_empty()) {
            return Err(Error::InvalidScript {
                message: format!(
                    "scene with {} commands has an empty id",
                    scene.commands.len()
                ),
            });
        }
        Ok(())
    }

    /// Total number of speak commands across all scenes
    pub fn speak_count(&self) -> usize {
        self.scenes
            .iter()
            .flat_map(|s| s.commands.iter())
            .filter(|c| c.is_speak())
            .count()
    }

    /// Give every command a sequential handle, in script order.
    ///
    /// Handles are unique across the whole script, so the same command is
    /// never confused with one from another scene.
    pub fn materialize(&self) -> Vec<MaterializedScene> {
        let mut next_handle = 0u64;
        self.scenes
            .iter()
            .map(|scene| MaterializedScene {
                id: scene.id.clone(),
                keyed: scene.keyed,
                commands: scene
                    .commands
                    .iter()
                    .map(|command| {
                        next_handle += 1;
                        SceneCommand {
                            handle: CommandHandle(next_handle),
                            command: command.clone(),
                        }
                    })
                    .collect(),
            })
            .collect()
    }
}
