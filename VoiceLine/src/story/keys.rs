//! Dialogue key assignment
//!
//! Keys are handed out when a scene's command list is first materialized.
//! Only speak commands consume an index, and a command that already has a
//! key keeps it forever (first writer wins), so re-loading a scene is a
//! no-op for lines seen before.

use std::collections::HashMap;

use super::types::{CommandHandle, DialogueKey, SceneCommand};

/// Registry of assigned dialogue keys, indexed by command identity
#[derive(Debug, Default, Clone)]
pub struct KeyRegistry {
    keys: HashMap<CommandHandle, DialogueKey>,
}

impl KeyRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign keys to every speak command of a scene.
    ///
    /// Returns the number of commands that received a new key.
    pub fn resolve_scene(&mut self, scene_id: &str, commands: &[SceneCommand]) -> usize {
        let mut speak_index = 0usize;
        let mut assigned = 0usize;

        for cmd in commands.iter().filter(|c| c.command.is_speak()) {
            self.keys.entry(cmd.handle).or_insert_with(|| {
                assigned += 1;
                DialogueKey::new(scene_id, speak_index)
            });
            speak_index += 1;
        }

        tracing::debug!(
            "Resolved scene {}: {} speak lines, {} new keys",
            scene_id,
            speak_index,
            assigned
        );
        assigned
    }

    /// Look up the key assigned to a command
    pub fn key_for(&self, handle: CommandHandle) -> Option<&DialogueKey> {
        self.keys.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
