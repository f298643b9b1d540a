//! Voice asset lookup
//!
//! Two naming schemes live side by side in one flat voice folder:
//!
//! - **Keyed**: `{speaker}_{dialogue_key}.wav`, used whenever the line's
//!   command received a key when its scene was loaded.
//! - **Fallback**: `{speaker}_{day}_{stable_hash(text)}.wav`, used for lines
//!   whose key is unknown. The day label comes from [`DayContext`].
//!
//! A lookup that misses is reported on every attempt but recorded in the
//! [`MissingFileLedger`] only the first time.

pub mod coverage;
mod ledger;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::story::{DayContext, DialogueKey};
use crate::utils::{file_name_string, stable_hash};

pub use coverage::{CoverageEntry, CoverageReport, coverage_report, index_voice_folder};
pub use ledger::{MISSING_LOG_NAME, MissingFileLedger};

/// File extension of voice assets
pub const VOICE_EXTENSION: &str = "wav";

/// Outcome of checking a candidate voice file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetLookup {
    /// The file exists
    Found(PathBuf),
    /// The file is absent; the name has been reported
    Missing { file_name: String },
}

impl AssetLookup {
    pub fn is_found(&self) -> bool {
        matches!(self, AssetLookup::Found(_))
    }
}

/// Builds voice file paths inside one voice folder
#[derive(Debug, Clone)]
pub struct AssetLocator {
    voice_folder: PathBuf,
}

impl AssetLocator {
    pub fn new<P: AsRef<Path>>(voice_folder: P) -> Self {
        Self {
            voice_folder: voice_folder.as_ref().to_path_buf(),
        }
    }

    pub fn voice_folder(&self) -> &Path {
        &self.voice_folder
    }

    /// Create the voice folder if it does not exist yet
    pub fn ensure_folder(&self) -> Result<()> {
        if !self.voice_folder.is_dir() {
            std::fs::create_dir_all(&self.voice_folder)?;
            tracing::info!("Created voice folder {:?}", self.voice_folder);
        }
        Ok(())
    }

    /// File name for a keyed line: `{speaker}_{key}.wav`
    pub fn key_file_name(speaker: &str, key: &DialogueKey) -> String {
        format!("{speaker}_{key}.{VOICE_EXTENSION}")
    }

    /// File name for an unkeyed line: `{speaker}_{day}_{hash}.wav`
    pub fn fallback_file_name(speaker: &str, day: &str, text: &str) -> String {
        format!("{speaker}_{day}_{}.{VOICE_EXTENSION}", stable_hash(text))
    }

    /// Path of the keyed voice file for a line
    pub fn locate(&self, key: &DialogueKey, speaker: &str) -> PathBuf {
        self.voice_folder.join(Self::key_file_name(speaker, key))
    }

    /// Path of the fallback voice file for a line, using the current day label
    pub fn locate_fallback(&self, speaker: &str, text: &str, day: &DayContext) -> PathBuf {
        self.voice_folder
            .join(Self::fallback_file_name(speaker, day.current(), text))
    }

    /// Check whether a candidate exists, reporting and recording misses.
    pub fn lookup(
        &self,
        path: &Path,
        original_text: &str,
        ledger: &mut MissingFileLedger,
    ) -> AssetLookup {
        if path.is_file() {
            return AssetLookup::Found(path.to_path_buf());
        }

        let file_name = file_name_string(path);
        tracing::warn!("[missing] {}", file_name);
        ledger.record(&file_name, original_text);
        AssetLookup::Missing { file_name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::{CommandHandle, KeyRegistry, SceneCommand};

    #[test]
    fn test_keyed_path() {
        let locator = AssetLocator::new("/voices");
        let key = DialogueKey::new("Day3_intro", 4);
        assert_eq!(
            locator.locate(&key, "Angela"),
            PathBuf::from("/voices/Angela_Day3_intro_4.wav")
        );
    }

    #[test]
    fn test_fallback_path_uses_day_and_hash() {
        let locator = AssetLocator::new("/voices");
        let mut day = DayContext::new();
        assert_eq!(
            locator.locate_fallback("Angela", "Hello", &day),
            PathBuf::from("/voices/Angela_Common_223289465.wav")
        );

        day.update_from_key("Day3_12");
        assert_eq!(
            locator.locate_fallback("Angela", "Good morning, manager.", &day),
            PathBuf::from("/voices/Angela_Day3_-427590115.wav")
        );
    }

    #[test]
    fn test_lookup_found_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let locator = AssetLocator::new(dir.path());
        let mut registry = KeyRegistry::new();
        registry.resolve_scene("S1", &[SceneCommand::speak(1, "Angela", "Hi")]);
        let key = registry.key_for(CommandHandle(1)).unwrap();

        let path = locator.locate(key, "Angela");
        let mut ledger = MissingFileLedger::in_memory();

        let miss = locator.lookup(&path, "Hi", &mut ledger);
        assert_eq!(
            miss,
            AssetLookup::Missing {
                file_name: "Angela_S1_0.wav".to_string()
            }
        );
        assert!(ledger.contains("Angela_S1_0.wav"));

        std::fs::write(&path, b"RIFF").unwrap();
        assert!(locator.lookup(&path, "Hi", &mut ledger).is_found());
    }

    #[test]
    fn test_repeated_miss_recorded_once() {
        let dir = tempfile::tempdir().unwrap();
        let locator = AssetLocator::new(dir.path());
        let log = dir.path().join(MISSING_LOG_NAME);
        let mut ledger = MissingFileLedger::open(&log);

        let path = locator.locate_fallback("Malkuth", "Hi!", &DayContext::new());
        for _ in 0..10 {
            assert!(!locator.lookup(&path, "Hi!", &mut ledger).is_found());
        }
        assert_eq!(ledger.len(), 1);

        let content = std::fs::read_to_string(&log).unwrap();
        assert_eq!(content.matches(" | original: Hi!").count(), 1);
    }

    #[test]
    fn test_ensure_folder_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let locator = AssetLocator::new(dir.path().join("VoiceData"));
        locator.ensure_folder().unwrap();
        assert!(locator.voice_folder().is_dir());
        // Second call is a no-op
        locator.ensure_folder().unwrap();
    }
}
