//! Dubbing session: host events in, voice requests out
//!
//! A [`DubSession`] owns every piece of per-process state (key registry,
//! day label, missing-file ledger, playback slot). The host calls it from a
//! single thread, once per scene load and once per dialogue line.

use voiceline::locator::{AssetLocator, AssetLookup, MissingFileLedger};
use voiceline::story::{DayContext, KeyRegistry, SceneCommand};
use voiceline::utils::file_name_string;

use crate::config::DubConfig;
use crate::error::Result;
use crate::playback::{LoadHandle, PlaybackSlot, VoiceLoader, VoiceOutput};

/// What a dialogue-line event led to
#[derive(Debug)]
pub enum LineOutcome {
    /// The player is fast-forwarding; nothing was requested
    Skipped,
    /// No command, or not a speak command
    Ignored,
    /// The voice file exists and is loading
    Requested { file_name: String, handle: LoadHandle },
    /// No voice file; the miss was reported and current audio left alone
    Missing { file_name: String },
}

pub struct DubSession {
    locator: AssetLocator,
    keys: KeyRegistry,
    day: DayContext,
    ledger: MissingFileLedger,
    slot: PlaybackSlot,
}

impl DubSession {
    /// Start a session: create the voice folder and open the missing-file log
    pub fn new(
        config: &DubConfig,
        loader: impl VoiceLoader,
        output: impl VoiceOutput,
    ) -> Result<Self> {
        config.validate()?;

        let locator = AssetLocator::new(&config.voice_folder);
        locator.ensure_folder()?;
        let ledger = MissingFileLedger::open(config.missing_log_path());
        let slot = PlaybackSlot::new(loader, output, config.playback_settings());

        tracing::info!("Voice gain multiplier: {}", config.gain_multiplier);

        Ok(Self {
            locator,
            keys: KeyRegistry::new(),
            day: DayContext::new(),
            ledger,
            slot,
        })
    }

    /// Scene data was materialized; assign keys to its speak commands.
    ///
    /// Returns the number of newly assigned keys.
    pub fn on_scene_loaded(&mut self, scene_id: &str, commands: &[SceneCommand]) -> usize {
        self.keys.resolve_scene(scene_id, commands)
    }

    /// A dialogue line is about to be shown
    pub fn on_dialogue_line(
        &mut self,
        command: Option<&SceneCommand>,
        skipping: bool,
    ) -> LineOutcome {
        if skipping {
            return LineOutcome::Skipped;
        }
        let Some(command) = command else {
            return LineOutcome::Ignored;
        };
        let Some(line) = command.command.as_speak() else {
            return LineOutcome::Ignored;
        };

        let candidate = match self.keys.key_for(command.handle) {
            Some(key) => {
                self.day.update_from_key(key.as_str());
                self.locator.locate(key, &line.speaker)
            }
            None => self
                .locator
                .locate_fallback(&line.speaker, &line.text, &self.day),
        };

        match self.locator.lookup(&candidate, &line.text, &mut self.ledger) {
            AssetLookup::Found(path) => LineOutcome::Requested {
                file_name: file_name_string(&path),
                handle: self.slot.request(&path),
            },
            AssetLookup::Missing { file_name } => LineOutcome::Missing { file_name },
        }
    }

    pub fn day_context(&self) -> &DayContext {
        &self.day
    }

    pub fn keys(&self) -> &KeyRegistry {
        &self.keys
    }

    pub fn ledger(&self) -> &MissingFileLedger {
        &self.ledger
    }

    pub fn locator(&self) -> &AssetLocator {
        &self.locator
    }

    pub fn slot(&self) -> &PlaybackSlot {
        &self.slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::{AudioError, LoadOutcome, PlaybackState};
    use std::path::Path;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;
    use voiceline::formats::wav::DecodedAudio;

    struct SilentLoader;

    impl VoiceLoader for SilentLoader {
        fn load(&self, _path: &Path) -> std::result::Result<DecodedAudio, AudioError> {
            Ok(DecodedAudio {
                samples: vec![0.0; 4],
                channels: 1,
                sample_rate: 8000,
            })
        }
    }

    #[derive(Default)]
    struct NamesOutput {
        names: Mutex<Vec<String>>,
        playing: AtomicBool,
    }

    impl VoiceOutput for NamesOutput {
        fn start(&self, name: &str, _audio: DecodedAudio) -> std::result::Result<(), AudioError> {
            self.names.lock().unwrap().push(name.to_string());
            self.playing.store(true, Ordering::SeqCst);
            Ok(())
        }

        fn stop(&self) {
            self.playing.store(false, Ordering::SeqCst);
        }

        fn is_playing(&self) -> bool {
            self.playing.load(Ordering::SeqCst)
        }
    }

    fn config_in(dir: &Path) -> DubConfig {
        DubConfig {
            voice_folder: dir.join("VoiceData"),
            ..DubConfig::default()
        }
    }

    #[test]
    fn test_new_creates_folder_and_banner() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        let session = DubSession::new(&config, SilentLoader, NamesOutput::default()).unwrap();

        assert!(config.voice_folder.is_dir());
        let log = std::fs::read_to_string(config.missing_log_path()).unwrap();
        assert!(log.starts_with("\n--- session start: "));
        assert_eq!(session.day_context().current(), "Common");
        assert!(session.keys().is_empty());
    }

    #[test]
    fn test_skipping_and_non_speak_lines() {
        let dir = tempdir().unwrap();
        let mut session =
            DubSession::new(&config_in(dir.path()), SilentLoader, NamesOutput::default())
                .unwrap();
        let speak = SceneCommand::speak(1, "Angela", "Hello");
        let other = SceneCommand::other(2, "bgm");

        assert!(matches!(
            session.on_dialogue_line(Some(&speak), true),
            LineOutcome::Skipped
        ));
        assert!(matches!(
            session.on_dialogue_line(None, false),
            LineOutcome::Ignored
        ));
        assert!(matches!(
            session.on_dialogue_line(Some(&other), false),
            LineOutcome::Ignored
        ));
        assert!(session.ledger().is_empty());
    }

    #[test]
    fn test_keyed_line_plays() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        let output = Arc::new(NamesOutput::default());
        let mut session = DubSession::new(&config, SilentLoader, Arc::clone(&output)).unwrap();

        let commands = vec![
            SceneCommand::other(1, "fade"),
            SceneCommand::speak(2, "Angela", "Good morning."),
        ];
        assert_eq!(session.on_scene_loaded("Day4_office", &commands), 1);
        std::fs::write(config.voice_folder.join("Angela_Day4_office_0.wav"), b"").unwrap();

        match session.on_dialogue_line(Some(&commands[1]), false) {
            LineOutcome::Requested { file_name, handle } => {
                assert_eq!(file_name, "Angela_Day4_office_0.wav");
                assert_eq!(handle.join(), LoadOutcome::Played);
            }
            other => panic!("expected a request, got {other:?}"),
        }
        assert_eq!(session.day_context().current(), "Day4");
        assert_eq!(session.slot().state(), PlaybackState::Playing);
        assert_eq!(
            *output.names.lock().unwrap(),
            vec!["Angela_Day4_office_0.wav".to_string()]
        );
    }

    #[test]
    fn test_missing_line_keeps_current_audio() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        let output = Arc::new(NamesOutput::default());
        let mut session = DubSession::new(&config, SilentLoader, Arc::clone(&output)).unwrap();

        let commands = vec![
            SceneCommand::speak(1, "Angela", "First."),
            SceneCommand::speak(2, "Angela", "Second."),
        ];
        session.on_scene_loaded("S1", &commands);
        std::fs::write(config.voice_folder.join("Angela_S1_0.wav"), b"").unwrap();

        if let LineOutcome::Requested { handle, .. } =
            session.on_dialogue_line(Some(&commands[0]), false)
        {
            assert_eq!(handle.join(), LoadOutcome::Played);
        }

        for _ in 0..3 {
            assert!(matches!(
                session.on_dialogue_line(Some(&commands[1]), false),
                LineOutcome::Missing { ref file_name } if file_name == "Angela_S1_1.wav"
            ));
        }
        assert_eq!(session.ledger().len(), 1);
        assert_eq!(session.slot().state(), PlaybackState::Playing);
    }

    #[test]
    fn test_unkeyed_line_uses_fallback_name() {
        let dir = tempdir().unwrap();
        let mut session =
            DubSession::new(&config_in(dir.path()), SilentLoader, NamesOutput::default())
                .unwrap();

        let keyed = vec![SceneCommand::speak(1, "Angela", "Welcome.")];
        session.on_scene_loaded("Day2_lobby", &keyed);
        session.on_dialogue_line(Some(&keyed[0]), false);

        // Never passed through on_scene_loaded
        let stray = SceneCommand::speak(99, "Gebura", "Hello");
        match session.on_dialogue_line(Some(&stray), false) {
            LineOutcome::Missing { file_name } => {
                assert_eq!(file_name, "Gebura_Day2_223289465.wav");
            }
            other => panic!("expected a miss, got {other:?}"),
        }
    }
}
