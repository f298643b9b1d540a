//! Single-slot voice playback
//!
//! A [`PlaybackSlot`] owns at most one clip at a time. Every request bumps
//! the slot's generation, stops whatever is audible and hands the file to a
//! loader thread. When the load finishes, the result is only started if its
//! generation is still current; anything older is dropped without output.
//!
//! ```text
//! Idle --request--> Loading --decoded + current--> Playing --clip ends--> Idle
//!                      |
//!                      +--error / timeout--> Idle
//! ```

#[cfg(feature = "audio")]
pub mod device;

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use voiceline::formats::wav::{DecodedAudio, WavError, load_wav_file};
use voiceline::utils::file_name_string;

#[cfg(feature = "audio")]
pub use device::{AudioDevice, RodioOutput};

/// Errors that can occur during audio playback
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("Failed to initialize audio output: {0}")]
    OutputInit(String),
    #[error("Playback error: {0}")]
    PlaybackError(String),
    #[error("WAV decode error: {0}")]
    WavDecode(#[from] WavError),
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
}

/// Turns a voice file into samples. Runs on the loader thread.
pub trait VoiceLoader: Send + Sync + 'static {
    fn load(&self, path: &Path) -> Result<DecodedAudio, AudioError>;
}

/// Audio sink the slot drives. Implementations must not block in `start`.
pub trait VoiceOutput: Send + Sync + 'static {
    /// Begin playing `audio`, replacing anything still queued
    fn start(&self, name: &str, audio: DecodedAudio) -> Result<(), AudioError>;
    fn stop(&self);
    fn is_playing(&self) -> bool;
}

impl<T: VoiceLoader> VoiceLoader for Arc<T> {
    fn load(&self, path: &Path) -> Result<DecodedAudio, AudioError> {
        (**self).load(path)
    }
}

impl<T: VoiceOutput> VoiceOutput for Arc<T> {
    fn start(&self, name: &str, audio: DecodedAudio) -> Result<(), AudioError> {
        (**self).start(name, audio)
    }

    fn stop(&self) {
        (**self).stop();
    }

    fn is_playing(&self) -> bool {
        (**self).is_playing()
    }
}

/// Decodes WAV files from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct WavLoader;

impl VoiceLoader for WavLoader {
    fn load(&self, path: &Path) -> Result<DecodedAudio, AudioError> {
        if !path.is_file() {
            return Err(AudioError::FileNotFound(path.to_path_buf()));
        }
        Ok(load_wav_file(path)?)
    }
}

/// Fixed at slot construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSettings {
    /// Applied to every sample before output; <= 1.0 skips the pass
    pub gain_multiplier: f32,
    /// Loads still pending after this are abandoned and the slot goes idle
    pub load_timeout: Duration,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            gain_multiplier: 1.0,
            load_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Loading,
    Playing,
}

/// How a single request ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The clip reached the output
    Played,
    /// A newer request (or a stop) arrived first; nothing was output
    Superseded,
    /// Missing file, decode error or output failure
    Failed(String),
    /// No decode arrived within the load timeout
    TimedOut,
}

/// Pending load started by [`PlaybackSlot::request`]
#[derive(Debug)]
pub struct LoadHandle {
    thread: JoinHandle<LoadOutcome>,
}

impl LoadHandle {
    /// Block until the load has been resolved
    pub fn join(self) -> LoadOutcome {
        self.thread
            .join()
            .unwrap_or_else(|_| LoadOutcome::Failed("loader thread panicked".to_string()))
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }
}

struct SlotInner {
    generation: u64,
    state: PlaybackState,
    current: Option<PathBuf>,
}

struct SlotShared {
    loader: Box<dyn VoiceLoader>,
    output: Box<dyn VoiceOutput>,
    settings: PlaybackSettings,
    inner: Mutex<SlotInner>,
}

impl SlotShared {
    fn lock(&self) -> MutexGuard<'_, SlotInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock, moving a finished clip from `Playing` to `Idle`
    fn refresh(&self) -> MutexGuard<'_, SlotInner> {
        let mut inner = self.lock();
        if inner.state == PlaybackState::Playing && !self.output.is_playing() {
            inner.state = PlaybackState::Idle;
            inner.current = None;
        }
        inner
    }

    /// Loader thread body: decode and apply gain
    fn decode(&self, path: &Path) -> Result<DecodedAudio, AudioError> {
        let mut audio = self.loader.load(path)?;
        let clipped = audio.amplify(self.settings.gain_multiplier);
        if clipped > 0 {
            tracing::debug!("{} samples clipped in {:?}", clipped, path);
        }
        Ok(audio)
    }

    /// Wait for the decode of `path` and start it if `generation` is still current
    fn complete(shared: &Arc<Self>, generation: u64, path: PathBuf) -> LoadOutcome {
        let file_name = file_name_string(&path);

        // The decode runs detached; a loader that never returns only
        // parks its own thread.
        let (tx, rx) = mpsc::channel();
        let worker = Arc::clone(shared);
        thread::spawn(move || {
            let _ = tx.send(worker.decode(&path));
        });
        let received = rx.recv_timeout(shared.settings.load_timeout);

        // Generation check and start happen under one lock so a newer
        // request can never interleave between them.
        let mut inner = shared.lock();
        if inner.generation != generation {
            tracing::debug!("Dropping superseded load of {}", file_name);
            return LoadOutcome::Superseded;
        }

        let outcome = match received {
            Err(RecvTimeoutError::Timeout) => {
                tracing::debug!(
                    "Load of {} exceeded {:?}",
                    file_name,
                    shared.settings.load_timeout
                );
                LoadOutcome::TimedOut
            }
            Err(RecvTimeoutError::Disconnected) => {
                tracing::debug!("Loader thread for {} panicked", file_name);
                LoadOutcome::Failed("loader thread panicked".to_string())
            }
            Ok(Err(e)) => {
                tracing::debug!("Failed to load {}: {}", file_name, e);
                LoadOutcome::Failed(e.to_string())
            }
            Ok(Ok(audio)) => match shared.output.start(&file_name, audio) {
                Ok(()) => {
                    inner.state = PlaybackState::Playing;
                    tracing::info!("[play] {}", file_name);
                    return LoadOutcome::Played;
                }
                Err(e) => {
                    tracing::debug!("Output rejected {}: {}", file_name, e);
                    LoadOutcome::Failed(e.to_string())
                }
            },
        };

        inner.state = PlaybackState::Idle;
        inner.current = None;
        outcome
    }
}

/// The one playback slot of a session
pub struct PlaybackSlot {
    shared: Arc<SlotShared>,
}

impl PlaybackSlot {
    pub fn new(
        loader: impl VoiceLoader,
        output: impl VoiceOutput,
        settings: PlaybackSettings,
    ) -> Self {
        Self {
            shared: Arc::new(SlotShared {
                loader: Box::new(loader),
                output: Box::new(output),
                settings,
                inner: Mutex::new(SlotInner {
                    generation: 0,
                    state: PlaybackState::Idle,
                    current: None,
                }),
            }),
        }
    }

    pub fn settings(&self) -> PlaybackSettings {
        self.shared.settings
    }

    /// Stop whatever is loading or playing and start loading `path`.
    ///
    /// Returns immediately; the decode runs on its own thread.
    pub fn request<P: AsRef<Path>>(&self, path: P) -> LoadHandle {
        let path = path.as_ref().to_path_buf();
        let generation = {
            let mut inner = self.shared.lock();
            inner.generation += 1;
            self.shared.output.stop();
            inner.state = PlaybackState::Loading;
            inner.current = Some(path.clone());
            inner.generation
        };

        let shared = Arc::clone(&self.shared);
        let thread = thread::spawn(move || SlotShared::complete(&shared, generation, path));
        LoadHandle { thread }
    }

    /// Silence the slot and cancel any pending load
    pub fn stop(&self) {
        let mut inner = self.shared.lock();
        inner.generation += 1;
        self.shared.output.stop();
        inner.state = PlaybackState::Idle;
        inner.current = None;
    }

    /// Current state; a finished clip reports `Idle`
    pub fn state(&self) -> PlaybackState {
        self.shared.refresh().state
    }

    /// File being loaded or played, if any
    pub fn current_file(&self) -> Option<PathBuf> {
        self.shared.refresh().current.clone()
    }

    /// Number of requests and stops so far
    pub fn generation(&self) -> u64 {
        self.shared.lock().generation
    }

    /// Block until the slot is idle, polling every `interval`
    pub fn wait_until_idle(&self, interval: Duration) {
        while self.state() != PlaybackState::Idle {
            thread::sleep(interval);
        }
    }
}
