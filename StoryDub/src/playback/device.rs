//! Rodio output for the playback slot
//!
//! The output stream must stay on the thread that opened it, so the
//! [`AudioDevice`] guard lives with the caller while the [`RodioOutput`]
//! handed to the slot only holds the stream handle and the current sink.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamHandle, Sink, Source};
use voiceline::formats::wav::DecodedAudio;

use super::{AudioError, VoiceOutput};

/// Keeps the default output device open
pub struct AudioDevice {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
}

impl AudioDevice {
    /// Open the system's default output device
    ///
    /// # Errors
    /// Returns an error if audio output cannot be initialized
    pub fn open_default() -> Result<Self, AudioError> {
        let (stream, stream_handle) =
            OutputStream::try_default().map_err(|e| AudioError::OutputInit(e.to_string()))?;

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// An output bound to this device; it goes silent once the device drops
    pub fn output(&self) -> RodioOutput {
        RodioOutput {
            stream_handle: self.stream_handle.clone(),
            current_sink: Mutex::new(None),
        }
    }
}

/// Plain (non-spatial, effect-free) sink at unity volume
pub struct RodioOutput {
    stream_handle: OutputStreamHandle,
    current_sink: Mutex<Option<Sink>>,
}

impl VoiceOutput for RodioOutput {
    fn start(&self, name: &str, audio: DecodedAudio) -> Result<(), AudioError> {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| AudioError::PlaybackError(e.to_string()))?;

        // Nothing is audible until the buffer is queued; loudness comes
        // from the samples, the sink itself never goes above unity.
        sink.pause();
        sink.set_volume(1.0);
        sink.append(DecodedAudioSource::new(audio));
        sink.play();

        let mut current = self.current_sink.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = current.replace(sink) {
            previous.stop();
        }
        tracing::debug!("Output started {}", name);
        Ok(())
    }

    fn stop(&self) {
        let mut current = self.current_sink.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(sink) = current.take() {
            sink.stop();
        }
    }

    fn is_playing(&self) -> bool {
        let current = self.current_sink.lock().unwrap_or_else(PoisonError::into_inner);
        current.as_ref().is_some_and(|sink| !sink.empty())
    }
}

/// Rodio source wrapper for `DecodedAudio`
struct DecodedAudioSource {
    samples: Vec<f32>,
    position: usize,
    channels: u16,
    sample_rate: u32,
}

impl DecodedAudioSource {
    fn new(audio: DecodedAudio) -> Self {
        Self {
            samples: audio.samples,
            channels: audio.channels,
            sample_rate: audio.sample_rate,
            position: 0,
        }
    }
}

impl Iterator for DecodedAudioSource {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let sample = self.samples.get(self.position).copied()?;
        self.position += 1;
        Some(sample)
    }
}

impl Source for DecodedAudioSource {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.samples.len() - self.position)
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        let frames = self.samples.len() / usize::from(self.channels.max(1));
        Some(Duration::from_secs_f64(
            frames as f64 / f64::from(self.sample_rate.max(1)),
        ))
    }
}
