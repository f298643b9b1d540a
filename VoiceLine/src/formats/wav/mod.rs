//! WAV (RIFF/WAVE) voice assets
//!
//! Voice lines are plain WAV files. The decoder accepts PCM (8/16/24/32-bit),
//! IEEE float (32/64-bit) and `WAVE_FORMAT_EXTENSIBLE` wrappers around
//! either, and normalizes everything to interleaved `f32`.
//!
//! ## Gain
//!
//! [`amplify`] multiplies decoded samples in place and hard-clamps them to
//! [-1, 1]. It is how voice lines get louder than the host's unity volume
//! ceiling allows.

mod decoder;
mod encoder;
mod gain;

pub use decoder::{
    DecodedAudio, FORMAT_EXTENSIBLE, FORMAT_IEEE_FLOAT, FORMAT_PCM, WavError, WavHeader,
    decode_wav, load_wav_file, parse_wav_header,
};
pub use encoder::{save_wav, write_wav};
pub use gain::amplify;
