//! File format handlers
//!
//! Only WAV is needed: voice assets are recorded or synthesized elsewhere
//! and dropped into the voice folder as `.wav` files.

pub mod wav;

// Re-export main audio types
pub use wav::{DecodedAudio, WavError, WavHeader, amplify, decode_wav, load_wav_file};
