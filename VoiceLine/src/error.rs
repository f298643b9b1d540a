//! Error types for `VoiceLine`

use thiserror::Error;

use crate::formats::wav::WavError;

/// The error type for `VoiceLine` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Audio Errors ====================
    /// The WAV file could not be decoded.
    #[error("WAV decode error: {0}")]
    Wav(#[from] WavError),

    // ==================== Story Script Errors ====================
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The story script is structurally invalid.
    #[error("invalid story script: {message}")]
    InvalidScript {
        /// Description of what is invalid.
        message: String,
    },

    // ==================== File System Errors ====================
    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for `VoiceLine` operations.
pub type Result<T> = std::result::Result<T, Error>;
