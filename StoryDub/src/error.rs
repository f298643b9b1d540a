use thiserror::Error;

use crate::playback::AudioError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("VoiceLine error: {0}")]
    VoiceLine(#[from] voiceline::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),
}

pub type Result<T> = std::result::Result<T, Error>;
