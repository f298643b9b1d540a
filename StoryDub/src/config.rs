//! Dubbing configuration, persisted as `storydub.toml`

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use voiceline::locator::MISSING_LOG_NAME;
use voiceline::utils::expand_tilde;

use crate::error::{Error, Result};
use crate::playback::PlaybackSettings;

/// File name looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_NAME: &str = "storydub.toml";

// Default value functions for serde
fn default_voice_folder() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from("VoiceData"),
        |dir| dir.join("StoryDub").join("VoiceData"),
    )
}
fn default_gain_multiplier() -> f32 {
    1.0
}
fn default_missing_log() -> String {
    MISSING_LOG_NAME.to_string()
}
fn default_load_timeout_ms() -> u64 {
    5000
}

/// Startup configuration for a dubbing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DubConfig {
    /// Flat folder holding the voice WAV files
    #[serde(default = "default_voice_folder")]
    pub voice_folder: PathBuf,
    /// Sample-domain gain; 1.0 disables amplification
    #[serde(default = "default_gain_multiplier")]
    pub gain_multiplier: f32,
    /// Missing-file log, relative to the voice folder unless absolute
    #[serde(default = "default_missing_log")]
    pub missing_log: String,
    /// Loads slower than this are dropped
    #[serde(default = "default_load_timeout_ms")]
    pub load_timeout_ms: u64,
}

impl Default for DubConfig {
    fn default() -> Self {
        Self {
            voice_folder: default_voice_folder(),
            gain_multiplier: default_gain_multiplier(),
            missing_log: default_missing_log(),
            load_timeout_ms: default_load_timeout_ms(),
        }
    }
}

impl DubConfig {
    /// Parse a config from TOML text; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: DubConfig = toml::from_str(content)?;
        config.voice_folder = expand_tilde(&config.voice_folder.to_string_lossy());
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Write the config as TOML, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !self.gain_multiplier.is_finite() || self.gain_multiplier < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "gain_multiplier must be a finite, non-negative number (got {})",
                self.gain_multiplier
            )));
        }
        if self.load_timeout_ms == 0 {
            return Err(Error::InvalidConfig(
                "load_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn missing_log_path(&self) -> PathBuf {
        let log = Path::new(&self.missing_log);
        if log.is_absolute() {
            log.to_path_buf()
        } else {
            self.voice_folder.join(log)
        }
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }

    /// Gain and timeout for the playback slot
    pub fn playback_settings(&self) -> PlaybackSettings {
        PlaybackSettings {
            gain_multiplier: self.gain_multiplier,
            load_timeout: self.load_timeout(),
        }
    }
}
