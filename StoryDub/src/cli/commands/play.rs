use std::path::Path;
use std::time::Duration;

use anyhow::bail;

use crate::config::DubConfig;
use crate::playback::{AudioDevice, LoadOutcome, PlaybackSlot, WavLoader};

pub fn execute(file: &Path, config: &DubConfig) -> anyhow::Result<()> {
    let device = AudioDevice::open_default()?;
    let slot = PlaybackSlot::new(WavLoader, device.output(), config.playback_settings());

    match slot.request(file).join() {
        LoadOutcome::Played => {
            slot.wait_until_idle(Duration::from_millis(50));
            println!("✓ Played {}", file.display());
            Ok(())
        }
        LoadOutcome::Failed(reason) => bail!("could not play {}: {reason}", file.display()),
        LoadOutcome::TimedOut => bail!(
            "loading {} took longer than {}ms",
            file.display(),
            config.load_timeout_ms
        ),
        LoadOutcome::Superseded => Ok(()),
    }
}
