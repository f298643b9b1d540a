//! WAV inspection and offline gain

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::formats::wav::{load_wav_file, parse_wav_header, save_wav};

/// Print header information for a WAV file
pub fn inspect(file: &Path) -> Result<()> {
    let mut reader = BufReader::new(
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?,
    );
    let header = parse_wav_header(&mut reader)?;

    println!("File:        {}", file.display());
    println!("Format:      0x{:04X}", header.effective_format());
    println!("Channels:    {}", header.channels);
    println!("Sample rate: {} Hz", header.sample_rate);
    println!("Bit depth:   {}", header.bits_per_sample);
    println!("Duration:    {:.2}s", header.duration_secs());
    Ok(())
}

/// Decode `source`, apply the gain stage, write 16-bit PCM to `destination`
pub fn amplify(source: &Path, destination: &Path, gain: f32) -> Result<()> {
    if !gain.is_finite() || gain < 0.0 {
        bail!("gain must be a finite, non-negative number (got {gain})");
    }

    let mut audio = load_wav_file(source)
        .with_context(|| format!("Failed to decode {}", source.display()))?;
    let clipped = audio.amplify(gain);
    save_wav(destination, &audio)
        .with_context(|| format!("Failed to write {}", destination.display()))?;

    println!(
        "Wrote {} ({} samples, {} clipped)",
        destination.display(),
        audio.samples.len(),
        clipped
    );
    Ok(())
}
