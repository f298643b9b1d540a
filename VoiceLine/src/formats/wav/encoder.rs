//! 16-bit PCM WAV writer

use std::io::Write;
use std::path::Path;

use super::decoder::DecodedAudio;

/// Write decoded audio as a 16-bit PCM WAV stream
pub fn write_wav<W: Write>(writer: &mut W, audio: &DecodedAudio) -> std::io::Result<()> {
    let data_size = (audio.samples.len() * 2) as u32;
    let file_size = 36 + data_size;

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?; // chunk size
    writer.write_all(&1u16.to_le_bytes())?; // PCM format
    writer.write_all(&audio.channels.to_le_bytes())?;
    writer.write_all(&audio.sample_rate.to_le_bytes())?;
    let byte_rate = audio.sample_rate * u32::from(audio.channels) * 2;
    writer.write_all(&byte_rate.to_le_bytes())?;
    let block_align = audio.channels * 2;
    writer.write_all(&block_align.to_le_bytes())?;
    writer.write_all(&16u16.to_le_bytes())?; // bits per sample

    // data chunk
    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;

    for sample in &audio.samples {
        writer.write_all(&to_pcm16(*sample).to_le_bytes())?;
    }

    Ok(())
}

/// Write decoded audio to a WAV file on disk
pub fn save_wav<P: AsRef<Path>>(path: P, audio: &DecodedAudio) -> std::io::Result<()> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path.as_ref())?);
    write_wav(&mut file, audio)?;
    file.flush()
}

fn to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::wav::decode_wav;

    #[test]
    fn test_written_file_decodes() {
        let audio = DecodedAudio {
            samples: vec![0.0, 1.0, -1.0, 2.0],
            channels: 2,
            sample_rate: 44100,
        };
        let mut buf = Vec::new();
        write_wav(&mut buf, &audio).unwrap();
        assert_eq!(buf.len(), 44 + 8);

        let decoded = decode_wav(&buf).unwrap();
        assert_eq!(decoded.channels, 2);
        assert_eq!(decoded.sample_rate, 44100);
        // Out-of-range input is clamped on the way out
        assert_eq!(decoded.samples[1], decoded.samples[3]);
        assert!((decoded.samples[2] + 32767.0 / 32768.0).abs() < f32::EPSILON);
    }
}
