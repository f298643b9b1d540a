//! WAV decoder implementation
//!
//! Decodes RIFF/WAVE files to interleaved `f32` samples in [-1, 1].

use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use thiserror::Error;

/// Errors that can occur during WAV decoding
#[derive(Error, Debug)]
pub enum WavError {
    #[error("Invalid RIFF header")]
    InvalidRiffHeader,
    #[error("Invalid WAVE format")]
    InvalidWaveFormat,
    #[error("Unsupported audio format: {0:#06x}")]
    UnsupportedFormat(u16),
    #[error("Unsupported bit depth {bits} for format {format:#06x}")]
    UnsupportedBitDepth { format: u16, bits: u16 },
    #[error("Missing required chunk: {0}")]
    MissingChunk(&'static str),
    #[error("Invalid fmt chunk: {0}")]
    InvalidFmt(String),
    #[error("WAV contains no samples")]
    EmptyAudio,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// RIFF chunk identifiers
const RIFF_MAGIC: &[u8; 4] = b"RIFF";
const WAVE_MAGIC: &[u8; 4] = b"WAVE";

/// Format codes from the fmt chunk
pub const FORMAT_PCM: u16 = 0x0001;
pub const FORMAT_IEEE_FLOAT: u16 = 0x0003;
pub const FORMAT_EXTENSIBLE: u16 = 0xFFFE;

/// Parsed WAV file header information
#[derive(Debug, Clone)]
pub struct WavHeader {
    /// Total file size (excluding RIFF header)
    pub file_size: u32,
    /// Audio format code as stored (0x0001 = PCM, 0x0003 = float, 0xFFFE = extensible)
    pub format_code: u16,
    /// Number of audio channels
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Average bytes per second
    pub avg_bytes_per_sec: u32,
    /// Block alignment
    pub block_align: u16,
    /// Bits per sample
    pub bits_per_sample: u16,
    /// Extra format data from fmt chunk
    pub extra_data: Vec<u8>,
    /// Offset to audio data in the file
    pub data_offset: u64,
    /// Size of audio data
    pub data_size: u32,
}

impl WavHeader {
    /// Format code after unwrapping `WAVE_FORMAT_EXTENSIBLE`.
    ///
    /// The sub-format GUID starts at byte 8 of the extension and its first
    /// two bytes carry the plain format code.
    pub fn effective_format(&self) -> u16 {
        if self.format_code == FORMAT_EXTENSIBLE && self.extra_data.len() >= 10 {
            u16::from_le_bytes([self.extra_data[8], self.extra_data[9]])
        } else {
            self.format_code
        }
    }

    /// Estimated duration from the data chunk size
    pub fn duration_secs(&self) -> f32 {
        if self.avg_bytes_per_sec == 0 {
            return 0.0;
        }
        self.data_size as f32 / self.avg_bytes_per_sec as f32
    }
}

/// Decoded audio data ready for playback
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    /// Samples normalized to [-1, 1] (interleaved if stereo)
    pub samples: Vec<f32>,
    /// Number of channels (1 = mono, 2 = stereo)
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl DecodedAudio {
    /// Get duration in seconds
    #[must_use]
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / (self.sample_rate as f32 * self.channels as f32)
    }

    /// Get duration in milliseconds
    #[must_use]
    pub fn duration_ms(&self) -> u32 {
        (self.duration_secs() * 1000.0) as u32
    }

    /// Apply the gain stage in place (see [`super::amplify`])
    pub fn amplify(&mut self, multiplier: f32) -> usize {
        super::gain::amplify(&mut self.samples, multiplier)
    }
}

/// Parse WAV file header from a reader
///
/// # Errors
/// Returns an error if the file is not a valid RIFF/WAVE file
pub fn parse_wav_header<R: Read + Seek>(reader: &mut R) -> Result<WavHeader, WavError> {
    // Read RIFF header
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if &magic != RIFF_MAGIC {
        return Err(WavError::InvalidRiffHeader);
    }

    let file_size = reader.read_u32::<LittleEndian>()?;

    // Check WAVE format
    reader.read_exact(&mut magic)?;
    if &magic != WAVE_MAGIC {
        return Err(WavError::InvalidWaveFormat);
    }

    let mut header = WavHeader {
        file_size,
        format_code: 0,
        channels: 0,
        sample_rate: 0,
        avg_bytes_per_sec: 0,
        block_align: 0,
        bits_per_sample: 0,
        extra_data: Vec::new(),
        data_offset: 0,
        data_size: 0,
    };

    // Parse chunks
    let mut found_fmt = false;
    let mut found_data = false;

    while !found_data {
        let mut chunk_id = [0u8; 4];
        if reader.read_exact(&mut chunk_id).is_err() {
            break;
        }

        let chunk_size = reader.read_u32::<LittleEndian>()?;
        let chunk_start = reader.stream_position()?;

        match &chunk_id {
            b"fmt " => {
                read_fmt_chunk(reader, chunk_size, &mut header)?;
                found_fmt = true;
            }
            b"data" => {
                header.data_offset = reader.stream_position()?;
                header.data_size = chunk_size;
                found_data = true;
            }
            _ => {
                // Skip unknown chunks (LIST, fact, cue, ...)
            }
        }

        // Seek to next chunk (align to word boundary)
        let next_pos = chunk_start + u64::from(chunk_size);
        let aligned_pos = (next_pos + 1) & !1;
        reader.seek(SeekFrom::Start(aligned_pos))?;
    }

    if !found_fmt {
        return Err(WavError::MissingChunk("fmt "));
    }
    if !found_data {
        return Err(WavError::MissingChunk("data"));
    }
    Ok(header)
}

/// Plain fmt body size
const FMT_BASE_SIZE: u32 = 16;
/// Largest fmt chunk accepted; `WAVE_FORMAT_EXTENSIBLE` needs 40
const FMT_MAX_SIZE: u32 = 64;

/// Read a `fmt ` chunk body into `header` and check the stream layout
fn read_fmt_chunk<R: Read>(
    reader: &mut R,
    chunk_size: u32,
    header: &mut WavHeader,
) -> Result<(), WavError> {
    if !(FMT_BASE_SIZE..=FMT_MAX_SIZE).contains(&chunk_size) {
        return Err(WavError::InvalidFmt(format!(
            "chunk is {chunk_size} bytes, expected {FMT_BASE_SIZE}..={FMT_MAX_SIZE}"
        )));
    }

    let mut body = reader.by_ref().take(u64::from(chunk_size));
    header.format_code = body.read_u16::<LittleEndian>()?;
    header.channels = body.read_u16::<LittleEndian>()?;
    header.sample_rate = body.read_u32::<LittleEndian>()?;
    header.avg_bytes_per_sec = body.read_u32::<LittleEndian>()?;
    header.block_align = body.read_u16::<LittleEndian>()?;
    header.bits_per_sample = body.read_u16::<LittleEndian>()?;
    header.extra_data.clear();
    body.read_to_end(&mut header.extra_data)?;

    if header.channels == 0 {
        return Err(WavError::InvalidFmt("zero channels".to_string()));
    }
    if header.sample_rate == 0 {
        return Err(WavError::InvalidFmt("zero sample rate".to_string()));
    }
    Ok(())
}

/// Decode a complete WAV file held in memory
///
/// # Errors
/// Returns an error for malformed files, unsupported encodings, or files
/// without any complete sample frame.
pub fn decode_wav(data: &[u8]) -> Result<DecodedAudio, WavError> {
    let mut cursor = Cursor::new(data);
    let header = parse_wav_header(&mut cursor)?;

    cursor.seek(SeekFrom::Start(header.data_offset))?;
    let mut payload = Vec::new();
    cursor
        .take(u64::from(header.data_size))
        .read_to_end(&mut payload)?;

    let samples = convert_samples(&header, &payload)?;
    if samples.is_empty() {
        return Err(WavError::EmptyAudio);
    }

    Ok(DecodedAudio {
        samples,
        channels: header.channels,
        sample_rate: header.sample_rate,
    })
}

/// Read and decode a WAV file from disk
pub fn load_wav_file<P: AsRef<Path>>(path: P) -> Result<DecodedAudio, WavError> {
    let data = std::fs::read(path.as_ref())?;
    decode_wav(&data)
}

fn convert_samples(header: &WavHeader, payload: &[u8]) -> Result<Vec<f32>, WavError> {
    let format = header.effective_format();
    let bits = header.bits_per_sample;
    let bytes_per_sample = usize::from(bits / 8);
    if bytes_per_sample == 0 {
        return Err(WavError::UnsupportedBitDepth { format, bits });
    }

    // Drop a trailing partial frame
    let frame_bytes = bytes_per_sample * usize::from(header.channels);
    let usable = payload.len() - payload.len() % frame_bytes;
    let count = usable / bytes_per_sample;
    let mut reader = Cursor::new(&payload[..usable]);
    let mut samples = Vec::with_capacity(count);

    match (format, bits) {
        (FORMAT_PCM, 8) => {
            for _ in 0..count {
                samples.push((f32::from(reader.read_u8()?) - 128.0) / 128.0);
            }
        }
        (FORMAT_PCM, 16) => {
            for _ in 0..count {
                samples.push(f32::from(reader.read_i16::<LittleEndian>()?) / 32768.0);
            }
        }
        (FORMAT_PCM, 24) => {
            for _ in 0..count {
                samples.push(reader.read_i24::<LittleEndian>()? as f32 / 8_388_608.0);
            }
        }
        (FORMAT_PCM, 32) => {
            for _ in 0..count {
                samples.push(reader.read_i32::<LittleEndian>()? as f32 / 2_147_483_648.0);
            }
        }
        (FORMAT_IEEE_FLOAT, 32) => {
            for _ in 0..count {
                samples.push(reader.read_f32::<LittleEndian>()?);
            }
        }
        (FORMAT_IEEE_FLOAT, 64) => {
            for _ in 0..count {
                samples.push(reader.read_f64::<LittleEndian>()? as f32);
            }
        }
        (FORMAT_PCM | FORMAT_IEEE_FLOAT, _) => {
            return Err(WavError::UnsupportedBitDepth { format, bits });
        }
        _ => return Err(WavError::UnsupportedFormat(format)),
    }

    Ok(samples)
}
