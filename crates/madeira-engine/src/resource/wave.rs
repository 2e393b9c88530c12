//! RIFF/WAVE decoding for the default sound loader.

use std::time::Duration;

/// Sample layout of decoded PCM data.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SoundFormat {
    Mono8,
    Mono16,
    Stereo8,
    Stereo16,
}

impl SoundFormat {
    pub fn from_layout(channels: u16, bits_per_sample: u16) -> Result<Self, WaveError> {
        match (channels, bits_per_sample) {
            (1, 8) => Ok(SoundFormat::Mono8),
            (1, 16) => Ok(SoundFormat::Mono16),
            (2, 8) => Ok(SoundFormat::Stereo8),
            (2, 16) => Ok(SoundFormat::Stereo16),
            (channels, bits) => Err(WaveError::UnsupportedLayout { channels, bits }),
        }
    }

    pub fn channels(self) -> u16 {
        match self {
            SoundFormat::Mono8 | SoundFormat::Mono16 => 1,
            SoundFormat::Stereo8 | SoundFormat::Stereo16 => 2,
        }
    }

    /// Bytes per frame (one sample for every channel).
    pub fn frame_size(self) -> usize {
        match self {
            SoundFormat::Mono8 => 1,
            SoundFormat::Mono16 | SoundFormat::Stereo8 => 2,
            SoundFormat::Stereo16 => 4,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WaveError {
    #[error("file is too short to be a WAVE file")]
    Truncated,
    #[error("sound is not a RIFF file")]
    NotRiff,
    #[error("sound is not a WAVE file")]
    NotWave,
    #[error("WAVE file has no `{0}` chunk")]
    MissingChunk(&'static str),
    #[error("WAVE encoding {0:#06x} is not supported (PCM only)")]
    UnsupportedEncoding(u16),
    #[error("audio format is not supported: {channels} channel(s), {bits}-bit")]
    UnsupportedLayout { channels: u16, bits: u16 },
}

/// Decoded PCM sound data.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveData {
    pub format: SoundFormat,
    pub sample_rate: u32,
    /// Interleaved little-endian PCM samples.
    pub data: Vec<u8>,
}

impl WaveData {
    pub fn channels(&self) -> u16 {
        self.format.channels()
    }

    pub fn frames(&self) -> usize {
        self.data.len() / self.format.frame_size()
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }
}

const PCM: u16 = 1;

/// Decodes a RIFF/WAVE byte stream.
///
/// Chunks other than `fmt ` and `data` are skipped. A `data` chunk whose
/// declared size runs past the end of the stream is cut at the end, since
/// some writers never patch the size after streaming.
pub fn decode_wave(bytes: &[u8]) -> Result<WaveData, WaveError> {
    if bytes.len() < 12 {
        return Err(WaveError::Truncated);
    }
    if &bytes[0..4] != b"RIFF" {
        return Err(WaveError::NotRiff);
    }
    if &bytes[8..12] != b"WAVE" {
        return Err(WaveError::NotWave);
    }

    let mut layout = None;
    let mut data = None;
    let mut offset = 12;

    while offset + 8 <= bytes.len() {
        let id = &bytes[offset..offset + 4];
        let size = read_u32(bytes, offset + 4) as usize;
        let body_start = offset + 8;
        let body_end = body_start.saturating_add(size);

        match id {
            b"fmt " => {
                if size < 16 || body_end > bytes.len() {
                    return Err(WaveError::Truncated);
                }
                let encoding = read_u16(bytes, body_start);
                if encoding != PCM {
                    return Err(WaveError::UnsupportedEncoding(encoding));
                }
                let channels = read_u16(bytes, body_start + 2);
                let sample_rate = read_u32(bytes, body_start + 4);
                let bits = read_u16(bytes, body_start + 14);
                layout = Some((SoundFormat::from_layout(channels, bits)?, sample_rate));
            }
            b"data" => {
                data = Some(&bytes[body_start..body_end.min(bytes.len())]);
            }
            _ => {}
        }

        // Chunks are word aligned.
        offset = body_end.saturating_add(size & 1);
    }

    let (format, sample_rate) = layout.ok_or(WaveError::MissingChunk("fmt "))?;
    let data = data.ok_or(WaveError::MissingChunk("data"))?;

    Ok(WaveData {
        format,
        sample_rate,
        data: data.to_vec(),
    })
}

fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Encodes a minimal PCM WAVE file. Used to build fixtures.
#[cfg(test)]
pub(crate) fn encode_wave(channels: u16, bits: u16, sample_rate: u32, data: &[u8]) -> Vec<u8> {
    let block_align = channels * bits / 8;
    let mut out = Vec::new();
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data.len() as u32).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&PCM.to_le_bytes());
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&(sample_rate * block_align as u32).to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&bits.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&(data.len() as u32).to_le_bytes());
    out.extend_from_slice(data);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_every_supported_layout() {
        let cases = [
            (1, 8, SoundFormat::Mono8),
            (1, 16, SoundFormat::Mono16),
            (2, 8, SoundFormat::Stereo8),
            (2, 16, SoundFormat::Stereo16),
        ];
        for (channels, bits, format) in cases {
            let wave = decode_wave(&encode_wave(channels, bits, 22050, &[0; 8])).unwrap();
            assert_eq!(wave.format, format);
            assert_eq!(wave.channels(), channels);
            assert_eq!(wave.sample_rate, 22050);
            assert_eq!(wave.data.len(), 8);
        }
    }

    #[test]
    fn duration_follows_frame_count() {
        // 1 s of 16-bit stereo at 1000 Hz.
        let wave = decode_wave(&encode_wave(2, 16, 1000, &[0; 4000])).unwrap();
        assert_eq!(wave.frames(), 1000);
        assert_eq!(wave.duration(), Duration::from_secs(1));
    }

    #[test]
    fn rejects_bad_signatures() {
        let mut bytes = encode_wave(1, 8, 8000, &[1, 2]);
        bytes[0] = b'X';
        assert_eq!(decode_wave(&bytes), Err(WaveError::NotRiff));

        let mut bytes = encode_wave(1, 8, 8000, &[1, 2]);
        bytes[8..12].copy_from_slice(b"AVI ");
        assert_eq!(decode_wave(&bytes), Err(WaveError::NotWave));

        assert_eq!(decode_wave(b"RIFF"), Err(WaveError::Truncated));
    }

    #[test]
    fn rejects_surround_and_24_bit() {
        assert_eq!(
            decode_wave(&encode_wave(6, 16, 48000, &[0; 12])),
            Err(WaveError::UnsupportedLayout { channels: 6, bits: 16 })
        );
        assert_eq!(
            decode_wave(&encode_wave(2, 24, 48000, &[0; 12])),
            Err(WaveError::UnsupportedLayout { channels: 2, bits: 24 })
        );
    }

    #[test]
    fn skips_unknown_chunks() {
        let plain = encode_wave(1, 16, 8000, &[1, 0, 2, 0]);
        // Splice an odd-sized LIST chunk (plus pad byte) between fmt and data.
        let mut bytes = plain[..36].to_vec();
        bytes.extend_from_slice(b"LIST");
        bytes.extend_from_slice(&3u32.to_le_bytes());
        bytes.extend_from_slice(&[9, 9, 9, 0]);
        bytes.extend_from_slice(&plain[36..]);

        let wave = decode_wave(&bytes).unwrap();
        assert_eq!(wave.data, vec![1, 0, 2, 0]);
    }

    #[test]
    fn missing_data_chunk_is_reported() {
        let bytes = encode_wave(1, 8, 8000, &[]);
        assert_eq!(decode_wave(&bytes[..36]), Err(WaveError::MissingChunk("data")));
    }

    #[test]
    fn oversized_data_chunk_is_cut_at_end_of_stream() {
        let mut bytes = encode_wave(1, 8, 8000, &[5, 6, 7]);
        bytes[40..44].copy_from_slice(&u32::MAX.to_le_bytes());
        assert_eq!(decode_wave(&bytes).unwrap().data, vec![5, 6, 7]);
    }
}
