use std::fmt;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

use super::loader::Load;
use super::wave::{decode_wave, SoundFormat, WaveData};

/// Opaque handle to a source created by an [`AudioDevice`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SourceId(pub u32);

/// Audio backend seam used by [`SoundLoader`].
///
/// Playback and mixing live behind this trait; the loader only asks the
/// device for a source holding the decoded samples.
pub trait AudioDevice: 'static {
    fn create_source(&mut self, wave: &WaveData) -> Result<SourceId>;
}

/// Device that hands out source ids and plays nothing.
#[derive(Debug, Default)]
pub struct SilentAudio {
    sources: u32,
}

impl SilentAudio {
    /// Number of sources created so far.
    pub fn sources(&self) -> u32 {
        self.sources
    }
}

impl AudioDevice for SilentAudio {
    fn create_source(&mut self, wave: &WaveData) -> Result<SourceId> {
        self.sources += 1;
        log::debug!(
            "silent audio source {} ({:?}, {} Hz, {:.2?})",
            self.sources,
            wave.format,
            wave.sample_rate,
            wave.duration()
        );
        Ok(SourceId(self.sources))
    }
}

/// A decoded sound bound to an audio device source.
#[derive(Debug)]
pub struct Sound {
    source: SourceId,
    wave: WaveData,
}

impl Sound {
    pub fn source(&self) -> SourceId {
        self.source
    }

    pub fn format(&self) -> SoundFormat {
        self.wave.format
    }

    pub fn channels(&self) -> u16 {
        self.wave.channels()
    }

    pub fn sample_rate(&self) -> u32 {
        self.wave.sample_rate
    }

    pub fn duration(&self) -> Duration {
        self.wave.duration()
    }

    pub fn wave(&self) -> &WaveData {
        &self.wave
    }
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sound (source: {}, channels: {}, sample rate: {})",
            self.source.0,
            self.channels(),
            self.sample_rate()
        )
    }
}

/// Default loader for [`Sound`]: decodes WAVE files and registers them with
/// an audio device.
#[derive(Debug, Default)]
pub struct SoundLoader<A = SilentAudio> {
    device: A,
}

impl<A: AudioDevice> SoundLoader<A> {
    pub fn new(device: A) -> Self {
        Self { device }
    }

    pub fn device(&self) -> &A {
        &self.device
    }
}

impl<A: AudioDevice> Load for SoundLoader<A> {
    type Asset = Sound;

    fn load(&mut self, path: &Path) -> Result<Sound> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read sound: {}", path.display()))?;
        let wave = decode_wave(&bytes)?;
        let source = self
            .device
            .create_source(&wave)
            .context("audio device refused the sound")?;
        Ok(Sound { source, wave })
    }
}
