//! WAV file reading and writing.

use crate::Result;
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = reader.len() as u64; // total across all channels
    let num_frames = total_samples / spec.channels.max(1) as u64;
    let duration_secs = num_frames as f64 / spec.sample_rate as f64;

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample. 32 is written as float, anything else as integer PCM.
    pub bits_per_sample: u16,
}

impl WavSpec {
    /// 16-bit PCM spec, the format used for transient playback containers.
    pub fn pcm16(channels: u16, sample_rate: u32) -> Self {
        Self {
            channels,
            sample_rate,
            bits_per_sample: 16,
        }
    }
}

impl Default for WavSpec {
    fn default() -> Self {
        Self::pcm16(1, 44100)
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Interleaved multi-channel sample buffer.
///
/// Frame `i` occupies `data[i * channels..(i + 1) * channels]`; channel 0 of a
/// frame maps to the first port of the corresponding port set.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Number of channels per frame.
    pub channels: u16,
    /// Interleaved samples in `[-1.0, 1.0]`.
    pub data: Vec<f32>,
}

impl AudioBuffer {
    /// Wrap interleaved samples. Trailing samples that do not fill a frame are dropped.
    pub fn new(channels: u16, mut data: Vec<f32>) -> Self {
        let channels = channels.max(1);
        let whole = data.len() - data.len() % channels as usize;
        data.truncate(whole);
        Self { channels, data }
    }

    /// Single-channel buffer.
    pub fn from_mono(samples: Vec<f32>) -> Self {
        Self {
            channels: 1,
            data: samples,
        }
    }

    /// Interleave planar channels. Shorter channels are zero-padded to the longest.
    pub fn from_channels(channels: &[Vec<f32>]) -> Self {
        let count = channels.len().max(1);
        let frames = channels.iter().map(Vec::len).max().unwrap_or(0);
        let mut data = Vec::with_capacity(frames * count);
        for i in 0..frames {
            for ch in channels {
                data.push(ch.get(i).copied().unwrap_or(0.0));
            }
        }
        Self {
            channels: count as u16,
            data,
        }
    }

    /// Number of frames (samples per channel).
    pub fn num_frames(&self) -> usize {
        self.data.len() / self.channels.max(1) as usize
    }

    /// Whether the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Samples of frame `index`, one per channel.
    pub fn frame(&self, index: usize) -> Option<&[f32]> {
        let ch = self.channels as usize;
        self.data.get(index * ch..(index + 1) * ch)
    }

    /// Copy out a single channel.
    pub fn channel(&self, channel: u16) -> Option<Vec<f32>> {
        if channel >= self.channels {
            return None;
        }
        Some(
            self.data
                .iter()
                .skip(channel as usize)
                .step_by(self.channels as usize)
                .copied()
                .collect(),
        )
    }
}

/// Read a WAV file into an interleaved buffer, keeping every channel.
///
/// Integer PCM is scaled to `[-1.0, 1.0)`.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(AudioBuffer, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());

    let samples: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    Ok((AudioBuffer::new(spec.channels, samples), spec))
}

/// Write an interleaved buffer to a WAV file.
///
/// The channel count is taken from the buffer, not from `spec`.
pub fn write_wav<P: AsRef<Path>>(path: P, buffer: &AudioBuffer, spec: WavSpec) -> Result<()> {
    let spec = WavSpec {
        channels: buffer.channels,
        ..spec
    };
    let mut writer = WavWriter::create(path, hound::WavSpec::from(spec))?;

    if spec.bits_per_sample == 32 {
        for &sample in &buffer.data {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
        for &sample in &buffer.data {
            let int_sample = (sample * max_val).round().clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer.finalize()?;
    Ok(())
}
