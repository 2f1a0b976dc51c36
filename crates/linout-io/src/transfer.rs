//! Play/record transfer contract.

use crate::ports::PortSet;
use crate::wav::AudioBuffer;
use crate::{Error, Result};
use std::path::PathBuf;

/// Where playback audio comes from.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlaybackSource {
    /// Record only.
    #[default]
    Absent,
    /// Samples held in memory; staged to a transient WAV before the engine runs.
    InMemory(AudioBuffer),
    /// An existing sound file readable by the engine.
    File(PathBuf),
}

impl PlaybackSource {
    /// Playback from a file path.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Whether there is anything to play.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// Where recorded audio goes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecordSink {
    /// Playback only.
    #[default]
    Disabled,
    /// Record to a transient WAV and decode it into a [`Recording`].
    ToMemory,
    /// Record straight into a WAV file owned by the caller.
    ToFile(PathBuf),
}

/// Audio captured by one transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    /// Captured frames, one channel per input port.
    pub samples: AudioBuffer,
    /// Sample rate of the captured audio in Hz.
    pub sample_rate: u32,
}

/// Everything one engine run needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferRequest {
    /// Playback source.
    pub playback: PlaybackSource,
    /// Record destination.
    pub record: RecordSink,
    /// Capture ports; empty uses engine defaults.
    pub input_ports: PortSet,
    /// Playback ports; empty uses engine defaults.
    pub output_ports: PortSet,
    /// Maximum play/record duration in seconds.
    pub duration: Option<f64>,
    /// Playback start offset in seconds.
    pub start_offset: Option<f64>,
    /// Sample rate used to tag in-memory playback samples.
    pub sample_rate: Option<u32>,
}

impl TransferRequest {
    /// Create a request with engine-default ports and no time limits.
    pub fn new(playback: PlaybackSource, record: RecordSink) -> Self {
        Self {
            playback,
            record,
            ..Self::default()
        }
    }

    /// Set the capture ports.
    pub fn with_input_ports(mut self, ports: PortSet) -> Self {
        self.input_ports = ports;
        self
    }

    /// Set the playback ports.
    pub fn with_output_ports(mut self, ports: PortSet) -> Self {
        self.output_ports = ports;
        self
    }

    /// Set the maximum duration in seconds.
    pub fn with_duration(mut self, secs: Option<f64>) -> Self {
        self.duration = secs;
        self
    }

    /// Set the playback start offset in seconds.
    pub fn with_start_offset(mut self, secs: Option<f64>) -> Self {
        self.start_offset = secs;
        self
    }

    /// Set the sample rate for in-memory playback.
    pub fn with_sample_rate(mut self, sample_rate: Option<u32>) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Reject requests the engine would refuse, before anything is launched.
    pub fn validate(&self) -> Result<()> {
        let recording = !matches!(self.record, RecordSink::Disabled);
        if self.playback.is_absent() && !recording {
            return Err(Error::NothingToDo);
        }
        if let Some(d) = self.duration
            && !(d.is_finite() && d > 0.0)
        {
            return Err(Error::InvalidDuration(d));
        }
        if let Some(s) = self.start_offset
            && !(s.is_finite() && s >= 0.0)
        {
            return Err(Error::InvalidStartOffset(s));
        }
        if recording && self.playback.is_absent() && self.duration.is_none() {
            return Err(Error::DurationRequired);
        }
        if matches!(self.playback, PlaybackSource::InMemory(_)) && self.sample_rate.is_none() {
            return Err(Error::MissingSampleRate);
        }
        Ok(())
    }
}

/// One synchronous play/record run.
///
/// Implemented by [`EngineInvoker`](crate::EngineInvoker) for the real engine;
/// tests substitute in-process fakes.
pub trait Transfer {
    /// Run the transfer to completion.
    ///
    /// Returns `Some` only when the request's sink is [`RecordSink::ToMemory`].
    fn transfer(&self, request: &TransferRequest) -> Result<Option<Recording>>;
}

impl<T: Transfer + ?Sized> Transfer for &T {
    fn transfer(&self, request: &TransferRequest) -> Result<Option<Recording>> {
        (**self).transfer(request)
    }
}
