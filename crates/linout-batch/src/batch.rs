//! Trial batch model and hold-last-value selection.

use crate::pacing::Pause;
use crate::{BatchError, Result};
use linout_io::{PlaybackSource, PortSet, RecordSink, TransferRequest};

/// A single value applied to every trial, or one value per trial.
#[derive(Debug, Clone, PartialEq)]
pub enum Broadcast<T> {
    /// Same value for all trials.
    One(T),
    /// Per-trial values; trials past the end reuse the last one.
    Many(Vec<T>),
}

impl<T> Broadcast<T> {
    /// Normalize into a sequence.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Broadcast::One(value) => vec![value],
            Broadcast::Many(values) => values,
        }
    }
}

impl<T> From<Vec<T>> for Broadcast<T> {
    fn from(values: Vec<T>) -> Self {
        Broadcast::Many(values)
    }
}

impl From<PlaybackSource> for Broadcast<PlaybackSource> {
    fn from(source: PlaybackSource) -> Self {
        Broadcast::One(source)
    }
}

/// A single file path.
impl From<&str> for Broadcast<PlaybackSource> {
    fn from(path: &str) -> Self {
        Broadcast::One(PlaybackSource::file(path))
    }
}

/// One file path per trial.
impl From<Vec<&str>> for Broadcast<PlaybackSource> {
    fn from(paths: Vec<&str>) -> Self {
        Broadcast::Many(paths.into_iter().map(PlaybackSource::file).collect())
    }
}

impl From<PortSet> for Broadcast<PortSet> {
    fn from(ports: PortSet) -> Self {
        Broadcast::One(ports)
    }
}

/// A single comma-separated port list.
impl From<&str> for Broadcast<PortSet> {
    fn from(ports: &str) -> Self {
        Broadcast::One(PortSet::from(ports))
    }
}

/// One comma-separated port list per trial.
impl From<Vec<&str>> for Broadcast<PortSet> {
    fn from(ports: Vec<&str>) -> Self {
        Broadcast::Many(ports.into_iter().map(PortSet::from).collect())
    }
}

/// Effective configuration of one trial, borrowed from its batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trial<'a> {
    /// Zero-based trial index.
    pub index: usize,
    /// Playback source for this trial.
    pub playback: &'a PlaybackSource,
    /// Capture ports for this trial.
    pub input_ports: &'a PortSet,
    /// Playback ports for this trial.
    pub output_ports: &'a PortSet,
}

/// Sequential play/record trials sharing duration, offset, rate and pause policy.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialBatch {
    playback: Vec<PlaybackSource>,
    input_ports: Vec<PortSet>,
    output_ports: Vec<PortSet>,
    duration: Option<f64>,
    start_offset: Option<f64>,
    sample_rate: Option<u32>,
    pause: Pause,
}

impl TrialBatch {
    /// Build a batch from the three trial lists.
    ///
    /// Fails if any list is an empty [`Broadcast::Many`].
    pub fn new(
        playback: impl Into<Broadcast<PlaybackSource>>,
        input_ports: impl Into<Broadcast<PortSet>>,
        output_ports: impl Into<Broadcast<PortSet>>,
    ) -> Result<Self> {
        Ok(Self {
            playback: non_empty(playback.into(), "playback")?,
            input_ports: non_empty(input_ports.into(), "input port")?,
            output_ports: non_empty(output_ports.into(), "output port")?,
            duration: None,
            start_offset: None,
            sample_rate: None,
            pause: Pause::default(),
        })
    }

    /// Maximum play/record duration for every trial, in seconds.
    pub fn with_duration(mut self, secs: Option<f64>) -> Self {
        self.duration = secs;
        self
    }

    /// Playback start offset for every trial, in seconds.
    pub fn with_start_offset(mut self, secs: Option<f64>) -> Self {
        self.start_offset = secs;
        self
    }

    /// Sample rate for in-memory playback sources.
    pub fn with_sample_rate(mut self, sample_rate: Option<u32>) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Pacing between trials.
    pub fn with_pause(mut self, pause: Pause) -> Self {
        self.pause = pause;
        self
    }

    /// Number of trials: the longest of the three lists.
    pub fn len(&self) -> usize {
        self.playback
            .len()
            .max(self.input_ports.len())
            .max(self.output_ports.len())
    }

    /// Always false; a batch holds at least one trial.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pacing policy.
    pub fn pause(&self) -> Pause {
        self.pause
    }

    /// Effective configuration of trial `index`, or `None` past the end.
    pub fn trial(&self, index: usize) -> Option<Trial<'_>> {
        (index < self.len()).then(|| Trial {
            index,
            playback: hold_last(&self.playback, index),
            input_ports: hold_last(&self.input_ports, index),
            output_ports: hold_last(&self.output_ports, index),
        })
    }

    /// All trials in order.
    pub fn trials(&self) -> impl Iterator<Item = Trial<'_>> + '_ {
        (0..self.len()).filter_map(|i| self.trial(i))
    }

    /// Transfer request for `trial`. Recording into memory is always requested.
    pub fn request(&self, trial: &Trial<'_>) -> TransferRequest {
        TransferRequest::new(trial.playback.clone(), RecordSink::ToMemory)
            .with_input_ports(trial.input_ports.clone())
            .with_output_ports(trial.output_ports.clone())
            .with_duration(self.duration)
            .with_start_offset(self.start_offset)
            .with_sample_rate(self.sample_rate)
    }
}

fn non_empty<T>(values: Broadcast<T>, what: &'static str) -> Result<Vec<T>> {
    let values = values.into_vec();
    if values.is_empty() {
        return Err(BatchError::EmptySequence(what));
    }
    Ok(values)
}

/// Element `index`, or the last element once `index` runs past the end.
fn hold_last<T>(values: &[T], index: usize) -> &T {
    &values[index.min(values.len() - 1)]
}
