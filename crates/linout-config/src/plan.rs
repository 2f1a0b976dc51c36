//! Batch plan files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use linout_batch::{Broadcast, Pause, TrialBatch};
use linout_io::{PlaybackSource, PortSet};

/// A single value or a list of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// One value for every trial.
    One(T),
    /// One value per trial.
    Many(Vec<T>),
}

impl<T: Default> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::One(T::default())
    }
}

impl<T> OneOrMany<T> {
    fn map<U>(self, mut f: impl FnMut(T) -> U) -> Broadcast<U> {
        match self {
            OneOrMany::One(value) => Broadcast::One(f(value)),
            OneOrMany::Many(values) => Broadcast::Many(values.into_iter().map(f).collect()),
        }
    }
}

/// Pause as written in a plan: seconds, or the keyword `"none"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PauseSetting {
    /// `0` confirms each trial; a positive value counts down.
    Secs(f64),
    /// `"none"` (or `"skip"`) starts trials back to back.
    Keyword(String),
}

impl PauseSetting {
    /// Resolve to a pacing policy.
    pub fn to_pause(&self) -> Result<Pause, ConfigError> {
        match self {
            PauseSetting::Secs(secs) => Ok(Pause::from_secs(*secs)?),
            PauseSetting::Keyword(word) => match word.to_ascii_lowercase().as_str() {
                "none" | "skip" => Ok(Pause::Skip),
                "confirm" => Ok(Pause::Confirm),
                _ => Err(ConfigError::invalid(
                    "pause",
                    format!("expected seconds, \"confirm\" or \"none\", got \"{word}\""),
                )),
            },
        }
    }
}

/// A saved multi-trial run.
///
/// # TOML Format
///
/// ```toml
/// playback = ["sweep_left.wav", "sweep_right.wav"]
/// input_ports = "system:capture_1,system:capture_2"
/// output_ports = ["system:playback_1", "system:playback_2"]
/// duration = 4.0
/// pause = 2.5
/// output_dir = "recordings"
/// ```
///
/// An empty playback entry means record only. Relative playback paths and
/// `output_dir` are resolved against the plan file's directory.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchPlan {
    /// Playback file(s).
    #[serde(default)]
    pub playback: OneOrMany<String>,

    /// Capture port list(s), comma-separated.
    #[serde(default)]
    pub input_ports: OneOrMany<String>,

    /// Playback port list(s), comma-separated.
    #[serde(default)]
    pub output_ports: OneOrMany<String>,

    /// Maximum duration of each trial in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    /// Playback start offset in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_offset: Option<f64>,

    /// Sample rate for in-memory playback; ignored for file entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,

    /// Pacing between trials; confirmation when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause: Option<PauseSetting>,

    /// Where recordings are written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl BatchPlan {
    /// Load a plan from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let mut plan = Self::from_toml(&content)?;
        plan.base_dir = path.parent().map(Path::to_path_buf);
        Ok(plan)
    }

    /// Parse a plan from a TOML string. Relative paths stay relative.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the plan to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Pacing policy.
    pub fn pause(&self) -> Result<Pause, ConfigError> {
        self.pause
            .as_ref()
            .map_or(Ok(Pause::default()), PauseSetting::to_pause)
    }

    /// Output directory, resolved against the plan file.
    pub fn output_dir(&self) -> Option<PathBuf> {
        self.output_dir.as_deref().map(|dir| self.resolve(dir))
    }

    /// Build the trial batch described by this plan.
    pub fn to_batch(&self) -> Result<TrialBatch, ConfigError> {
        let playback = self.playback.clone().map(|entry| {
            if entry.trim().is_empty() {
                PlaybackSource::Absent
            } else {
                PlaybackSource::File(self.resolve(Path::new(&entry)))
            }
        });
        let inputs = self.input_ports.clone().map(|s| PortSet::from(s.as_str()));
        let outputs = self.output_ports.clone().map(|s| PortSet::from(s.as_str()));

        Ok(TrialBatch::new(playback, inputs, outputs)?
            .with_duration(self.duration)
            .with_start_offset(self.start_offset)
            .with_sample_rate(self.sample_rate)
            .with_pause(self.pause()?))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn scalars_and_lists_mix() {
        let plan = BatchPlan::from_toml(
            r#"
            playback = ["a.wav", "b.wav"]
            input_ports = "in1,in2"
            output_ports = ["out1,out2", "out3,out4"]
            pause = 0
            "#,
        )
        .unwrap();

        let batch = plan.to_batch().unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.pause(), Pause::Confirm);

        let second = batch.trial(1).unwrap();
        assert_eq!(second.playback, &PlaybackSource::file("b.wav"));
        assert_eq!(second.input_ports.to_string(), "in1,in2");
        assert_eq!(second.output_ports.to_string(), "out3,out4");
    }

    #[test]
    fn pause_spellings() {
        let secs = BatchPlan::from_toml("pause = 2.5").unwrap();
        assert_eq!(
            secs.pause().unwrap(),
            Pause::Countdown(Duration::from_millis(2500))
        );

        let none = BatchPlan::from_toml("pause = \"none\"").unwrap();
        assert_eq!(none.pause().unwrap(), Pause::Skip);

        let unset = BatchPlan::from_toml("").unwrap();
        assert_eq!(unset.pause().unwrap(), Pause::Confirm);

        let bad = BatchPlan::from_toml("pause = \"later\"").unwrap();
        assert!(matches!(
            bad.pause(),
            Err(ConfigError::InvalidValue { field: "pause", .. })
        ));

        let negative = BatchPlan::from_toml("pause = -1").unwrap();
        assert!(matches!(negative.pause(), Err(ConfigError::Plan(_))));
    }

    #[test]
    fn empty_playback_means_record_only() {
        let plan = BatchPlan::from_toml("duration = 2.0").unwrap();
        let batch = plan.to_batch().unwrap();
        let trial = batch.trial(0).unwrap();
        assert_eq!(trial.playback, &PlaybackSource::Absent);
        assert!(trial.input_ports.is_empty());
    }

    #[test]
    fn empty_list_is_rejected() {
        let plan = BatchPlan::from_toml("playback = []").unwrap();
        assert!(matches!(plan.to_batch(), Err(ConfigError::Plan(_))));
    }

    #[test]
    fn relative_paths_follow_the_plan_file() {
        let mut plan =
            BatchPlan::from_toml("playback = [\"a.wav\", \"/abs/b.wav\"]\noutput_dir = \"out\"")
                .unwrap();
        plan.base_dir = Some(PathBuf::from("/plans"));

        let batch = plan.to_batch().unwrap();
        assert_eq!(
            batch.trial(0).unwrap().playback,
            &PlaybackSource::file("/plans/a.wav")
        );
        assert_eq!(
            batch.trial(1).unwrap().playback,
            &PlaybackSource::file("/abs/b.wav")
        );
        assert_eq!(plan.output_dir(), Some(PathBuf::from("/plans/out")));
    }
}
