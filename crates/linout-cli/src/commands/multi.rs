//! Multi-trial batch runs.
//!
//! Values come from, in order of precedence: command-line flags, the plan
//! file, the settings file. Each list flag may be repeated to give one value
//! per trial; shorter lists hold their last value.

use super::common::{GlobalArgs, absolute, invoker};
use anyhow::Context;
use clap::Args;
use linout_batch::{ConsolePacer, run_batch};
use linout_config::{BatchPlan, OneOrMany, PauseSetting, Settings, find_plan};
use linout_io::{Recording, WavSpec, write_wav};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct MultiArgs {
    /// Plan file, by path or by saved name
    #[arg(long, value_name = "PLAN")]
    plan: Option<String>,

    /// WAV file to play (repeat for one per trial)
    #[arg(long, value_name = "FILE")]
    play: Vec<String>,

    /// Capture ports, comma-separated (repeat for one set per trial)
    #[arg(long = "in", value_name = "PORTS")]
    input_ports: Vec<String>,

    /// Playback ports, comma-separated (repeat for one set per trial)
    #[arg(long = "out", value_name = "PORTS")]
    output_ports: Vec<String>,

    /// Maximum duration of each trial in seconds
    #[arg(long, value_name = "SECS")]
    duration: Option<f64>,

    /// Playback start offset in seconds
    #[arg(long, value_name = "SECS")]
    start: Option<f64>,

    /// Seconds to count down between trials; 0 waits for Enter
    #[arg(long, value_name = "SECS", allow_negative_numbers = true)]
    pause: Option<f64>,

    /// Start trials back to back
    #[arg(long, conflicts_with = "pause")]
    no_pause: bool,

    /// Directory for trial_001.wav, trial_002.wav, ...
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Write the merged plan to this file before running
    #[arg(long, value_name = "FILE")]
    save_plan: Option<PathBuf>,
}

pub fn run(global: &GlobalArgs, args: MultiArgs) -> anyhow::Result<()> {
    let settings = global.settings()?;
    let plan = merged_plan(&args, &settings)?;

    if let Some(path) = &args.save_plan {
        plan.save(path)?;
        println!("Saved plan to {}", path.display());
    }

    let output_dir = plan
        .output_dir()
        .context("no output directory; pass --output-dir or set output_dir in the plan")?;
    let batch = plan.to_batch()?;
    let invoker = invoker(&settings)?;

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;

    tracing::info!(trials = batch.len(), dir = %output_dir.display(), "starting batch");
    let recordings = run_batch(&batch, &invoker, &mut ConsolePacer::stdio())?;

    for (index, recording) in recordings.iter().enumerate() {
        if let Some(recording) = recording {
            let path = save_recording(&output_dir, index, recording)?;
            println!("Trial {}: {}", index + 1, path.display());
        }
    }
    Ok(())
}

/// Overlay flags onto the plan, then fill gaps from settings.
fn merged_plan(args: &MultiArgs, settings: &Settings) -> anyhow::Result<BatchPlan> {
    let mut plan = match &args.plan {
        Some(name) => {
            let path = find_plan(name).with_context(|| format!("plan '{name}' not found"))?;
            BatchPlan::load(&path)?
        }
        None => BatchPlan::default(),
    };

    if !args.play.is_empty() {
        let files = args
            .play
            .iter()
            .map(|file| {
                if file.is_empty() {
                    Ok(String::new())
                } else {
                    Ok(absolute(file)?.to_string_lossy().into_owned())
                }
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        plan.playback = OneOrMany::Many(files);
    }

    let inputs = settings.input_ports.as_deref();
    let outputs = settings.output_ports.as_deref();
    plan.input_ports = ports_or(&args.input_ports, plan.input_ports, inputs);
    plan.output_ports = ports_or(&args.output_ports, plan.output_ports, outputs);

    plan.duration = args.duration.or(plan.duration);
    plan.start_offset = args.start.or(plan.start_offset);
    plan.sample_rate = plan.sample_rate.or(settings.sample_rate);

    if args.no_pause {
        plan.pause = Some(PauseSetting::Keyword("none".to_string()));
    } else if let Some(secs) = args.pause {
        plan.pause = Some(PauseSetting::Secs(secs));
    }

    if let Some(dir) = &args.output_dir {
        plan.output_dir = Some(absolute(dir)?);
    }

    Ok(plan)
}

fn ports_or(
    flags: &[String],
    planned: OneOrMany<String>,
    configured: Option<&str>,
) -> OneOrMany<String> {
    if !flags.is_empty() {
        return OneOrMany::Many(flags.to_vec());
    }
    match (planned, configured) {
        (OneOrMany::One(ports), Some(configured)) if ports.trim().is_empty() => {
            OneOrMany::One(configured.to_string())
        }
        (planned, _) => planned,
    }
}

/// Numbered output file for a trial.
fn trial_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("trial_{:03}.wav", index + 1))
}

fn save_recording(dir: &Path, index: usize, recording: &Recording) -> anyhow::Result<PathBuf> {
    let path = trial_path(dir, index);
    let spec = WavSpec {
        channels: recording.samples.channels,
        sample_rate: recording.sample_rate,
        bits_per_sample: 32,
    };
    write_wav(&path, &recording.samples, spec)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: MultiArgs,
    }

    fn parse(argv: &[&str]) -> MultiArgs {
        Harness::parse_from(std::iter::once("multi").chain(argv.iter().copied())).args
    }

    #[test]
    fn flags_override_settings_ports() {
        let settings = Settings {
            input_ports: Some("system:capture_1".to_string()),
            output_ports: Some("system:playback_1".to_string()),
            ..Settings::default()
        };
        let args = parse(&["--out", "a:1", "--out", "b:1", "--duration", "2"]);
        let plan = merged_plan(&args, &settings).unwrap();

        assert_eq!(plan.input_ports, OneOrMany::One("system:capture_1".to_string()));
        assert_eq!(
            plan.output_ports,
            OneOrMany::Many(vec!["a:1".to_string(), "b:1".to_string()])
        );
        assert_eq!(plan.duration, Some(2.0));
        assert_eq!(plan.to_batch().unwrap().len(), 2);
    }

    #[test]
    fn no_pause_becomes_skip() {
        let args = parse(&["--no-pause", "--duration", "1"]);
        let plan = merged_plan(&args, &Settings::default()).unwrap();
        assert_eq!(plan.pause().unwrap(), linout_batch::Pause::Skip);
    }

    #[test]
    fn pause_and_no_pause_conflict() {
        let result = Harness::try_parse_from(["multi", "--pause", "2", "--no-pause"]);
        assert!(result.is_err());
    }

    #[test]
    fn play_paths_are_made_absolute() {
        let args = parse(&["--play", "sweep.wav", "--play", ""]);
        let plan = merged_plan(&args, &Settings::default()).unwrap();
        let OneOrMany::Many(files) = &plan.playback else {
            panic!("expected a list, got {:?}", plan.playback);
        };
        assert!(Path::new(&files[0]).is_absolute());
        assert!(files[0].ends_with("sweep.wav"));
        assert!(files[1].is_empty());
    }

    #[test]
    fn no_sample_rate_flag() {
        // Playback from the command line is always a file with its own rate.
        let result = Harness::try_parse_from(["multi", "--sample-rate", "48000"]);
        assert!(result.is_err());
    }

    #[test]
    fn trial_files_are_numbered_from_one() {
        assert_eq!(
            trial_path(Path::new("/tmp/out"), 0),
            PathBuf::from("/tmp/out/trial_001.wav")
        );
        assert_eq!(
            trial_path(Path::new("/tmp/out"), 11),
            PathBuf::from("/tmp/out/trial_012.wav")
        );
    }
}
