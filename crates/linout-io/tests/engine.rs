//! Integration tests for linout-io against a scripted stand-in engine.
//!
//! The stand-in is a POSIX shell script run through `sh`. It answers the
//! version and port queries, logs the playback path it was handed, and loops
//! the playback file back into the record file.

#![cfg(unix)]

use linout_io::{
    AudioBuffer, EngineCommand, EngineInvoker, Error, PlaybackSource, RecordSink, Transfer,
    TransferRequest, WavSpec, read_wav, write_wav,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write the stand-in engine into `dir` and return an invoker for it.
///
/// `exit_code` is the status returned after a transfer.
fn fake_engine(dir: &Path, exit_code: i32) -> EngineInvoker {
    let log = dir.join("engine.log");
    let version_log = dir.join("version.log");
    let script = format!(
        r#"#!/bin/sh
play=""
rec=""
for arg in "$@"; do
  case "$arg" in
    --version) echo x >> "{version_log}"; echo "arrow1 v0.9 (fake)"; exit 0 ;;
    --channels) echo "system:capture_1"; echo "system:playback_1"; exit 0 ;;
    --play-file=*) play="${{arg#--play-file=}}" ;;
    --record-file=*) rec="${{arg#--record-file=}}" ;;
  esac
done
echo "$play" >> "{log}"
echo "args: $*" >> "{log}"
if [ -n "$rec" ] && [ -n "$play" ]; then cp "$play" "$rec"; fi
if [ {exit_code} -ne 0 ]; then echo "jack server not running" >&2; fi
echo "transfer finished"
exit {exit_code}
"#,
        log = log.display(),
        version_log = version_log.display(),
        exit_code = exit_code,
    );
    let path = dir.join("fake-arrow1.sh");
    fs::write(&path, script).unwrap();

    EngineInvoker::new(
        EngineCommand::default()
            .with_program("sh")
            .with_base_args([path.to_str().unwrap().to_string()]),
    )
}

fn logged_lines(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("engine.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

fn sine(frames: usize) -> Vec<f32> {
    (0..frames).map(|i| (i as f32 * 0.05).sin() * 0.8).collect()
}

// ---------------------------------------------------------------------------
// Transfers
// ---------------------------------------------------------------------------

#[test]
fn in_memory_playback_loops_back_into_recording() {
    let dir = TempDir::new().unwrap();
    let invoker = fake_engine(dir.path(), 0);

    let left = sine(2048);
    let right: Vec<f32> = left.iter().map(|s| -s * 0.5).collect();
    let buffer = AudioBuffer::from_channels(&[left.clone(), right.clone()]);

    let request = TransferRequest::new(PlaybackSource::InMemory(buffer), RecordSink::ToMemory)
        .with_input_ports("system:capture_1,system:capture_2".into())
        .with_sample_rate(Some(22050));

    let recording = invoker.transfer(&request).unwrap().expect("recording");
    assert_eq!(recording.sample_rate, 22050);
    assert_eq!(recording.samples.channels, 2);
    assert_eq!(recording.samples.num_frames(), 2048);

    for (a, b) in left.iter().zip(recording.samples.channel(0).unwrap()) {
        assert!((a - b).abs() <= 1.0 / 32768.0, "{a} vs {b}");
    }
    for (a, b) in right.iter().zip(recording.samples.channel(1).unwrap()) {
        assert!((a - b).abs() <= 1.0 / 32768.0, "{a} vs {b}");
    }
}

#[test]
fn transient_files_are_removed_after_success() {
    let dir = TempDir::new().unwrap();
    let invoker = fake_engine(dir.path(), 0);

    let request = TransferRequest::new(
        PlaybackSource::InMemory(AudioBuffer::from_mono(sine(256))),
        RecordSink::ToMemory,
    )
    .with_sample_rate(Some(8000));
    invoker.transfer(&request).unwrap();

    let lines = logged_lines(dir.path());
    let staged = PathBuf::from(&lines[0]);
    assert_eq!(staged.extension().and_then(|e| e.to_str()), Some("wav"));
    assert!(!staged.exists(), "staged playback file should be removed");

    let args = &lines[1];
    let record = args
        .split_whitespace()
        .find_map(|a| a.strip_prefix("--record-file="))
        .expect("record flag");
    assert!(!Path::new(record).exists(), "transient recording should be removed");
}

#[test]
fn non_zero_exit_fails_and_still_cleans_up() {
    let dir = TempDir::new().unwrap();
    let invoker = fake_engine(dir.path(), 3);

    let request = TransferRequest::new(
        PlaybackSource::InMemory(AudioBuffer::from_mono(sine(256))),
        RecordSink::ToMemory,
    )
    .with_sample_rate(Some(8000));

    let err = invoker.transfer(&request).unwrap_err();
    match &err {
        Error::EngineFailed { program, stderr, .. } => {
            assert_eq!(program, "sh");
            assert!(stderr.contains("jack server not running"), "got: {stderr}");
        }
        other => panic!("expected EngineFailed, got {other}"),
    }

    let staged = PathBuf::from(&logged_lines(dir.path())[0]);
    assert!(!staged.exists(), "staged playback file should be removed on failure");
}

#[test]
fn file_playback_and_file_recording_return_nothing() {
    let dir = TempDir::new().unwrap();
    let invoker = fake_engine(dir.path(), 0);

    let play = dir.path().join("stimulus.wav");
    let record = dir.path().join("capture.wav");
    write_wav(&play, &AudioBuffer::from_mono(sine(512)), WavSpec::pcm16(1, 44100)).unwrap();

    let request = TransferRequest::new(
        PlaybackSource::file(&play),
        RecordSink::ToFile(record.clone()),
    )
    .with_output_ports("system:playback_1".into())
    .with_duration(Some(1.0))
    .with_start_offset(Some(0.25));

    let result = invoker.transfer(&request).unwrap();
    assert!(result.is_none());

    // Caller-owned files stay put.
    assert!(play.exists());
    let (captured, spec) = read_wav(&record).unwrap();
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(captured.num_frames(), 512);

    let lines = logged_lines(dir.path());
    assert_eq!(lines[0], play.display().to_string());
    assert!(lines[1].contains("--out=system:playback_1"));
    assert!(lines[1].contains("--duration=1"));
    assert!(lines[1].contains("--start=0.25"));
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[test]
fn version_is_queried_once() {
    let dir = TempDir::new().unwrap();
    let invoker = fake_engine(dir.path(), 0);

    // Nothing runs until asked.
    assert!(!dir.path().join("version.log").exists());

    assert_eq!(invoker.version().unwrap(), "arrow1 v0.9 (fake)");
    assert_eq!(invoker.version().unwrap(), "arrow1 v0.9 (fake)");

    let calls = fs::read_to_string(dir.path().join("version.log")).unwrap();
    assert_eq!(calls.lines().count(), 1);
}

#[test]
fn port_listing_is_raw_text() {
    let dir = TempDir::new().unwrap();
    let invoker = fake_engine(dir.path(), 0);

    let listing = invoker.list_ports().unwrap();
    assert_eq!(listing, "system:capture_1\nsystem:playback_1\n");
}
