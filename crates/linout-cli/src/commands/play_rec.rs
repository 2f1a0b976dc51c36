//! Single play/record trial.

use super::common::{GlobalArgs, invoker};
use clap::Args;
use linout_io::{PlaybackSource, PortSet, RecordSink, Transfer, TransferRequest};
use std::path::PathBuf;

#[derive(Args)]
pub struct PlayRecArgs {
    /// WAV file to play
    #[arg(long, value_name = "FILE")]
    play: Option<PathBuf>,

    /// WAV file to record into
    #[arg(long, value_name = "FILE")]
    record: Option<PathBuf>,

    /// Capture ports, comma-separated
    #[arg(long = "in", value_name = "PORTS")]
    input_ports: Option<PortSet>,

    /// Playback ports, comma-separated
    #[arg(long = "out", value_name = "PORTS")]
    output_ports: Option<PortSet>,

    /// Maximum duration in seconds
    #[arg(long, value_name = "SECS")]
    duration: Option<f64>,

    /// Playback start offset in seconds
    #[arg(long, value_name = "SECS")]
    start: Option<f64>,

    /// Audio server buffer size in samples
    #[arg(long, value_name = "N")]
    buffer: Option<usize>,
}

pub fn run(global: &GlobalArgs, args: PlayRecArgs) -> anyhow::Result<()> {
    let mut settings = global.settings()?;
    if args.buffer.is_some() {
        settings.buffer_size = args.buffer;
    }
    let invoker = invoker(&settings)?;

    let playback = args.play.map_or(PlaybackSource::Absent, PlaybackSource::File);
    let record = args
        .record
        .clone()
        .map_or(RecordSink::Disabled, RecordSink::ToFile);

    let request = TransferRequest::new(playback, record)
        .with_input_ports(args.input_ports.unwrap_or_else(|| settings.input_ports()))
        .with_output_ports(args.output_ports.unwrap_or_else(|| settings.output_ports()))
        .with_duration(args.duration)
        .with_start_offset(args.start);

    invoker.transfer(&request)?;

    if let Some(path) = &args.record {
        println!("Recorded {}", path.display());
    }
    Ok(())
}
