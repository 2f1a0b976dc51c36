//! WAV header summary and per-channel peaks, handy for checking recordings.

use clap::Args;
use linout_io::{WavFormat, read_wav, read_wav_info};
use std::path::PathBuf;

/// Display WAV file information.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to the WAV file
    pub file: PathBuf,

    /// Also decode the samples and print each channel's peak level
    #[arg(long)]
    pub peaks: bool,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let info = read_wav_info(&args.file)?;
    let encoding = match info.format {
        WavFormat::Pcm => "PCM",
        WavFormat::IeeeFloat => "IEEE Float",
    };
    let size = std::fs::metadata(&args.file)?.len();

    println!("File:        {}", args.file.display());
    println!("Format:      {encoding} {}-bit", info.bits_per_sample);
    println!("Channels:    {}", info.channels);
    println!("Sample Rate: {} Hz", info.sample_rate);
    println!(
        "Duration:    {:.3}s ({} frames)",
        info.duration_secs, info.num_frames
    );
    println!("File Size:   {}", format_bytes(size));

    if args.peaks {
        let (buffer, _) = read_wav(&args.file)?;
        for ch in 0..buffer.channels {
            let peak = buffer
                .channel(ch)
                .map_or(0.0, |samples| samples.iter().fold(0.0f32, |m, s| m.max(s.abs())));
            println!("Peak ch{:<2}:   {}", ch + 1, format_dbfs(peak));
        }
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    match bytes {
        0..1024 => format!("{bytes} B"),
        1024..1_048_576 => format!("{:.1} KB", bytes as f64 / 1024.0),
        _ => format!("{:.1} MB", bytes as f64 / 1_048_576.0),
    }
}

fn format_dbfs(peak: f32) -> String {
    if peak <= 0.0 {
        "-inf dBFS".to_string()
    } else {
        format!("{:.1} dBFS", 20.0 * peak.log10())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_units() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn peak_levels() {
        assert_eq!(format_dbfs(1.0), "0.0 dBFS");
        assert_eq!(format_dbfs(0.5), "-6.0 dBFS");
        assert_eq!(format_dbfs(0.0), "-inf dBFS");
    }
}
