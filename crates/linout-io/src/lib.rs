//! Audio staging and engine invocation for linout.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] for multi-channel WAV containers
//! - **Transfers**: the [`Transfer`] trait and its process-backed implementation,
//!   [`EngineInvoker`], which drives the external `arrow1`/`olinout` binary
//! - **Engine queries**: cached version string, raw port listing, and
//!   audio server detection with [`server_pid`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use linout_io::{EngineCommand, EngineInvoker, PlaybackSource, RecordSink, Transfer, TransferRequest};
//!
//! let invoker = EngineInvoker::new(EngineCommand::default());
//! let request = TransferRequest::new(PlaybackSource::file("sweep.wav"), RecordSink::ToMemory)
//!     .with_input_ports("system:capture_1,system:capture_2".parse().unwrap())
//!     .with_output_ports("system:playback_1".parse().unwrap());
//!
//! if let Some(recording) = invoker.transfer(&request)? {
//!     println!("{} frames at {} Hz", recording.samples.num_frames(), recording.sample_rate);
//! }
//! # Ok::<(), linout_io::Error>(())
//! ```

mod command;
mod invoker;
mod ports;
mod server;
mod transfer;
mod wav;

pub use command::{Dialect, EngineCommand};
pub use invoker::EngineInvoker;
pub use ports::PortSet;
pub use server::{DEFAULT_SERVER_PROCESS, server_pid};
pub use transfer::{PlaybackSource, RecordSink, Recording, Transfer, TransferRequest};
pub use wav::{AudioBuffer, WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav};

use std::path::PathBuf;

/// Error types for staging and engine invocation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The engine binary could not be started.
    #[error("failed to launch '{program}': {source}")]
    Launch {
        /// Program that was being launched.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The engine ran but exited unsuccessfully.
    #[error("'{program}' exited with {status}: {stderr}")]
    EngineFailed {
        /// Program that failed.
        program: String,
        /// Exit status description (code or signal).
        status: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// Neither playback nor recording was requested.
    #[error("no playback source or record destination specified, nothing to do")]
    NothingToDo,

    /// Recording without playback needs an explicit duration.
    #[error("recording requires a playback source and/or a duration")]
    DurationRequired,

    /// Duration must be a finite, positive number of seconds.
    #[error("invalid duration: {0} s")]
    InvalidDuration(f64),

    /// Start offset must be a finite, non-negative number of seconds.
    #[error("invalid start offset: {0} s")]
    InvalidStartOffset(f64),

    /// In-memory playback was requested without a sample rate.
    #[error("a sample rate is required to stage in-memory playback samples")]
    MissingSampleRate,

    /// A path could not be passed to the engine as UTF-8.
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for staging and engine operations.
pub type Result<T> = std::result::Result<T, Error>;
