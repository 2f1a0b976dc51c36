//! Multi-trial play/record orchestration.
//!
//! A [`TrialBatch`] pairs up three independently sized lists (playback
//! sources, capture port sets, playback port sets). The batch runs
//! `max(len)` trials; a list shorter than that keeps supplying its last
//! element. [`run_batch`] executes the trials one after another through any
//! [`Transfer`](linout_io::Transfer) implementation, pacing them with a
//! [`Pacer`] according to the batch's [`Pause`] policy.
//!
//! ```rust,no_run
//! use linout_batch::{ConsolePacer, Pause, TrialBatch, run_batch};
//! use linout_io::{EngineCommand, EngineInvoker};
//!
//! let batch = TrialBatch::new(vec!["a.wav", "b.wav"], "in1,in2", vec!["out1,out2", "out3,out4"])?
//!     .with_pause(Pause::Confirm);
//! let invoker = EngineInvoker::new(EngineCommand::default());
//! let recordings = run_batch(&batch, &invoker, &mut ConsolePacer::stdio())?;
//! assert_eq!(recordings.len(), 2);
//! # Ok::<(), linout_batch::BatchError>(())
//! ```

mod batch;
mod orchestrator;
mod pacing;

pub use batch::{Broadcast, Trial, TrialBatch};
pub use orchestrator::run_batch;
pub use pacing::{COUNTDOWN_WIDTH, ConsolePacer, Pacer, Pause, countdown_fill};

/// Errors raised while building or running a batch.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// One of the three trial lists was given with no elements.
    #[error("{0} list is empty; give at least one value")]
    EmptySequence(&'static str),

    /// Pause seconds must be zero or a finite positive number.
    #[error("invalid pause: {0} s")]
    InvalidPause(f64),

    /// A trial's transfer failed; the remaining trials were not run.
    #[error("trial {} failed: {source}", .index + 1)]
    Trial {
        /// Zero-based index of the failing trial.
        index: usize,
        /// Transfer error.
        #[source]
        source: linout_io::Error,
    },

    /// Reading the confirmation or writing the prompt failed.
    #[error("console error: {0}")]
    Console(#[from] std::io::Error),

    /// The countdown bar template was rejected.
    #[error("progress template error: {0}")]
    Progress(#[from] indicatif::style::TemplateError),
}

/// Convenience result type for batch operations.
pub type Result<T> = std::result::Result<T, BatchError>;
