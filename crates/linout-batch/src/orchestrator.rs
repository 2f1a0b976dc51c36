//! Sequential trial execution.

use crate::batch::TrialBatch;
use crate::pacing::{Pacer, Pause};
use crate::{BatchError, Result};
use linout_io::{Recording, Transfer};

/// Run every trial of `batch` in order and collect the results.
///
/// Before each trial of a multi-trial batch the pacer is consulted per the
/// batch's [`Pause`]. Each trial records into memory. The first failing
/// transfer aborts the batch; results of earlier trials are discarded.
pub fn run_batch<T, P>(
    batch: &TrialBatch,
    transfer: &T,
    pacer: &mut P,
) -> Result<Vec<Option<Recording>>>
where
    T: Transfer + ?Sized,
    P: Pacer + ?Sized,
{
    let total = batch.len();
    let mut results = Vec::with_capacity(total);

    for trial in batch.trials() {
        if total > 1 {
            match batch.pause() {
                Pause::Confirm => pacer.confirm(trial.index, total)?,
                Pause::Countdown(pause) => pacer.countdown(trial.index, total, pause)?,
                Pause::Skip => {}
            }
        }

        tracing::info!(
            trial = trial.index + 1,
            total,
            inputs = %trial.input_ports,
            outputs = %trial.output_ports,
            "starting trial"
        );
        let request = batch.request(&trial);
        let result = transfer
            .transfer(&request)
            .map_err(|source| BatchError::Trial {
                index: trial.index,
                source,
            })?;
        tracing::debug!(
            trial = trial.index + 1,
            frames = result.as_ref().map_or(0, |r| r.samples.num_frames()),
            "trial finished"
        );
        results.push(result);
    }

    Ok(results)
}
