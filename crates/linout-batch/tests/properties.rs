//! Property-based tests for trial selection.
//!
//! For arbitrary list lengths, the batch runs `max(len)` trials in index order
//! and shorter lists hold their last element.

use linout_batch::{Pacer, Pause, TrialBatch, run_batch};
use linout_io::{PlaybackSource, PortSet, Recording, Transfer, TransferRequest};
use proptest::prelude::*;
use std::cell::RefCell;
use std::time::Duration;

#[derive(Default)]
struct Capture {
    requests: RefCell<Vec<TransferRequest>>,
}

impl Transfer for Capture {
    fn transfer(&self, request: &TransferRequest) -> linout_io::Result<Option<Recording>> {
        self.requests.borrow_mut().push(request.clone());
        Ok(None)
    }
}

/// Counts pacing calls without blocking.
#[derive(Default)]
struct Counter {
    confirms: Vec<usize>,
}

impl Pacer for Counter {
    fn confirm(&mut self, index: usize, _total: usize) -> linout_batch::Result<()> {
        self.confirms.push(index);
        Ok(())
    }

    fn countdown(&mut self, _: usize, _: usize, _: Duration) -> linout_batch::Result<()> {
        Ok(())
    }
}

fn names(prefix: &str, len: usize) -> Vec<String> {
    (0..len).map(|i| format!("{prefix}{i}")).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every trial index runs exactly once, in increasing order, and each
    /// list contributes element `min(i, len - 1)`.
    #[test]
    fn hold_last_selection(
        plays in 1usize..6,
        inputs in 1usize..6,
        outputs in 1usize..6,
    ) {
        let play_names = names("p", plays);
        let in_names = names("in", inputs);
        let out_names = names("out", outputs);

        let batch = TrialBatch::new(
            play_names.iter().map(PlaybackSource::file).collect::<Vec<_>>(),
            in_names.iter().map(|s| PortSet::from(s.as_str())).collect::<Vec<_>>(),
            out_names.iter().map(|s| PortSet::from(s.as_str())).collect::<Vec<_>>(),
        )
        .unwrap()
        .with_pause(Pause::Confirm);

        let capture = Capture::default();
        let mut counter = Counter::default();
        let results = run_batch(&batch, &capture, &mut counter).unwrap();

        let n = plays.max(inputs).max(outputs);
        prop_assert_eq!(results.len(), n);

        let requests = capture.requests.borrow();
        prop_assert_eq!(requests.len(), n);
        for (i, request) in requests.iter().enumerate() {
            prop_assert_eq!(
                &request.playback,
                &PlaybackSource::file(&play_names[i.min(plays - 1)])
            );
            prop_assert_eq!(request.input_ports.to_string(), in_names[i.min(inputs - 1)].clone());
            prop_assert_eq!(request.output_ports.to_string(), out_names[i.min(outputs - 1)].clone());
        }

        let expected_confirms: Vec<usize> = if n > 1 { (0..n).collect() } else { Vec::new() };
        prop_assert_eq!(counter.confirms, expected_confirms);
    }

    /// Equal-length lists map trial `i` to element `i` of each list.
    #[test]
    fn equal_lengths_pair_elementwise(n in 1usize..8) {
        let play_names = names("p", n);
        let batch = TrialBatch::new(
            play_names.iter().map(PlaybackSource::file).collect::<Vec<_>>(),
            (0..n).map(|i| PortSet::from(format!("in{i}").as_str())).collect::<Vec<_>>(),
            (0..n).map(|i| PortSet::from(format!("out{i}").as_str())).collect::<Vec<_>>(),
        )
        .unwrap();

        prop_assert_eq!(batch.len(), n);
        for (i, trial) in batch.trials().enumerate() {
            prop_assert_eq!(trial.index, i);
            prop_assert_eq!(trial.playback, &PlaybackSource::file(&play_names[i]));
            prop_assert_eq!(trial.input_ports.to_string(), format!("in{i}"));
            prop_assert_eq!(trial.output_ports.to_string(), format!("out{i}"));
        }
    }
}
