//! Inter-trial pacing: confirmation prompts and timed countdowns.

use crate::{BatchError, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::thread;
use std::time::{Duration, Instant};

/// Cells in the countdown bar.
pub const COUNTDOWN_WIDTH: usize = 10;

/// How often the countdown redraws.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// What happens before each trial of a multi-trial batch.
///
/// Single-trial batches are never paced.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Pause {
    /// Wait for the operator to confirm.
    #[default]
    Confirm,
    /// Wait a fixed time, showing a countdown.
    Countdown(Duration),
    /// Start each trial immediately: no prompt, no wait.
    Skip,
}

impl Pause {
    /// Interpret a pause given in seconds.
    ///
    /// `0` means [`Pause::Confirm`]; a positive value means [`Pause::Countdown`].
    /// [`Pause::Skip`] has no numeric spelling.
    pub fn from_secs(secs: f64) -> Result<Self> {
        if secs == 0.0 {
            Ok(Pause::Confirm)
        } else if secs.is_finite() && secs > 0.0 {
            Duration::try_from_secs_f64(secs)
                .map(Pause::Countdown)
                .map_err(|_| BatchError::InvalidPause(secs))
        } else {
            Err(BatchError::InvalidPause(secs))
        }
    }
}

/// Console interaction between trials.
pub trait Pacer {
    /// Block until the operator confirms trial `index` (zero-based) of `total`.
    fn confirm(&mut self, index: usize, total: usize) -> Result<()>;

    /// Block for `pause`, reporting progress, before trial `index` of `total`.
    fn countdown(&mut self, index: usize, total: usize, pause: Duration) -> Result<()>;
}

impl<P: Pacer + ?Sized> Pacer for &mut P {
    fn confirm(&mut self, index: usize, total: usize) -> Result<()> {
        (**self).confirm(index, total)
    }

    fn countdown(&mut self, index: usize, total: usize, pause: Duration) -> Result<()> {
        (**self).countdown(index, total, pause)
    }
}

/// Filled cells of a `width`-cell bar when `remaining` of `pause` seconds are left.
pub fn countdown_fill(pause: f64, remaining: f64, width: usize) -> usize {
    if pause <= 0.0 {
        return width;
    }
    let fill = ((pause - remaining) / pause * width as f64).round();
    fill.clamp(0.0, width as f64) as usize
}

/// Terminal pacer: reads confirmations from `input`, prompts on `output`,
/// and draws the countdown bar on stderr.
pub struct ConsolePacer<R, W> {
    input: R,
    output: W,
    show_progress: bool,
}

impl ConsolePacer<StdinLock<'static>, Stdout> {
    /// Pacer bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePacer<R, W> {
    /// Pacer over arbitrary streams.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            show_progress: true,
        }
    }

    /// Keep timing behavior but draw nothing.
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Give back the underlying streams.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    fn countdown_bar(&self, index: usize, total: usize) -> Result<ProgressBar> {
        let target = if self.show_progress {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        let bar = ProgressBar::with_draw_target(Some(COUNTDOWN_WIDTH as u64), target);
        bar.set_style(
            ProgressStyle::with_template("{prefix} [{bar:10}] {msg}")?.progress_chars("# "),
        );
        bar.set_prefix(format!("{} of {}:", index + 1, total));
        Ok(bar)
    }
}

impl<R: BufRead, W: Write> Pacer for ConsolePacer<R, W> {
    fn confirm(&mut self, index: usize, total: usize) -> Result<()> {
        write!(
            self.output,
            "({} of {}): press Enter to start ",
            index + 1,
            total
        )?;
        self.output.flush()?;

        // EOF counts as confirmation.
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(())
    }

    fn countdown(&mut self, index: usize, total: usize, pause: Duration) -> Result<()> {
        let bar = self.countdown_bar(index, total)?;
        let pause_secs = pause.as_secs_f64();
        let start = Instant::now();

        loop {
            let left = pause.saturating_sub(start.elapsed());
            if left.is_zero() {
                break;
            }
            let remaining = left.as_secs_f64().round();
            bar.set_position(countdown_fill(pause_secs, remaining, COUNTDOWN_WIDTH) as u64);
            bar.set_message(format!("{} sec remaining", remaining as u64));
            thread::sleep(POLL_INTERVAL.min(left));
        }

        bar.finish_and_clear();
        tracing::debug!(trial = index + 1, elapsed = ?start.elapsed(), "pause elapsed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn pause_from_secs() {
        assert_eq!(Pause::from_secs(0.0).unwrap(), Pause::Confirm);
        assert_eq!(
            Pause::from_secs(1.5).unwrap(),
            Pause::Countdown(Duration::from_millis(1500))
        );
        assert!(matches!(
            Pause::from_secs(-1.0),
            Err(BatchError::InvalidPause(_))
        ));
        assert!(Pause::from_secs(f64::NAN).is_err());
        assert!(matches!(
            Pause::from_secs(1e30),
            Err(BatchError::InvalidPause(_))
        ));
        assert_eq!(Pause::default(), Pause::Confirm);
    }

    #[test]
    fn fill_tracks_elapsed_fraction() {
        assert_eq!(countdown_fill(5.0, 5.0, 10), 0);
        assert_eq!(countdown_fill(5.0, 4.0, 10), 2);
        assert_eq!(countdown_fill(4.0, 1.0, 10), 8);
        assert_eq!(countdown_fill(5.0, 0.0, 10), 10);
    }

    #[test]
    fn fill_is_clamped() {
        // 2.6 s rounds up to 3 s remaining at the start
        assert_eq!(countdown_fill(2.6, 3.0, 10), 0);
        assert_eq!(countdown_fill(0.0, 0.0, 10), 10);
    }

    #[test]
    fn confirm_prompts_and_reads_a_line() {
        let mut pacer = ConsolePacer::new(Cursor::new("\nrest\n"), Vec::new());
        pacer.confirm(0, 3).unwrap();
        let (mut input, output) = pacer.into_inner();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "(1 of 3): press Enter to start "
        );
        // Exactly one line was consumed.
        let mut rest = String::new();
        input.read_line(&mut rest).unwrap();
        assert_eq!(rest, "rest\n");
    }

    #[test]
    fn confirm_accepts_eof() {
        let mut pacer = ConsolePacer::new(Cursor::new(""), Vec::new());
        assert!(pacer.confirm(1, 2).is_ok());
    }

    #[test]
    fn countdown_waits_for_the_pause() {
        let mut pacer = ConsolePacer::new(Cursor::new(""), Vec::new()).without_progress();
        let pause = Duration::from_millis(350);

        let start = Instant::now();
        pacer.countdown(0, 2, pause).unwrap();
        let elapsed = start.elapsed();

        assert!(elapsed >= pause, "returned early: {elapsed:?}");
        assert!(
            elapsed < pause + Duration::from_millis(250),
            "overshot: {elapsed:?}"
        );
    }
}
