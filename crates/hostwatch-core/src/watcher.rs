use crate::constants::{POLL_INTERVAL, PROBE_INTERVAL};
use crate::family::Target;
use crate::probe::ProbeOutcome;
use crate::prober::EchoProbe;
use crate::types::Sequence;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

/// Receives the outcome of every attempt.
pub trait Report {
    fn report(&mut self, target: &Target, sequence: Sequence, outcome: &ProbeOutcome);
}

/// How a watch ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum WatchResult {
    /// The host replied to an echo request.
    Responding,
    /// The watch was cancelled.
    Cancelled,
}

/// Probe a target until it responds.
#[derive(Debug)]
pub struct Watcher<P> {
    prober: P,
    interval: Duration,
}

impl<P: EchoProbe> Watcher<P> {
    pub const fn new(prober: P) -> Self {
        Self {
            prober,
            interval: PROBE_INTERVAL,
        }
    }

    #[cfg(test)]
    const fn with_interval(prober: P, interval: Duration) -> Self {
        Self { prober, interval }
    }

    /// Probe `target` once per interval until it replies or `cancel` fires.
    ///
    /// Sequences start at 1 and increase by one per attempt.
    #[instrument(skip(self, reporter, cancel), level = "trace")]
    pub fn watch<R: Report>(
        &mut self,
        target: Target,
        reporter: &mut R,
        cancel: &CancellationToken,
    ) -> WatchResult {
        let mut sequence = Sequence::first();
        loop {
            let outcome = self.prober.probe(target, sequence, cancel);
            tracing::debug!(%sequence, ?outcome, "probe complete");
            reporter.report(&target, sequence, &outcome);
            match outcome {
                ProbeOutcome::Success { .. } => return WatchResult::Responding,
                ProbeOutcome::Cancelled => return WatchResult::Cancelled,
                _ => {}
            }
            if !self.pause(cancel) {
                return WatchResult::Cancelled;
            }
            sequence = sequence.next();
        }
    }

    /// Wait for the interval, returning false if cancelled first.
    fn pause(&self, cancel: &CancellationToken) -> bool {
        let deadline = Instant::now() + self.interval;
        loop {
            if cancel.is_cancelled() {
                return false;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return true;
            }
            std::thread::sleep(remaining.min(POLL_INTERVAL));
        }
    }
}
