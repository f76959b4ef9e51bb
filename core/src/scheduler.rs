use std::time::Duration;

use crate::*;

/// Deferred delivery of mismatch-resolutions.
///
/// After `delay` the host hands the token back to [`MemoryGame::resolve`]. Cancellation is best effort: the engine
/// ignores tokens from older generations anyway.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, pending: PendingResolution);

    fn cancel(&mut self, pending: PendingResolution);
}

/// Scheduler driven by a virtual clock, time only moves through [`ManualScheduler::advance`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ManualScheduler {
    now: Duration,
    queue: Vec<(Duration, PendingResolution)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Queued tokens with their deadlines, in scheduling order
    pub fn queued(&self) -> impl Iterator<Item = (Duration, PendingResolution)> + '_ {
        self.queue.iter().copied()
    }

    /// Move the clock forward and take every token whose deadline has passed, earliest first.
    pub fn advance(&mut self, by: Duration) -> Vec<PendingResolution> {
        self.now = self.now.saturating_add(by);
        let now = self.now;

        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.queue.drain(..).partition(|&(deadline, _)| deadline <= now);
        self.queue = waiting;

        due.sort_by_key(|&(deadline, _)| deadline);
        due.into_iter().map(|(_, pending)| pending).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, pending: PendingResolution) {
        let deadline = self.now.saturating_add(delay);
        log::trace!("Scheduled {:?} at {:?}", pending, deadline);
        self.queue.push((deadline, pending));
    }

    fn cancel(&mut self, pending: PendingResolution) {
        self.queue.retain(|&(_, queued)| queued != pending);
    }
}
