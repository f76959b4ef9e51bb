use concentration_core::{PendingResolution, Scheduler};
use std::time::{Duration, Instant};

/// Wall-clock scheduler polled by the console loop, which sleeps until [`DeadlineScheduler::next_deadline`].
#[derive(Debug, Default)]
pub(crate) struct DeadlineScheduler {
    queue: Vec<(Instant, PendingResolution)>,
}

impl DeadlineScheduler {
    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.iter().map(|&(deadline, _)| deadline).min()
    }

    /// Remove and return every token due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<PendingResolution> {
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.queue.drain(..).partition(|&(deadline, _)| deadline <= now);
        self.queue = waiting;

        due.sort_by_key(|&(deadline, _)| deadline);
        due.into_iter().map(|(_, pending)| pending).collect()
    }

    fn schedule_at(&mut self, deadline: Instant, pending: PendingResolution) {
        self.queue.push((deadline, pending));
    }
}

impl Scheduler for DeadlineScheduler {
    fn schedule(&mut self, delay: Duration, pending: PendingResolution) {
        self.schedule_at(Instant::now() + delay, pending);
    }

    fn cancel(&mut self, pending: PendingResolution) {
        self.queue.retain(|&(_, queued)| queued != pending);
    }
}
