//! Virtual-time scheduler

use std::time::Duration;

use super::{Clock, Scheduler, TimerId};

/// Deterministic scheduler driven by explicit time advances
///
/// Nothing fires on its own: `pop_due` (driven by
/// `AutoplayController::advance_time`) hands back the timers that became
/// due, earliest deadline first, and `set_now` moves the virtual clock.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    /// Pending timers as (deadline, id)
    pending: Vec<(Duration, TimerId)>,
}

impl ManualScheduler {
    /// Create a scheduler whose clock reads zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending timers
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Remove the earliest timer due at or before `limit`, moving the clock
    /// to its deadline
    pub fn pop_due(&mut self, limit: Duration) -> Option<TimerId> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (deadline, _))| *deadline <= limit)
            .min_by_key(|(_, (deadline, id))| (*deadline, *id))
            .map(|(index, _)| index)?;

        let (deadline, id) = self.pending.remove(index);
        self.now = self.now.max(deadline);
        Some(id)
    }

    /// Move the clock forward without firing anything
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl Clock for ManualScheduler {
    fn now(&self) -> Duration {
        self.now
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, after: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId::new(self.next_id);
        self.pending.push((self.now + after, id));
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.pending.retain(|(_, pending)| *pending != id);
    }
}
