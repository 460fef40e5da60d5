//! Deferred callback scheduling with a single pending slot

use std::fmt;
use std::time::Duration;

use super::Clock;

/// Opaque handle to one scheduled deferred callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Wrap a raw scheduler-assigned id
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Deferred-callback facility the controller runs on
///
/// A scheduler does not call back into the controller. When a timer
/// becomes due, the owner of the event loop passes its id to
/// `AutoplayController::on_timer`.
pub trait Scheduler: Clock {
    /// Arrange for `id` to become due after `after`
    fn schedule(&mut self, after: Duration) -> TimerId;

    /// Withdraw a pending timer. Unknown or already fired ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

/// Holds at most one pending timer
///
/// Scheduling always cancels the previous handle first, and firing is only
/// accepted for the handle currently held, so a callback that was already
/// dequeued by the scheduler when it got cancelled is rejected as stale.
#[derive(Debug, Default)]
pub struct TimerSlot {
    pending: Option<TimerId>,
}

impl TimerSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pending timer with a new one due after `after`
    pub fn schedule<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S, after: Duration) -> TimerId {
        self.cancel(scheduler);
        let id = scheduler.schedule(after);
        self.pending = Some(id);
        id
    }

    /// Cancel the pending timer, if any
    pub fn cancel<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(id) = self.pending.take() {
            scheduler.cancel(id);
        }
    }

    /// Accept a fired timer. Returns false for stale or foreign ids.
    pub fn fire(&mut self, id: TimerId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// The pending timer, if any
    pub fn pending(&self) -> Option<TimerId> {
        self.pending
    }
}
