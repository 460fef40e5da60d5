//! Elapsed-time bookkeeping across pause/resume cycles

use std::time::Duration;

/// Time consumed within the current delay interval
///
/// `begin` anchors the interval so that already-consumed time counts,
/// `capture` freezes the consumed time when the cycle is interrupted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElapsedTime {
    start: Duration,
    elapsed: Duration,
}

impl ElapsedTime {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor a new waiting interval at `now`, crediting time already consumed
    pub fn begin(&mut self, now: Duration) {
        self.start = now.saturating_sub(self.elapsed);
    }

    /// Record how much of the interval has been consumed as of `now`
    pub fn capture(&mut self, now: Duration) -> Duration {
        self.elapsed = now.saturating_sub(self.start);
        self.elapsed
    }

    /// Time still to wait before `delay` is reached
    pub fn remaining(&self, delay: Duration) -> Duration {
        delay.saturating_sub(self.elapsed)
    }

    /// Forget consumed time (after an advance, a stop or a reset)
    pub fn clear(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    /// Consumed time as of the last capture
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
