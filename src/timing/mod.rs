//! Time keeping for the autoplay cycle
//!
//! - `Clock` / `Scheduler` - the deferred-callback primitive the controller runs on
//! - `ElapsedTime` - time already consumed within the current delay interval
//! - `TimerSlot` - single pending timer, cancelled before every reschedule
//! - `ManualScheduler` - virtual time for deterministic driving

mod clock;
mod elapsed;
mod manual;
mod timer;

pub use clock::{Clock, SystemClock};
pub use elapsed::ElapsedTime;
pub use manual::ManualScheduler;
pub use timer::{Scheduler, TimerId, TimerSlot};
