//! Notifications emitted by the controller

use serde::{Deserialize, Serialize};
use std::fmt;

/// Notification sent to the host's event sink (no payload)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutoplayEvent {
    /// A tick was scheduled (start of playback or next cycle)
    Play,
    Stop,
    Pause,
    Resume,
    Reset,
}

impl AutoplayEvent {
    /// Host event name
    pub fn name(&self) -> &'static str {
        match self {
            AutoplayEvent::Play => "autoplay:play",
            AutoplayEvent::Stop => "autoplay:stop",
            AutoplayEvent::Pause => "autoplay:pause",
            AutoplayEvent::Resume => "autoplay:resume",
            AutoplayEvent::Reset => "autoplay:reset",
        }
    }
}

impl fmt::Display for AutoplayEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
