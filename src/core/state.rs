//! Playback state types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Playback status of the controller
///
/// Exactly one variant holds at a time, so running and paused can never be
/// observed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No timer pending, elapsed time discarded
    #[default]
    Stopped,
    /// No timer pending, elapsed time kept for the next resume
    Paused,
    /// A tick is scheduled
    Running,
}

impl PlaybackState {
    /// Whether ticks are scheduled
    pub fn is_running(&self) -> bool {
        matches!(self, PlaybackState::Running)
    }

    /// Whether the cycle is suspended with elapsed time kept
    pub fn is_paused(&self) -> bool {
        matches!(self, PlaybackState::Paused)
    }

    /// Whether the cycle is halted
    pub fn is_stopped(&self) -> bool {
        matches!(self, PlaybackState::Stopped)
    }

    /// Read-only snapshot in the boolean form hosts expect
    pub fn status(&self) -> AutoplayStatus {
        AutoplayStatus {
            is_playing: self.is_running(),
            is_paused: self.is_paused(),
            is_stopped: self.is_stopped(),
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackState::Stopped => f.write_str("stopped"),
            PlaybackState::Paused => f.write_str("paused"),
            PlaybackState::Running => f.write_str("running"),
        }
    }
}

/// Consistent snapshot of the playback flags
///
/// Built from a [`PlaybackState`], never mutated independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoplayStatus {
    pub is_playing: bool,
    pub is_paused: bool,
    pub is_stopped: bool,
}

impl From<PlaybackState> for AutoplayStatus {
    fn from(state: PlaybackState) -> Self {
        state.status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_stopped() {
        assert_eq!(PlaybackState::default(), PlaybackState::Stopped);
    }

    #[test]
    fn test_status_exactly_one_flag() {
        for state in [PlaybackState::Stopped, PlaybackState::Paused, PlaybackState::Running] {
            let status = state.status();
            let set = [status.is_playing, status.is_paused, status.is_stopped]
                .iter()
                .filter(|flag| **flag)
                .count();
            assert_eq!(set, 1, "{} must set exactly one flag", state);
        }
    }

    #[test]
    fn test_status_serializes() {
        let json = serde_json::to_string(&PlaybackState::Paused.status()).unwrap();
        assert_eq!(json, r#"{"is_playing":false,"is_paused":true,"is_stopped":false}"#);
    }
}
