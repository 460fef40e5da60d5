//! Core autoplay abstractions
//!
//! This module contains the main types of the controller:
//! - `PlaybackState` / `AutoplayStatus` - Current playback status
//! - `AutoplayController` - State machine that schedules and performs advances
//! - `AutoplayEvent` - Notifications emitted to the host

mod controller;
mod events;
mod state;

pub use controller::{AutoplayController, RootSelector};
pub use events::AutoplayEvent;
pub use state::{AutoplayStatus, PlaybackState};
