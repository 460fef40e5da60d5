//! Carousel Autoplay
//!
//! A timed-advance controller for paginated views (carousels).
//! Advances pages on a fixed interval and lets pointer, focus, click and
//! programmatic navigation pause, resume, stop or reset the cycle while
//! preserving the time already waited across pause/resume.
//!
//! This crate can be used:
//! - Single threaded, with the host event loop delivering timers through
//!   [`AutoplayController::on_timer`]
//! - With the background [`runtime::AutoplayRuntime`] (feature `threaded`)
//! - Deterministically in tests through [`timing::ManualScheduler`]

pub mod config;
pub mod core;
pub mod host;
pub mod timing;
pub mod triggers;

#[cfg(feature = "threaded")]
pub mod runtime;

// Re-export commonly used types
pub use crate::config::{AutoplayOptions, OptionsResolver, PartialOptions};
pub use crate::core::{AutoplayController, AutoplayEvent, AutoplayStatus, PlaybackState};
pub use crate::host::CarouselHost;
pub use crate::timing::{Clock, ManualScheduler, Scheduler, TimerId};
pub use crate::triggers::{DomEvent, TriggerAction};

/// Plugin identity reported to the host's plugin registry
pub const PLUGIN_NAME: &str = "autoplay";

/// Errors raised while loading or resolving autoplay options
#[derive(Debug, thiserror::Error)]
pub enum AutoplayError {
    #[error("failed to read options file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid TOML options: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON options: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid option `{key}`: {reason}")]
    InvalidOption { key: &'static str, reason: String },
}

/// Result type for autoplay operations
pub type Result<T> = std::result::Result<T, AutoplayError>;
