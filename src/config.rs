//! Configuration types for autoplay
//!
//! Options are layered: built-in defaults, an explicit base layer held by
//! the [`OptionsResolver`], then the user's options. Each layer may carry
//! `breakpoints`, partial overrides keyed by media query that apply when
//! the host reports the query as matching.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::{AutoplayError, Result};

/// Default delay between advances, in milliseconds
pub const DEFAULT_DELAY_MS: u64 = 4_000;

/// Fully resolved autoplay options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplayOptions {
    /// Whether the plugin does anything at all
    pub active: bool,
    /// Milliseconds between advances
    pub delay: u64,

    pub pause_on_mouse_enter: bool,
    pub pause_on_click: bool,
    pub pause_on_focus_in: bool,
    /// Reserved, has no effect
    pub pause_on_last_snap: bool,

    pub stop_on_mouse_enter: bool,
    pub stop_on_click: bool,
    pub stop_on_focus_in: bool,
    /// Reserved, has no effect
    pub stop_on_last_snap: bool,

    /// Whether the leave/blur counterpart of a trigger resumes playback
    pub revert_on_event: bool,
    /// Start playing as soon as the controller is initialized
    pub play_on_init: bool,
}

impl Default for AutoplayOptions {
    fn default() -> Self {
        Self {
            active: true,
            delay: DEFAULT_DELAY_MS,
            pause_on_mouse_enter: false,
            pause_on_click: false,
            pause_on_focus_in: false,
            pause_on_last_snap: false,
            stop_on_mouse_enter: false,
            stop_on_click: false,
            stop_on_focus_in: false,
            stop_on_last_snap: false,
            revert_on_event: true,
            play_on_init: true,
        }
    }
}

impl AutoplayOptions {
    /// Delay between advances
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay)
    }

    /// Check option values
    pub fn validate(&self) -> Result<()> {
        if self.delay == 0 {
            return Err(AutoplayError::InvalidOption {
                key: "delay",
                reason: "must be at least 1 millisecond".to_string(),
            });
        }
        Ok(())
    }

    /// Overlay the keys set in `partial` (breakpoints are not applied here)
    pub fn apply(&mut self, partial: &PartialOptions) {
        macro_rules! overlay {
            ($target:expr, $source:expr; $($field:ident),* $(,)?) => {
                $(if let Some(value) = $source.$field {
                    $target.$field = value;
                })*
            };
        }

        overlay!(
            self, partial;
            active,
            delay,
            pause_on_mouse_enter,
            pause_on_click,
            pause_on_focus_in,
            pause_on_last_snap,
            stop_on_mouse_enter,
            stop_on_click,
            stop_on_focus_in,
            stop_on_last_snap,
            revert_on_event,
            play_on_init,
        );
    }
}

/// Options as written by a user: every key optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_on_mouse_enter: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_on_click: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_on_focus_in: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_on_last_snap: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_on_mouse_enter: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_on_click: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_on_focus_in: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_on_last_snap: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revert_on_event: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_on_init: Option<bool>,

    /// Overrides keyed by media query (e.g. "(min-width: 768px)")
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub breakpoints: BTreeMap<String, PartialOptions>,
}

impl PartialOptions {
    /// Create an empty set of options
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from TOML
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Parse options from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from a TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Set the delay in milliseconds
    pub fn with_delay(mut self, delay: u64) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set whether to start playing on init
    pub fn with_play_on_init(mut self, play_on_init: bool) -> Self {
        self.play_on_init = Some(play_on_init);
        self
    }

    /// Set whether leave/blur events resume playback
    pub fn with_revert_on_event(mut self, revert: bool) -> Self {
        self.revert_on_event = Some(revert);
        self
    }

    /// Pause on pointer enter
    pub fn with_pause_on_mouse_enter(mut self, enabled: bool) -> Self {
        self.pause_on_mouse_enter = Some(enabled);
        self
    }

    /// Pause on click
    pub fn with_pause_on_click(mut self, enabled: bool) -> Self {
        self.pause_on_click = Some(enabled);
        self
    }

    /// Pause on focus entering the root
    pub fn with_pause_on_focus_in(mut self, enabled: bool) -> Self {
        self.pause_on_focus_in = Some(enabled);
        self
    }

    /// Stop on pointer enter
    pub fn with_stop_on_mouse_enter(mut self, enabled: bool) -> Self {
        self.stop_on_mouse_enter = Some(enabled);
        self
    }

    /// Stop on click
    pub fn with_stop_on_click(mut self, enabled: bool) -> Self {
        self.stop_on_click = Some(enabled);
        self
    }

    /// Stop on focus entering the root
    pub fn with_stop_on_focus_in(mut self, enabled: bool) -> Self {
        self.stop_on_focus_in = Some(enabled);
        self
    }

    /// Enable or disable the plugin
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Add an override that applies while `query` matches
    pub fn with_breakpoint(mut self, query: impl Into<String>, options: PartialOptions) -> Self {
        self.breakpoints.insert(query.into(), options);
        self
    }
}

/// Resolves layered options into the immutable set a controller runs with
///
/// The base layer replaces a process-wide default override: hosts that
/// want shared defaults build one resolver and pass it to every init.
#[derive(Debug, Clone, Default)]
pub struct OptionsResolver {
    base: PartialOptions,
}

impl OptionsResolver {
    /// Resolver with only the built-in defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver with an explicit base layer over the built-in defaults
    pub fn with_base(base: PartialOptions) -> Self {
        Self { base }
    }

    /// The base layer
    pub fn base(&self) -> &PartialOptions {
        &self.base
    }

    /// Merge defaults, base and user options, then every matching breakpoint
    pub fn resolve<F>(&self, user: &PartialOptions, matches_media: F) -> Result<AutoplayOptions>
    where
        F: Fn(&str) -> bool,
    {
        let mut options = AutoplayOptions::default();
        options.apply(&self.base);
        options.apply(user);

        for layer in [&self.base, user] {
            for (query, overrides) in &layer.breakpoints {
                if matches_media(query) {
                    log::debug!("Applying autoplay breakpoint {}", query);
                    options.apply(overrides);
                }
            }
        }

        options.validate()?;
        Ok(options)
    }
}
