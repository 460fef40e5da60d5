//! Trigger type definitions

use std::fmt;

use crate::core::PlaybackState;

/// DOM events the controller can listen to on the root element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomEvent {
    PointerEnter,
    PointerLeave,
    FocusIn,
    FocusOut,
    Click,
}

impl DomEvent {
    /// DOM event name
    pub fn name(&self) -> &'static str {
        match self {
            DomEvent::PointerEnter => "pointerenter",
            DomEvent::PointerLeave => "pointerleave",
            DomEvent::FocusIn => "focusin",
            DomEvent::FocusOut => "focusout",
            DomEvent::Click => "click",
        }
    }

    /// Parse a DOM event name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pointerenter" | "mouseenter" => Some(DomEvent::PointerEnter),
            "pointerleave" | "mouseleave" => Some(DomEvent::PointerLeave),
            "focusin" => Some(DomEvent::FocusIn),
            "focusout" => Some(DomEvent::FocusOut),
            "click" => Some(DomEvent::Click),
            _ => None,
        }
    }
}

impl fmt::Display for DomEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Control call a trigger ends up making
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Pause,
    Stop,
    Resume,
}

/// What a bound DOM event does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    /// Always pause
    Pause,
    /// Always stop
    Stop,
    /// Always resume
    Resume,
    /// Resume when paused, otherwise pause if reverting is enabled
    PauseToggle,
    /// Stop when paused, otherwise resume if reverting is enabled
    ///
    /// Branches on the paused status, not the stopped one.
    StopToggle,
}

impl TriggerAction {
    /// Decide the control call for the current playback state
    pub fn resolve(&self, state: PlaybackState, revert_on_event: bool) -> Option<ControlAction> {
        match self {
            TriggerAction::Pause => Some(ControlAction::Pause),
            TriggerAction::Stop => Some(ControlAction::Stop),
            TriggerAction::Resume => Some(ControlAction::Resume),
            TriggerAction::PauseToggle => {
                if state.is_paused() {
                    Some(ControlAction::Resume)
                } else if revert_on_event {
                    Some(ControlAction::Pause)
                } else {
                    None
                }
            }
            TriggerAction::StopToggle => {
                if state.is_paused() {
                    Some(ControlAction::Stop)
                } else if revert_on_event {
                    Some(ControlAction::Resume)
                } else {
                    None
                }
            }
        }
    }
}
