//! Trigger bindings derived from options

use super::{DomEvent, TriggerAction};
use crate::config::AutoplayOptions;

/// Event/action pairs to install for `options`, in registration order
pub fn bindings_for(options: &AutoplayOptions) -> Vec<(DomEvent, TriggerAction)> {
    let revert = options.revert_on_event;
    let mut bindings = Vec::new();

    // Pause actions
    if options.pause_on_mouse_enter {
        bindings.push((DomEvent::PointerEnter, TriggerAction::Pause));
        if revert {
            bindings.push((DomEvent::PointerLeave, TriggerAction::Resume));
        }
    }

    if options.pause_on_click {
        bindings.push((DomEvent::Click, TriggerAction::PauseToggle));
    }

    if options.pause_on_focus_in {
        bindings.push((DomEvent::FocusIn, TriggerAction::Pause));
        if revert {
            bindings.push((DomEvent::FocusOut, TriggerAction::Resume));
        }
    }

    // Stop actions
    if options.stop_on_mouse_enter {
        bindings.push((DomEvent::PointerEnter, TriggerAction::Stop));
        if revert {
            bindings.push((DomEvent::PointerLeave, TriggerAction::Resume));
        }
    }

    if options.stop_on_click {
        bindings.push((DomEvent::Click, TriggerAction::StopToggle));
    }

    if options.stop_on_focus_in {
        bindings.push((DomEvent::FocusIn, TriggerAction::Stop));
        if revert {
            bindings.push((DomEvent::FocusOut, TriggerAction::Resume));
        }
    }

    bindings
}
