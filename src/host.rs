//! Host carousel contract
//!
//! The controller never renders or scrolls anything itself. Everything it
//! needs from the paging engine goes through [`CarouselHost`].

use std::fmt;

use crate::core::AutoplayEvent;
use crate::triggers::DomEvent;

/// The paging engine the controller drives
///
/// Listener registration is scoped: the host only needs to route events
/// registered through `add_listener` to `AutoplayController::handle_dom_event`
/// until `clear_listeners` is called. Selection changes made after
/// `subscribe_select` are reported through `AutoplayController::on_select`.
pub trait CarouselHost {
    /// Element type that listeners attach to
    type Node: Clone + PartialEq + fmt::Debug;

    /// Number of pages (scroll snaps)
    fn page_count(&self) -> usize;

    /// Whether a page exists after the current one
    fn can_advance(&self) -> bool;

    /// Move to the next page
    fn advance(&mut self);

    /// Move to the page at `index`
    fn advance_to(&mut self, index: usize);

    /// Root element of the carousel
    fn root_element(&self) -> Self::Node;

    /// Fire-and-forget notification sink
    fn emit(&mut self, event: AutoplayEvent);

    /// Start reporting selection changes to the controller
    fn subscribe_select(&mut self);

    /// Route `event` on `target` to the controller
    fn add_listener(&mut self, target: &Self::Node, event: DomEvent);

    /// Drop every listener registered through `add_listener`
    fn clear_listeners(&mut self);

    /// Whether a media query currently matches (used for breakpoints)
    fn matches_media(&self, _query: &str) -> bool {
        false
    }
}
