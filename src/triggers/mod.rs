//! DOM trigger wiring
//!
//! Maps configured user interactions on the carousel root to pause, stop
//! and resume calls.

mod config;
mod scope;
mod types;

pub use config::bindings_for;
pub use scope::{Binding, ListenerScope};
pub use types::{ControlAction, DomEvent, TriggerAction};
