//! Scoped listener registry

use super::{DomEvent, TriggerAction};

/// One installed listener
#[derive(Debug, Clone, PartialEq)]
pub struct Binding<N> {
    pub target: N,
    pub event: DomEvent,
    pub action: TriggerAction,
}

/// Every listener installed during init, released together on teardown
#[derive(Debug)]
pub struct ListenerScope<N> {
    bindings: Vec<Binding<N>>,
}

impl<N> ListenerScope<N> {
    /// Create an empty scope
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Record a listener
    pub fn add(&mut self, target: N, event: DomEvent, action: TriggerAction) {
        self.bindings.push(Binding {
            target,
            event,
            action,
        });
    }

    /// Actions bound to `event`, in registration order
    pub fn actions_for(&self, event: DomEvent) -> Vec<TriggerAction> {
        self.bindings
            .iter()
            .filter(|b| b.event == event)
            .map(|b| b.action)
            .collect()
    }

    /// All installed listeners
    pub fn bindings(&self) -> &[Binding<N>] {
        &self.bindings
    }

    /// Release every listener, returning how many were dropped
    pub fn clear(&mut self) -> usize {
        let count = self.bindings.len();
        self.bindings.clear();
        count
    }

    /// Number of registered bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no binding is registered
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<N> Default for ListenerScope<N> {
    fn default() -> Self {
        Self::new()
    }
}
