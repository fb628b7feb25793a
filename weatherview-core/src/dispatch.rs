//! Handle for sending actions into a running store

use tokio::sync::mpsc;

use crate::Action;

/// Cloneable sender of actions.
///
/// This is what gets injected into view-level collaborators: they can ask
/// the store for changes but never touch its state directly. Actions sent
/// after the runtime has stopped are dropped.
pub struct Dispatcher<A> {
    tx: mpsc::UnboundedSender<A>,
}

impl<A> Clone for Dispatcher<A> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<A: Action> Dispatcher<A> {
    /// Wrap an action channel sender.
    pub fn new(tx: mpsc::UnboundedSender<A>) -> Self {
        Self { tx }
    }

    /// Queue an action for the store.
    pub fn dispatch(&self, action: A) {
        let name = action.name();
        if self.tx.send(action).is_err() {
            tracing::debug!(action = %name, "Dropped action, store is gone");
        }
    }
}

impl<A> std::fmt::Debug for Dispatcher<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}
