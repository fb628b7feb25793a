//! Action trait for type-safe state mutations

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to the store
///
/// Actions represent intents to change state. They should be:
/// - Clone: Actions may be logged or sent to multiple handlers
/// - Debug: For logging
/// - Send + 'static: For async dispatch across tasks
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;

    /// Short, human-readable description used in logs.
    ///
    /// Defaults to the `Debug` output. Override for actions that carry
    /// large payloads.
    fn summary(&self) -> String {
        format!("{:?}", self)
    }
}
