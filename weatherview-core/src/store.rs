//! Middleware hooks around store dispatch

use crate::Action;

/// Middleware trait for intercepting actions
///
/// Implement this trait to add logging or other cross-cutting
/// concerns to a store.
pub trait Middleware<A: Action> {
    /// Called before the action is dispatched to the reducer
    fn before(&mut self, action: &A);

    /// Called after the action is processed by the reducer
    fn after(&mut self, action: &A, state_changed: bool);
}

/// A no-op middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _action: &A) {}
    fn after(&mut self, _action: &A, _state_changed: bool) {}
}

/// Middleware that logs actions through `tracing`
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Whether to log before dispatch
    pub log_before: bool,
    /// Whether to log after dispatch
    pub log_after: bool,
    /// Action names that are never logged
    pub ignored: Vec<&'static str>,
}

impl LoggingMiddleware {
    /// Create a new logging middleware with default settings (log after only)
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
            ignored: Vec::new(),
        }
    }

    /// Create a logging middleware that logs both before and after
    pub fn verbose() -> Self {
        Self {
            log_before: true,
            ..Self::new()
        }
    }

    /// Skip an action by name
    pub fn ignore(mut self, name: &'static str) -> Self {
        self.ignored.push(name);
        self
    }

    fn skips<A: Action>(&self, action: &A) -> bool {
        self.ignored.contains(&action.name())
    }
}

impl<A: Action> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        if self.log_before && !self.skips(action) {
            tracing::debug!(action = %action.name(), "Dispatching action");
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if self.log_after && !self.skips(action) {
            tracing::debug!(
                action = %action.name(),
                summary = %action.summary(),
                state_changed = state_changed,
                "Action processed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    enum TestAction {
        Ping,
        Tick,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Ping => "Ping",
                TestAction::Tick => "Tick",
            }
        }
    }

    #[test]
    fn test_logging_middleware_ignores_by_name() {
        let middleware = LoggingMiddleware::new().ignore("Tick");

        assert!(middleware.skips(&TestAction::Tick));
        assert!(!middleware.skips(&TestAction::Ping));
    }

    #[test]
    fn test_verbose_logs_both_phases() {
        let middleware = LoggingMiddleware::verbose();
        assert!(middleware.log_before);
        assert!(middleware.log_after);
    }
}
