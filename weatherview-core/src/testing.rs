//! Test utilities for applications built on this crate
//!
//! - [`key`]: build a `KeyEvent` from a string such as `"ctrl+t"`
//! - [`TestHarness`]: state plus a captured action channel
//! - [`RenderHarness`]: render into ratatui's `TestBackend` and read it back
//! - [`ActionAssertions`] and the `assert_emitted!` family of macros
//!
//! ```ignore
//! use weatherview_core::testing::*;
//!
//! let mut harness = TestHarness::<AppState, Action>::default();
//! let dispatcher = harness.dispatcher();
//! dispatcher.dispatch(Action::ErrorClear);
//!
//! let emitted = harness.drain_emitted();
//! assert_emitted!(emitted, Action::ErrorClear);
//! ```

use std::fmt::Debug;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;

use crate::dispatch::Dispatcher;
use crate::event::EventKind;
use crate::keybindings::parse_key_string;
use crate::Action;

/// Create a `KeyEvent` from a key string.
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key_string(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// Create a `KeyEvent` for a character with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

/// Create a `KeyEvent` for a character with Ctrl held.
pub fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Wrap a key string as an `EventKind`.
pub fn key_event(s: &str) -> EventKind {
    EventKind::Key(key(s))
}

/// One `EventKind` per character of `text`, as if typed.
pub fn type_text(text: &str) -> Vec<EventKind> {
    text.chars().map(|c| EventKind::Key(char_key(c))).collect()
}

/// State under test plus a captured action channel.
pub struct TestHarness<S, A: Action> {
    /// The application state under test
    pub state: S,
    tx: mpsc::UnboundedSender<A>,
    rx: mpsc::UnboundedReceiver<A>,
}

impl<S, A: Action> TestHarness<S, A> {
    /// Create a new test harness with the given initial state.
    pub fn new(state: S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { state, tx, rx }
    }

    /// A dispatcher whose actions land in this harness.
    pub fn dispatcher(&self) -> Dispatcher<A> {
        Dispatcher::new(self.tx.clone())
    }

    /// Emit an action directly.
    pub fn emit(&self, action: A) {
        let _ = self.tx.send(action);
    }

    /// Drain all emitted actions.
    pub fn drain_emitted(&mut self) -> Vec<A> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }
}

impl<S: Default, A: Action> Default for TestHarness<S, A> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

/// Renders into an in-memory terminal.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// Create a harness with the given terminal size.
    ///
    /// # Panics
    ///
    /// Panics if the test backend cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("create test terminal");
        Self { terminal }
    }

    /// Draw one frame and return the resulting buffer.
    pub fn render(&mut self, draw: impl FnOnce(&mut Frame)) -> &Buffer {
        self.terminal.draw(draw).expect("draw to test terminal");
        self.terminal.backend().buffer()
    }

    /// Draw one frame and return its text content, one line per row.
    pub fn render_to_string_plain(&mut self, draw: impl FnOnce(&mut Frame)) -> String {
        let buffer = self.render(draw);
        buffer_to_string_plain(buffer)
    }
}

/// Buffer contents without styling, rows separated by newlines.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        let row: String = (area.left()..area.right())
            .filter_map(|x| buffer.cell((x, y)))
            .map(|cell| cell.symbol())
            .collect();
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}

/// Fluent assertions over a list of emitted actions.
pub trait ActionAssertions<A> {
    /// Assert exactly `n` actions.
    fn assert_count(&self, n: usize);
    /// Assert no actions.
    fn assert_empty(&self);
    /// Assert the first action equals `expected`.
    fn assert_first(&self, expected: A);
}

impl<A: PartialEq + Debug> ActionAssertions<A> for Vec<A> {
    fn assert_count(&self, n: usize) {
        assert_eq!(
            self.len(),
            n,
            "Expected {} actions, got {}: {:?}",
            n,
            self.len(),
            self
        );
    }

    fn assert_empty(&self) {
        assert!(self.is_empty(), "Expected no actions, got: {:?}", self);
    }

    fn assert_first(&self, expected: A) {
        match self.first() {
            Some(first) => assert_eq!(first, &expected),
            None => panic!("Expected first action {:?}, got none", expected),
        }
    }
}

/// Assert that an action matching a pattern was emitted.
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that no action matching a pattern was emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Count actions matching a pattern.
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Foo,
        Bar(i32),
    }

    impl crate::Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Foo => "Foo",
                TestAction::Bar(_) => "Bar",
            }
        }
    }

    #[test]
    fn test_key_helpers() {
        assert_eq!(key("q").code, KeyCode::Char('q'));
        assert!(key("ctrl+t").modifiers.contains(KeyModifiers::CONTROL));
        assert_eq!(char_key('x').modifiers, KeyModifiers::NONE);
        assert!(ctrl_key('c').modifiers.contains(KeyModifiers::CONTROL));
        assert_eq!(type_text("ab").len(), 2);
    }

    #[test]
    #[should_panic(expected = "Invalid key string")]
    fn test_key_panics_on_garbage() {
        key("not-a-key");
    }

    #[test]
    fn test_harness_dispatcher_and_drain() {
        let mut harness = TestHarness::<(), TestAction>::new(());

        harness.dispatcher().dispatch(TestAction::Foo);
        harness.emit(TestAction::Bar(42));

        let actions = harness.drain_emitted();
        actions.assert_count(2);
        actions.assert_first(TestAction::Foo);
        harness.drain_emitted().assert_empty();
    }

    #[test]
    fn test_assert_macros() {
        let actions = vec![TestAction::Foo, TestAction::Bar(42)];

        assert_emitted!(actions, TestAction::Bar(n) if *n == 42);
        assert_not_emitted!(actions, TestAction::Bar(99));
        assert_eq!(count_emitted!(actions, TestAction::Bar(_)), 1);
    }

    #[test]
    fn test_render_harness_plain_text() {
        let mut render = RenderHarness::new(10, 2);
        let output = render.render_to_string_plain(|frame| {
            frame.render_widget(Paragraph::new("hello"), frame.area());
        });
        assert_eq!(output, "hello\n\n");
    }
}
