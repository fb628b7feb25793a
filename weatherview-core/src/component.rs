//! Component trait for UI elements

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A UI element that renders from props and turns events into actions
///
/// Components follow these rules:
/// 1. Props contain the read-only shared data needed for rendering
/// 2. `handle_event` returns actions, never mutates shared state
/// 3. `render` is a function of props plus the component's own view state
///
/// View-local state (cursor position, focus ring, a form's draft text) may
/// live in `&mut self`; anything other components read goes through actions.
pub trait Component<A> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Handle an event and return actions to dispatch
    ///
    /// Returns any `IntoIterator<Item = A>`: `None`, `Some(action)`, or a
    /// `Vec`. Default implementation returns no actions.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Render the component to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
