//! Terminal events as seen by components

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};

/// The event payload handed to components
#[derive(Debug, Clone)]
pub enum EventKind {
    /// Keyboard event
    Key(KeyEvent),
    /// Mouse event
    Mouse(MouseEvent),
    /// Scroll event with position and delta
    Scroll { column: u16, row: u16, delta: isize },
    /// Terminal resize
    Resize(u16, u16),
}

impl EventKind {
    /// The key event, if this is a key press (repeats and releases are skipped).
    pub fn key_press(&self) -> Option<&KeyEvent> {
        match self {
            EventKind::Key(key) if key.kind != KeyEventKind::Release => Some(key),
            _ => None,
        }
    }

    /// Whether this is a global quit chord (ctrl+c / ctrl+q).
    pub fn is_quit(&self) -> bool {
        self.key_press().is_some_and(|key| {
            key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> EventKind {
        EventKind::Key(KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::empty(),
        })
    }

    #[test]
    fn test_key_press_skips_release() {
        let press = key(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Press);
        let release = key(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Release);

        assert!(press.key_press().is_some());
        assert!(release.key_press().is_none());
        assert!(EventKind::Resize(80, 24).key_press().is_none());
    }

    #[test]
    fn test_is_quit() {
        let ctrl_c = key(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press);
        let plain_q = key(KeyCode::Char('q'), KeyModifiers::NONE, KeyEventKind::Press);

        assert!(ctrl_c.is_quit());
        assert!(!plain_q.is_quit());
    }
}
