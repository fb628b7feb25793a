//! Terminal input
//!
//! `crossterm::event::poll` blocks, so input is read on its own task and
//! handed to the runtime loop over a channel.

use crate::event::EventKind;
use crossterm::event::{self, MouseEventKind};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// The crossterm events the loop cares about. Focus and paste are dropped.
#[derive(Debug)]
pub enum RawEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize(u16, u16),
}

/// Read input until `cancel_token` fires or the receiver goes away.
///
/// Every `loop_sleep` it drains up to a batch of pending events, waiting at
/// most `poll_timeout` for each. Input still buffered at cancellation is
/// discarded so it doesn't leak into the shell.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    poll_timeout: Duration,
    loop_sleep: Duration,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        const MAX_EVENTS_PER_BATCH: usize = 20;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("input reader stopping");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(loop_sleep) => {
                    let mut processed = 0;
                    while processed < MAX_EVENTS_PER_BATCH
                        && event::poll(poll_timeout).unwrap_or(false)
                    {
                        processed += 1;
                        let Ok(evt) = event::read() else {
                            continue;
                        };
                        let Some(raw) = to_raw(evt) else {
                            continue;
                        };
                        if tx.send(raw).is_err() {
                            debug!("runtime gone, input reader exiting");
                            return;
                        }
                    }
                }
            }
        }
    })
}

fn to_raw(evt: event::Event) -> Option<RawEvent> {
    match evt {
        event::Event::Key(key) => Some(RawEvent::Key(key)),
        event::Event::Mouse(mouse) => Some(RawEvent::Mouse(mouse)),
        event::Event::Resize(w, h) => Some(RawEvent::Resize(w, h)),
        _ => None,
    }
}

/// Mouse wheel becomes `Scroll` with a signed delta; everything else maps 1:1.
pub fn process_raw_event(raw: RawEvent) -> EventKind {
    match raw {
        RawEvent::Key(key) => EventKind::Key(key),
        RawEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollDown => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: 1,
            },
            MouseEventKind::ScrollUp => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: -1,
            },
            _ => EventKind::Mouse(mouse),
        },
        RawEvent::Resize(w, h) => EventKind::Resize(w, h),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

    #[test]
    fn test_process_raw_event_key() {
        let kind = process_raw_event(RawEvent::Key(KeyEvent::new(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
        )));
        assert!(matches!(kind, EventKind::Key(_)));
    }

    #[test]
    fn test_process_raw_event_scroll() {
        let scroll_up = MouseEvent {
            kind: MouseEventKind::ScrollUp,
            column: 4,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };

        match process_raw_event(RawEvent::Mouse(scroll_up)) {
            EventKind::Scroll { column, row, delta } => {
                assert_eq!((column, row, delta), (4, 2, -1));
            }
            other => panic!("Expected Scroll event, got {:?}", other),
        }
    }

    #[test]
    fn test_process_raw_event_resize() {
        let kind = process_raw_event(RawEvent::Resize(80, 24));
        assert!(matches!(kind, EventKind::Resize(80, 24)));
    }

    #[test]
    fn test_focus_events_are_dropped() {
        assert!(to_raw(event::Event::FocusGained).is_none());
    }
}
