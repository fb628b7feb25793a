//! The event/action/render loop.
//!
//! [`EffectRuntime`] owns the store, the action channel and the task
//! manager. Each turn of the loop either maps a terminal event into actions
//! or dispatches one queued action and hands the resulting effects to the
//! application's effect handler.

use std::io;
use std::marker::PhantomData;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::bus::{process_raw_event, spawn_event_poller, RawEvent};
use crate::dispatch::Dispatcher;
use crate::effect::{DispatchResult, EffectReducer, EffectStore, EffectStoreWithMiddleware};
use crate::event::EventKind;
use crate::observe::StateObserver;
use crate::store::Middleware;
use crate::tasks::TaskManager;
use crate::Action;

/// How often the terminal is polled for input.
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// How long one `crossterm::event::poll` call may block.
    pub poll_timeout: Duration,
    /// Pause before each batch of polls.
    pub loop_sleep: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            loop_sleep: Duration::from_millis(16),
        }
    }
}

/// What a view made of one terminal event.
///
/// Typing into the search field only changes view state, never the store,
/// so the view has to ask for the redraw itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome<A> {
    /// Queued in order after the event is handled.
    pub actions: Vec<A>,
    /// Redraw even if no action changes the store.
    pub needs_render: bool,
}

impl<A> EventOutcome<A> {
    /// The view did not care about the event.
    pub fn ignored() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: false,
        }
    }

    /// View state changed; redraw without dispatching.
    pub fn needs_render() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: true,
        }
    }

    /// Queue one action.
    pub fn action(action: A) -> Self {
        Self {
            actions: vec![action],
            needs_render: false,
        }
    }

    /// Queue several actions in iteration order.
    pub fn from_actions(iter: impl IntoIterator<Item = A>) -> Self {
        Self {
            actions: iter.into_iter().collect(),
            needs_render: false,
        }
    }

    /// Also redraw.
    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }
}

impl<A> Default for EventOutcome<A> {
    fn default() -> Self {
        Self::ignored()
    }
}

impl<A> From<Option<A>> for EventOutcome<A> {
    fn from(action: Option<A>) -> Self {
        match action {
            Some(action) => Self::action(action),
            None => Self::ignored(),
        }
    }
}

/// The store operations the loop needs, with or without middleware.
pub trait EffectStoreLike<S, A: Action, E> {
    /// Reduce one action.
    fn dispatch(&mut self, action: A) -> DispatchResult<E>;
    /// State after the last dispatch.
    fn state(&self) -> &S;
    /// Subscribe to state published after changing dispatches.
    fn observe(&mut self) -> StateObserver<S>;
}

impl<S: Clone + 'static, A: Action, E> EffectStoreLike<S, A, E> for EffectStore<S, A, E> {
    fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        EffectStore::dispatch(self, action)
    }

    fn state(&self) -> &S {
        EffectStore::state(self)
    }

    fn observe(&mut self) -> StateObserver<S> {
        EffectStore::observe(self)
    }
}

impl<S: Clone + 'static, A: Action, E, M: Middleware<A>> EffectStoreLike<S, A, E>
    for EffectStoreWithMiddleware<S, A, E, M>
{
    fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        EffectStoreWithMiddleware::dispatch(self, action)
    }

    fn state(&self) -> &S {
        EffectStoreWithMiddleware::state(self)
    }

    fn observe(&mut self) -> StateObserver<S> {
        EffectStoreWithMiddleware::observe(self)
    }
}

/// What an effect handler may touch: the action queue and the task manager.
pub struct EffectContext<'a, A: Action> {
    action_tx: &'a mpsc::UnboundedSender<A>,
    tasks: &'a mut TaskManager<A>,
}

impl<'a, A: Action> EffectContext<'a, A> {
    /// Queue an action without going through a task.
    pub fn emit(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    /// Start or replace keyed fetch tasks.
    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        self.tasks
    }
}

/// Drives the store from terminal events and finished tasks, and redraws
/// after every change.
pub struct EffectRuntime<S, A: Action, E, St: EffectStoreLike<S, A, E> = EffectStore<S, A, E>> {
    store: St,
    action_tx: mpsc::UnboundedSender<A>,
    action_rx: mpsc::UnboundedReceiver<A>,
    poller_config: PollerConfig,
    should_render: bool,
    tasks: TaskManager<A>,
    _types: PhantomData<fn() -> (S, E)>,
}

impl<S: Clone + 'static, A: Action, E> EffectRuntime<S, A, E, EffectStore<S, A, E>> {
    /// Start with `state`, reduced by `reducer`.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self::from_store(EffectStore::new(state, reducer))
    }
}

impl<S: 'static, A: Action, E, St: EffectStoreLike<S, A, E>> EffectRuntime<S, A, E, St> {
    /// Wrap a store that is already built, e.g. one with logging middleware.
    pub fn from_store(store: St) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let tasks = TaskManager::new(action_tx.clone());

        Self {
            store,
            action_tx,
            action_rx,
            poller_config: PollerConfig::default(),
            should_render: true,
            tasks,
            _types: PhantomData,
        }
    }

    /// Override the default poll timing.
    pub fn with_event_poller(mut self, config: PollerConfig) -> Self {
        self.poller_config = config;
        self
    }

    /// Queue an action before or during the loop, e.g. the initial route.
    pub fn enqueue(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    /// Handle for views and services to queue actions.
    pub fn dispatcher(&self) -> Dispatcher<A> {
        Dispatcher::new(self.action_tx.clone())
    }

    /// See [`EffectStoreLike::observe`].
    pub fn observe(&mut self) -> StateObserver<S> {
        self.store.observe()
    }

    /// Current store state.
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Loop until `should_quit` returns true for a queued action.
    ///
    /// On exit the poller is cancelled and every running fetch is aborted.
    pub async fn run<B, FRender, FEvent, FQuit, FEffect>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
        mut should_quit: FQuit,
        mut handle_effect: FEffect,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &S),
        FEvent: FnMut(&EventKind, &S) -> EventOutcome<A>,
        FQuit: FnMut(&A) -> bool,
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let cancel_token = CancellationToken::new();
        let _handle = spawn_event_poller(
            event_tx,
            self.poller_config.poll_timeout,
            self.poller_config.loop_sleep,
            cancel_token.clone(),
        );

        loop {
            if self.should_render {
                let state = self.store.state();
                terminal.draw(|frame| render(frame, frame.area(), state))?;
                self.should_render = false;
            }

            tokio::select! {
                Some(raw_event) = event_rx.recv() => {
                    let event = process_raw_event(raw_event);
                    let outcome = map_event(&event, self.store.state());
                    if outcome.needs_render {
                        self.should_render = true;
                    }
                    for action in outcome.actions {
                        let _ = self.action_tx.send(action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if should_quit(&action) {
                        break;
                    }

                    let result = self.store.dispatch(action);
                    if result.has_effects() {
                        let mut ctx = EffectContext {
                            action_tx: &self.action_tx,
                            tasks: &mut self.tasks,
                        };
                        for effect in result.effects {
                            handle_effect(effect, &mut ctx);
                        }
                    }
                    self.should_render |= result.changed;
                }

                else => {
                    break;
                }
            }
        }

        cancel_token.cancel();
        self.tasks.cancel_all();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Go,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            "Go"
        }
    }

    #[test]
    fn test_event_outcome_builders() {
        let outcome: EventOutcome<TestAction> = EventOutcome::ignored();
        assert!(outcome.actions.is_empty());
        assert!(!outcome.needs_render);

        let outcome = EventOutcome::action(TestAction::Go).with_render();
        assert_eq!(outcome.actions, vec![TestAction::Go]);
        assert!(outcome.needs_render);

        let outcome: EventOutcome<TestAction> = None.into();
        assert_eq!(outcome, EventOutcome::ignored());

        let outcome = EventOutcome::from_actions(vec![TestAction::Go, TestAction::Go]);
        assert_eq!(outcome.actions.len(), 2);
    }

    #[test]
    fn test_dispatcher_feeds_queue() {
        #[derive(Clone, Default)]
        struct Count(u32);

        fn reducer(state: &mut Count, _action: TestAction) -> DispatchResult<()> {
            state.0 += 1;
            DispatchResult::changed()
        }

        let mut runtime = EffectRuntime::new(Count::default(), reducer);
        runtime.dispatcher().dispatch(TestAction::Go);
        assert_eq!(runtime.action_rx.try_recv().ok(), Some(TestAction::Go));
    }
}
