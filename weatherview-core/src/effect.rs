//! Effect-based state management
//!
//! Reducers here return [`DispatchResult<E>`] instead of a plain `bool`:
//! alongside the "state changed" flag they hand back declarative effects
//! (fetch this, cancel that) for the runtime to carry out. The reducer stays
//! a pure function of state and action.
//!
//! ```ignore
//! fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
//!     match action {
//!         Action::WeatherFetch(query) => {
//!             state.request_seq += 1;
//!             DispatchResult::changed_with(Effect::FetchWeather {
//!                 query,
//!                 seq: state.request_seq,
//!             })
//!         }
//!         Action::WeatherDidLoad { seq, report } if seq == state.request_seq => {
//!             state.weather = Some(report);
//!             DispatchResult::changed()
//!         }
//!         _ => DispatchResult::unchanged(),
//!     }
//! }
//! ```

use std::marker::PhantomData;

use tokio::sync::watch;

use crate::action::Action;
use crate::observe::StateObserver;
use crate::store::Middleware;

/// Result of dispatching an action to an effect-aware store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    /// Whether the state was modified by this action.
    pub changed: bool,
    /// Effects to be processed after dispatch.
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    /// No state change and no effects.
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    /// State changed, no effects.
    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// A single effect without a state change.
    #[inline]
    pub fn effect(effect: E) -> Self {
        Self {
            changed: false,
            effects: vec![effect],
        }
    }

    /// State changed, with a single effect.
    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    /// Add an effect to this result.
    #[inline]
    pub fn with(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    /// Returns true if there are any effects to process.
    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// A reducer function that can emit effects.
pub type EffectReducer<S, A, E> = fn(&mut S, A) -> DispatchResult<E>;

type Publish<S> = Box<dyn Fn(&S)>;

/// A store whose reducer may emit effects.
///
/// Call [`observe`](Self::observe) to have the store publish its state to
/// subscribers after every changing dispatch.
pub struct EffectStore<S, A, E> {
    state: S,
    reducer: EffectReducer<S, A, E>,
    publish: Option<Publish<S>>,
    observer: Option<StateObserver<S>>,
    _marker: PhantomData<(A, E)>,
}

impl<S, A, E> EffectStore<S, A, E>
where
    A: Action,
{
    /// Create a new effect store with the given initial state and reducer.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self {
            state,
            reducer,
            publish: None,
            observer: None,
            _marker: PhantomData,
        }
    }

    /// Get a reference to the current state.
    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Get a mutable reference to the state.
    ///
    /// Changes made through this reference are not published to observers.
    #[inline]
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Start publishing state snapshots and return a handle onto them.
    ///
    /// Calling this again returns another handle onto the same stream.
    pub fn observe(&mut self) -> StateObserver<S>
    where
        S: Clone + 'static,
    {
        if let Some(observer) = &self.observer {
            return observer.clone();
        }

        let (tx, rx) = watch::channel(self.state.clone());
        self.publish = Some(Box::new(move |state: &S| {
            tx.send_replace(state.clone());
        }));
        let observer = StateObserver::new(rx);
        self.observer = Some(observer.clone());
        observer
    }

    /// Dispatch an action to the store.
    ///
    /// Observers are notified when the reducer reports a change.
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        let result = (self.reducer)(&mut self.state, action);
        if result.changed {
            if let Some(publish) = &self.publish {
                publish(&self.state);
            }
        }
        result
    }
}

/// An effect store with middleware support.
///
/// The middleware receives action references and the state change
/// indicator, but not the effects.
pub struct EffectStoreWithMiddleware<S, A, E, M>
where
    A: Action,
    M: Middleware<A>,
{
    store: EffectStore<S, A, E>,
    middleware: M,
}

impl<S, A, E, M> EffectStoreWithMiddleware<S, A, E, M>
where
    A: Action,
    M: Middleware<A>,
{
    /// Create a new effect store with middleware.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>, middleware: M) -> Self {
        Self {
            store: EffectStore::new(state, reducer),
            middleware,
        }
    }

    /// Get a reference to the current state.
    #[inline]
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Get a reference to the middleware.
    #[inline]
    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    /// See [`EffectStore::observe`].
    pub fn observe(&mut self) -> StateObserver<S>
    where
        S: Clone + 'static,
    {
        self.store.observe()
    }

    /// Dispatch an action through middleware and store.
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        self.middleware.before(&action);
        let result = self.store.dispatch(action.clone());
        self.middleware.after(&action, result.changed);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    enum TestAction {
        Increment,
        NoOp,
        Save,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Increment => "Increment",
                TestAction::NoOp => "NoOp",
                TestAction::Save => "Save",
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum TestEffect {
        Persist(i32),
    }

    #[derive(Clone, Default)]
    struct TestState {
        count: i32,
    }

    fn test_reducer(state: &mut TestState, action: TestAction) -> DispatchResult<TestEffect> {
        match action {
            TestAction::Increment => {
                state.count += 1;
                DispatchResult::changed()
            }
            TestAction::NoOp => DispatchResult::unchanged(),
            TestAction::Save => DispatchResult::effect(TestEffect::Persist(state.count)),
        }
    }

    #[test]
    fn test_dispatch_result_builders() {
        let r: DispatchResult<TestEffect> = DispatchResult::unchanged();
        assert!(!r.changed);
        assert!(!r.has_effects());

        let r = DispatchResult::changed_with(TestEffect::Persist(1));
        assert!(r.changed);
        assert_eq!(r.effects, vec![TestEffect::Persist(1)]);

        let r: DispatchResult<TestEffect> =
            DispatchResult::changed().with(TestEffect::Persist(2));
        assert!(r.changed);
        assert!(r.has_effects());
    }

    #[test]
    fn test_effect_store_dispatch() {
        let mut store = EffectStore::new(TestState::default(), test_reducer);

        let result = store.dispatch(TestAction::Increment);
        assert!(result.changed);
        assert_eq!(store.state().count, 1);

        let result = store.dispatch(TestAction::Save);
        assert!(!result.changed);
        assert_eq!(result.effects, vec![TestEffect::Persist(1)]);
    }

    #[test]
    fn test_observers_see_changes_only() {
        let mut store = EffectStore::new(TestState::default(), test_reducer);
        let observer = store.observe();
        let mut counts = observer.select(|s: &TestState| s.count);

        store.dispatch(TestAction::NoOp);
        assert_eq!(counts.poll(), None);

        store.dispatch(TestAction::Increment);
        assert_eq!(counts.poll(), Some(1));
    }

    #[test]
    fn test_observe_twice_shares_stream() {
        let mut store = EffectStore::new(TestState::default(), test_reducer);
        let first = store.observe();
        let second = store.observe();

        store.dispatch(TestAction::Increment);
        assert_eq!(first.with(|s| s.count), 1);
        assert_eq!(second.with(|s| s.count), 1);
    }

    #[test]
    fn test_state_mut_is_not_published() {
        let mut store = EffectStore::new(TestState::default(), test_reducer);
        let observer = store.observe();

        store.state_mut().count = 100;
        assert_eq!(store.state().count, 100);
        assert_eq!(observer.with(|s| s.count), 0);
    }

    #[derive(Default)]
    struct CountingMiddleware {
        before: usize,
        changed: usize,
    }

    impl Middleware<TestAction> for CountingMiddleware {
        fn before(&mut self, _action: &TestAction) {
            self.before += 1;
        }

        fn after(&mut self, _action: &TestAction, state_changed: bool) {
            if state_changed {
                self.changed += 1;
            }
        }
    }

    #[test]
    fn test_store_with_middleware() {
        let mut store = EffectStoreWithMiddleware::new(
            TestState::default(),
            test_reducer,
            CountingMiddleware::default(),
        );

        store.dispatch(TestAction::Increment);
        store.dispatch(TestAction::NoOp);

        assert_eq!(store.middleware().before, 2);
        assert_eq!(store.middleware().changed, 1);
        assert_eq!(store.state().count, 1);
    }
}
