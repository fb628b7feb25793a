//! Change notification for store state
//!
//! A store that has been asked to [`observe`](crate::EffectStore::observe)
//! publishes a snapshot of its state after every dispatch that reports a
//! change. Consumers never hold the store itself: they hold a
//! [`StateObserver`] and carve out the slices they care about with
//! [`StateObserver::select`].
//!
//! ```ignore
//! let observer = store.observe();
//! let mut errors = observer.select(|s: &AppState| s.error.clone());
//!
//! store.dispatch(Action::ErrorSet("boom".into()));
//!
//! assert_eq!(errors.poll(), Some(ErrorState::with("boom")));
//! assert_eq!(errors.poll(), None); // already seen
//! ```
//!
//! Dropping a [`Selection`] is the unsubscribe.

use tokio::sync::watch;

/// Read-only handle onto the published state of a store.
///
/// Cheap to clone; every clone sees the same stream of snapshots.
pub struct StateObserver<S> {
    rx: watch::Receiver<S>,
}

impl<S> Clone for StateObserver<S> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
        }
    }
}

impl<S> StateObserver<S> {
    pub(crate) fn new(rx: watch::Receiver<S>) -> Self {
        Self { rx }
    }

    /// Run `f` against the most recently published snapshot.
    pub fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.rx.borrow())
    }

    /// Subscribe to one slice of the state.
    ///
    /// The slice value at subscription time counts as already seen, so the
    /// first [`Selection::poll`] only reports changes made afterwards.
    pub fn select<T>(&self, selector: fn(&S) -> T) -> Selection<S, T>
    where
        T: Clone + PartialEq,
    {
        let mut rx = self.rx.clone();
        let last = selector(&rx.borrow_and_update());
        Selection { rx, selector, last }
    }
}

/// A subscription to a single slice of store state.
pub struct Selection<S, T> {
    rx: watch::Receiver<S>,
    selector: fn(&S) -> T,
    last: T,
}

impl<S, T> Selection<S, T>
where
    T: Clone + PartialEq,
{
    /// The last value this selection has seen.
    pub fn current(&self) -> &T {
        &self.last
    }

    /// Return the new slice value if it changed since the previous poll.
    ///
    /// Snapshots that leave the slice untouched are consumed silently.
    /// Returns `None` once the store has gone away.
    pub fn poll(&mut self) -> Option<T> {
        match self.rx.has_changed() {
            Ok(true) => {}
            Ok(false) | Err(_) => return None,
        }
        let next = (self.selector)(&self.rx.borrow_and_update());
        self.accept(next)
    }

    /// Wait until the slice changes.
    ///
    /// Returns `None` when the store is dropped.
    pub async fn changed(&mut self) -> Option<T> {
        loop {
            if self.rx.changed().await.is_err() {
                return None;
            }
            let next = (self.selector)(&self.rx.borrow_and_update());
            if let Some(value) = self.accept(next) {
                return Some(value);
            }
        }
    }

    fn accept(&mut self, next: T) -> Option<T> {
        if next == self.last {
            return None;
        }
        self.last = next.clone();
        Some(next)
    }
}
