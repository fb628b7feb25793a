//! State management core for the WeatherView terminal app
//!
//! A Redux/Elm-style architecture for ratatui applications:
//!
//! - **Action**: events that describe state changes
//! - **EffectStore**: centralized state container; the reducer returns
//!   declarative effects alongside the "changed" flag
//! - **StateObserver / Selection**: change notification for slices of state
//! - **Dispatcher**: injectable handle for sending actions to the store
//! - **TaskManager**: keyed async tasks whose results come back as actions
//! - **Component**: UI elements that render from props and emit actions
//! - **Keybindings**: context-aware key mapping
//!
//! # Async Handler Pattern
//!
//! Async work uses a two-phase action pattern:
//!
//! 1. **Intent actions** ask for work (`WeatherFetch`); the reducer records
//!    the request and returns an effect.
//! 2. **Result actions** carry the outcome back (`WeatherDidLoad`,
//!    `WeatherDidError`), sent by a task spawned from the effect handler.
//!
//! ```ignore
//! fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
//!     match effect {
//!         Effect::FetchWeather { query, seq } => {
//!             ctx.tasks().spawn("weather", async move {
//!                 match client.fetch(&query).await {
//!                     Ok(report) => Action::WeatherDidLoad { seq, report },
//!                     Err(e) => Action::WeatherDidError { seq, message: e.to_string() },
//!                 }
//!             });
//!         }
//!     }
//! }
//! ```
//!
//! The `Did*` naming convention identifies result actions.

pub mod action;
pub mod bus;
pub mod component;
pub mod dispatch;
pub mod effect;
pub mod event;
pub mod keybindings;
pub mod observe;
pub mod runtime;
pub mod store;
pub mod tasks;
pub mod testing;

pub use action::Action;
pub use component::Component;
pub use dispatch::Dispatcher;
pub use event::EventKind;

pub use keybindings::{format_key_for_display, parse_key_string, BindingContext, Keybindings};

pub use effect::{DispatchResult, EffectReducer, EffectStore, EffectStoreWithMiddleware};
pub use observe::{Selection, StateObserver};
pub use runtime::{EffectContext, EffectRuntime, EffectStoreLike, EventOutcome, PollerConfig};
pub use store::{LoggingMiddleware, Middleware, NoopMiddleware};
pub use tasks::{TaskKey, TaskManager};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::component::Component;
    pub use crate::dispatch::Dispatcher;
    pub use crate::effect::{DispatchResult, EffectStore, EffectStoreWithMiddleware};
    pub use crate::event::EventKind;
    pub use crate::keybindings::{BindingContext, Keybindings};
    pub use crate::observe::{Selection, StateObserver};
    pub use crate::runtime::{EffectContext, EffectRuntime, EventOutcome};
    pub use crate::store::{LoggingMiddleware, Middleware};
    pub use crate::tasks::{TaskKey, TaskManager};
}
