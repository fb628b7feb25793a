//! WeatherView: look up current conditions or a 24 hour forecast by city
//! name or zip code, in the terminal.
//!
//! Exposed as a library so the integration tests can drive the views,
//! the reducer and the client decoders directly.

pub mod action;
pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod effect;
pub mod error;
pub mod keymap;
pub mod logging;
pub mod presenter;
pub mod reducer;
pub mod search;
pub mod services;
pub mod state;

pub use action::Action;
pub use effect::Effect;
pub use reducer::reducer;
pub use state::AppState;
