//! Actions
//!
//! Naming follows the intent/result convention: `WeatherFetch` asks for
//! work, `WeatherDid*` carries the outcome back from the spawned task.

use crate::state::{Route, WeatherQuery, WeatherReport};

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== Weather =====
    /// Intent: fetch weather for a validated query
    WeatherFetch(WeatherQuery),

    /// Result: payload for request `seq`
    WeatherDidLoad { seq: u64, report: WeatherReport },

    /// Result: request `seq` failed
    WeatherDidError { seq: u64, message: String },

    // ===== Error slot =====
    ErrorSet(String),
    ErrorClear,

    // ===== Navigation =====
    NavigateTo(Route),

    Quit,
}

impl weatherview_core::Action for Action {
    fn name(&self) -> &'static str {
        match self {
            Action::WeatherFetch(_) => "WeatherFetch",
            Action::WeatherDidLoad { .. } => "WeatherDidLoad",
            Action::WeatherDidError { .. } => "WeatherDidError",
            Action::ErrorSet(_) => "ErrorSet",
            Action::ErrorClear => "ErrorClear",
            Action::NavigateTo(_) => "NavigateTo",
            Action::Quit => "Quit",
        }
    }

    fn summary(&self) -> String {
        match self {
            // Payloads are large; the location is enough for the log
            Action::WeatherDidLoad { seq, report } => {
                format!(
                    "WeatherDidLoad {{ seq: {}, location: {:?} }}",
                    seq, report.location
                )
            }
            Action::WeatherDidError { seq, message } => {
                let msg = if message.chars().count() > 60 {
                    format!("{}...", message.chars().take(57).collect::<String>())
                } else {
                    message.clone()
                };
                format!("WeatherDidError {{ seq: {}, message: {:?} }}", seq, msg)
            }
            _ => format!("{:?}", self),
        }
    }
}
