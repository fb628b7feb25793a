//! Reducer: `(state, action) -> DispatchResult<Effect>`
//!
//! All state transitions live here. Async work is requested by returning an
//! effect; results come back as `WeatherDid*` actions tagged with the request
//! sequence number they answer.

use weatherview_core::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, Route};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Weather =====
        Action::WeatherFetch(query) => {
            state.request_seq += 1;
            let seq = state.request_seq;
            tracing::info!(seq, term = %query.term.text(), mode = ?query.mode, "Fetching weather");
            DispatchResult::changed_with(Effect::FetchWeather { query, seq })
        }

        Action::WeatherDidLoad { seq, report } => {
            if seq != state.request_seq {
                tracing::debug!(seq, current = state.request_seq, "Discarding stale weather result");
                return DispatchResult::unchanged();
            }
            tracing::info!(seq, location = %report.location, "Weather loaded");
            state.weather = Some(report);
            state.route = Route::Weather;
            DispatchResult::changed()
        }

        Action::WeatherDidError { seq, message } => {
            if seq != state.request_seq {
                tracing::debug!(seq, current = state.request_seq, "Discarding stale weather error");
                return DispatchResult::unchanged();
            }
            tracing::warn!(seq, error = %message, "Weather fetch failed");
            state.error.set(message);
            DispatchResult::changed()
        }

        // ===== Error slot =====
        Action::ErrorSet(message) => {
            state.error.set(message);
            DispatchResult::changed()
        }

        Action::ErrorClear => {
            if state.error.clear() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Navigation =====
        Action::NavigateTo(route) => {
            if state.route == route {
                return DispatchResult::unchanged();
            }
            tracing::info!(from = %state.route, to = %route, "Navigating");
            state.route = route;
            DispatchResult::changed()
        }

        // Handled by the runtime loop
        Action::Quit => DispatchResult::unchanged(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Conditions, Outlook, SearchTerm, Units, WeatherQuery, WeatherReport};

    fn chicago() -> WeatherReport {
        WeatherReport {
            location: "Chicago".into(),
            country: Some("US".into()),
            units: Units::Metric,
            outlook: Outlook::Current(Conditions {
                at: Default::default(),
                description: "few clouds".into(),
                temperature: 12.0,
                feels_like: 10.5,
                humidity: 60,
                wind_speed: 4.1,
            }),
        }
    }

    fn fetch(state: &mut AppState, city: &str) -> u64 {
        let query = WeatherQuery::current(SearchTerm::City(city.into()));
        let result = reducer(state, Action::WeatherFetch(query.clone()));
        assert!(result.changed);
        match result.effects.as_slice() {
            [Effect::FetchWeather { query: q, seq }] => {
                assert_eq!(q, &query);
                *seq
            }
            other => panic!("expected one fetch effect, got {:?}", other),
        }
    }

    #[test]
    fn test_fetch_assigns_increasing_sequence() {
        let mut state = AppState::default();
        assert_eq!(fetch(&mut state, "Chicago"), 1);
        assert_eq!(fetch(&mut state, "Boston"), 2);
        assert_eq!(state.request_seq, 2);
    }

    #[test]
    fn test_load_routes_to_weather() {
        let mut state = AppState::default();
        let seq = fetch(&mut state, "Chicago");

        let result = reducer(&mut state, Action::WeatherDidLoad { seq, report: chicago() });

        assert!(result.changed);
        assert_eq!(state.route, Route::Weather);
        assert_eq!(state.weather, Some(chicago()));
        assert_eq!(state.request_seq, seq);
    }

    #[test]
    fn test_stale_results_are_discarded() {
        let mut state = AppState::default();
        let old = fetch(&mut state, "Chicago");
        let _new = fetch(&mut state, "Boston");

        let result = reducer(&mut state, Action::WeatherDidLoad { seq: old, report: chicago() });
        assert!(!result.changed);
        assert_eq!(state.weather, None);
        assert_eq!(state.route, Route::Search);

        let result = reducer(
            &mut state,
            Action::WeatherDidError { seq: old, message: "late".into() },
        );
        assert!(!result.changed);
        assert_eq!(state.error.message, None);
        assert_eq!(state.request_seq, 2);
    }

    #[test]
    fn test_error_result_sets_error() {
        let mut state = AppState::default();
        let seq = fetch(&mut state, "Atlantis");

        reducer(
            &mut state,
            Action::WeatherDidError { seq, message: "Location not found: Atlantis".into() },
        );

        assert_eq!(state.error.active(), Some("Location not found: Atlantis"));
        assert_eq!(state.route, Route::Search);
        assert_eq!(state.weather, None);
    }

    #[test]
    fn test_error_clear_only_changes_when_set() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::ErrorClear).changed);

        assert!(reducer(&mut state, Action::ErrorSet("bad".into())).changed);
        assert!(reducer(&mut state, Action::ErrorClear).changed);
        assert_eq!(state.error.message, None);
    }

    #[test]
    fn test_navigate_leaves_weather_alone() {
        let mut state = AppState {
            route: Route::Weather,
            weather: Some(chicago()),
            ..Default::default()
        };

        assert!(reducer(&mut state, Action::NavigateTo(Route::Search)).changed);
        assert!(!reducer(&mut state, Action::NavigateTo(Route::Search)).changed);
        assert_eq!(state.route, Route::Search);
        assert_eq!(state.weather, Some(chicago()));
    }
}
