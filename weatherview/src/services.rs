//! Collaborator seams for the search and result views
//!
//! Views never reach for a global store: they get a handle implementing
//! these traits at construction. In the running app that handle is the
//! runtime's `Dispatcher<Action>`.

use weatherview_core::Dispatcher;

use crate::action::Action;
use crate::state::{Route, SearchTerm, WeatherQuery};

/// Starts weather fetches. Results land in shared state, not here.
pub trait WeatherFetcher {
    fn fetch(&self, query: WeatherQuery);

    fn fetch_current_by_city(&self, city: &str) {
        self.fetch(WeatherQuery::current(SearchTerm::City(city.to_string())));
    }

    fn fetch_current_by_zip(&self, zip: &str) {
        self.fetch(WeatherQuery::current(SearchTerm::Zip(zip.to_string())));
    }

    fn fetch_forecast_by_city(&self, city: &str) {
        self.fetch(WeatherQuery::forecast(SearchTerm::City(city.to_string())));
    }

    fn fetch_forecast_by_zip(&self, zip: &str) {
        self.fetch(WeatherQuery::forecast(SearchTerm::Zip(zip.to_string())));
    }
}

/// Writes the shared error slot
pub trait ErrorReporter {
    fn set_error(&self, message: &str);
    fn clear_error(&self);
}

pub trait Navigator {
    fn go_to(&self, route: Route);
}

impl WeatherFetcher for Dispatcher<Action> {
    fn fetch(&self, query: WeatherQuery) {
        self.dispatch(Action::WeatherFetch(query));
    }
}

impl ErrorReporter for Dispatcher<Action> {
    fn set_error(&self, message: &str) {
        self.dispatch(Action::ErrorSet(message.to_string()));
    }

    fn clear_error(&self) {
        self.dispatch(Action::ErrorClear);
    }
}

impl Navigator for Dispatcher<Action> {
    fn go_to(&self, route: Route) {
        self.dispatch(Action::NavigateTo(route));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AppState, ForecastMode};
    use weatherview_core::testing::{ActionAssertions, TestHarness};

    #[test]
    fn test_fetch_helpers_build_queries() {
        let mut harness = TestHarness::<AppState, Action>::default();
        let dispatcher = harness.dispatcher();

        dispatcher.fetch_forecast_by_zip("60601");

        harness.drain_emitted().assert_first(Action::WeatherFetch(WeatherQuery {
            mode: ForecastMode::Forecast,
            term: SearchTerm::Zip("60601".into()),
        }));
    }

    #[test]
    fn test_error_and_navigation_dispatch() {
        let mut harness = TestHarness::<AppState, Action>::default();
        let dispatcher = harness.dispatcher();

        dispatcher.set_error("bad");
        dispatcher.clear_error();
        dispatcher.go_to(Route::Search);

        assert_eq!(
            harness.drain_emitted(),
            vec![
                Action::ErrorSet("bad".into()),
                Action::ErrorClear,
                Action::NavigateTo(Route::Search),
            ]
        );
    }
}
