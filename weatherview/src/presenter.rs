//! Result presentation: show the weather payload, or send the user back to
//! search when there is nothing to show.

use weatherview_core::{Selection, StateObserver};

use crate::services::Navigator;
use crate::state::{is_weather_result_empty, AppState, Route, WeatherReport};

pub struct ResultPresenter<N> {
    navigator: N,
    weather: Selection<AppState, Option<WeatherReport>>,
    redirected: bool,
}

impl<N: Navigator> ResultPresenter<N> {
    pub fn new(navigator: N, observer: &StateObserver<AppState>) -> Self {
        Self {
            navigator,
            weather: observer.select(|s| s.weather.clone()),
            redirected: false,
        }
    }

    /// Called on mount. Redirects to search at most once per presenter.
    ///
    /// Returns whether a redirect was issued.
    pub fn activate(&mut self) -> bool {
        self.weather.poll();
        if self.redirected || !self.is_empty() {
            return false;
        }
        tracing::info!("No weather to show, returning to search");
        self.redirected = true;
        self.navigator.go_to(Route::Search);
        true
    }

    /// Pick up payload changes. Returns whether the payload changed.
    pub fn sync(&mut self) -> bool {
        self.weather.poll().is_some()
    }

    pub fn is_empty(&self) -> bool {
        is_weather_result_empty(self.weather.current().as_ref())
    }

    /// The payload to render, if there is one worth rendering
    pub fn report(&self) -> Option<&WeatherReport> {
        self.weather.current().as_ref().filter(|r| !r.is_empty())
    }

    pub fn back_to_search(&self) {
        self.navigator.go_to(Route::Search);
    }
}
