//! Search coordination: validate the search term, pick the fetch
//! operation, and track whether a submission is in flight.

use once_cell::sync::Lazy;
use regex::Regex;
use weatherview_core::{Selection, StateObserver};

use crate::services::{ErrorReporter, WeatherFetcher};
use crate::state::{AppState, ErrorState, ForecastMode, SearchTerm, WeatherQuery};

/// Shown whenever a search term is rejected locally
pub const INVALID_SEARCH_MESSAGE: &str = "Enter a valid City or Zip";

/// Exclusive bounds, in characters, checked by the search button
const MIN_LEN: usize = 2;
const MAX_LEN: usize = 50;

static CITY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{L}+(?: \p{L}+)*$").expect("city pattern compiles"));

static ZIP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{5}$").expect("zip pattern compiles"));

/// City first, then zip. `None` means the text is neither.
pub fn classify(text: &str) -> Option<SearchTerm> {
    if CITY_PATTERN.is_match(text) {
        Some(SearchTerm::City(text.to_string()))
    } else if ZIP_PATTERN.is_match(text) {
        Some(SearchTerm::Zip(text.to_string()))
    } else {
        None
    }
}

/// Transient state owned by one mounted search view
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchState {
    pub raw_text: String,
    pub is_forecast_mode: bool,
    pub is_submitting: bool,
}

impl SearchState {
    pub fn mode(&self) -> ForecastMode {
        if self.is_forecast_mode {
            ForecastMode::Forecast
        } else {
            ForecastMode::Current
        }
    }
}

/// What a submission attempt did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Dispatched(WeatherQuery),
    Rejected,
}

pub struct SearchCoordinator<H> {
    state: SearchState,
    handle: H,
    errors: Selection<AppState, ErrorState>,
}

impl<H> SearchCoordinator<H>
where
    H: WeatherFetcher + ErrorReporter,
{
    /// Mount a coordinator. The error subscription lives as long as it does.
    pub fn new(handle: H, observer: &StateObserver<AppState>) -> Self {
        Self {
            state: SearchState::default(),
            handle,
            errors: observer.select(|s| s.error.clone()),
        }
    }

    /// Start in forecast mode
    pub fn with_forecast_mode(mut self, forecast: bool) -> Self {
        self.state.is_forecast_mode = forecast;
        self
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Store the text as typed; validation happens on submit
    pub fn update_search_text(&mut self, text: impl Into<String>) {
        self.state.raw_text = text.into();
    }

    /// Enter in the search field. No length check.
    pub fn press_enter(&mut self) -> Submission {
        self.state.is_submitting = true;
        self.classify_and_dispatch()
    }

    /// The search button. Rejects text outside the length bounds.
    pub fn click_search(&mut self) -> Submission {
        let len = self.state.raw_text.chars().count();
        if len <= MIN_LEN || len >= MAX_LEN {
            tracing::debug!(len, "Search text length out of bounds");
            self.handle.set_error(INVALID_SEARCH_MESSAGE);
            return Submission::Rejected;
        }
        self.state.is_submitting = true;
        self.classify_and_dispatch()
    }

    pub fn toggle_forecast_mode(&mut self) {
        self.state.is_forecast_mode = !self.state.is_forecast_mode;
        self.handle.clear_error();
    }

    /// Apply pending error notifications. Returns whether local state changed.
    pub fn sync(&mut self) -> bool {
        let Some(error) = self.errors.poll() else {
            return false;
        };
        if error.active().is_some() && self.state.is_submitting {
            self.state.is_submitting = false;
            return true;
        }
        false
    }

    fn classify_and_dispatch(&mut self) -> Submission {
        let Some(term) = classify(&self.state.raw_text) else {
            tracing::debug!(text = %self.state.raw_text, "Search text is neither city nor zip");
            self.handle.set_error(INVALID_SEARCH_MESSAGE);
            return Submission::Rejected;
        };

        match (&term, self.state.mode()) {
            (SearchTerm::City(city), ForecastMode::Current) => {
                self.handle.fetch_current_by_city(city)
            }
            (SearchTerm::Zip(zip), ForecastMode::Current) => self.handle.fetch_current_by_zip(zip),
            (SearchTerm::City(city), ForecastMode::Forecast) => {
                self.handle.fetch_forecast_by_city(city)
            }
            (SearchTerm::Zip(zip), ForecastMode::Forecast) => {
                self.handle.fetch_forecast_by_zip(zip)
            }
        }
        self.handle.clear_error();

        Submission::Dispatched(WeatherQuery {
            mode: self.state.mode(),
            term,
        })
    }
}
