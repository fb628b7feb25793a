//! Application state shared by every view
//!
//! Only the reducer mutates `AppState`. Views read it through props or
//! through a `Selection` taken from the store's observer.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Measurement system requested from the weather service
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Value of the `units` query parameter
    pub fn as_query(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn speed_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }

    pub fn format_temperature(&self, value: f64) -> String {
        format!("{:.1}{}", value, self.temperature_symbol())
    }
}

impl std::str::FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            other => Err(format!("unknown units '{other}', expected metric or imperial")),
        }
    }
}

/// Top-level screens, addressed by path
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Route {
    #[default]
    Search,
    Weather,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Search => "/",
            Route::Weather => "/weather",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A validated search term
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchTerm {
    City(String),
    Zip(String),
}

impl SearchTerm {
    pub fn text(&self) -> &str {
        match self {
            SearchTerm::City(text) | SearchTerm::Zip(text) => text,
        }
    }
}

/// Current conditions or the next 24 hours
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ForecastMode {
    #[default]
    Current,
    Forecast,
}

impl ForecastMode {
    /// Label shown next to the mode toggle
    pub fn label(&self) -> &'static str {
        match self {
            ForecastMode::Current => "Current Weather",
            ForecastMode::Forecast => "24 Hour Forecast",
        }
    }
}

/// One of the four fetch operations, as data
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeatherQuery {
    pub mode: ForecastMode,
    pub term: SearchTerm,
}

impl WeatherQuery {
    pub fn current(term: SearchTerm) -> Self {
        Self {
            mode: ForecastMode::Current,
            term,
        }
    }

    pub fn forecast(term: SearchTerm) -> Self {
        Self {
            mode: ForecastMode::Forecast,
            term,
        }
    }
}

/// Conditions at a single point in time
#[derive(Clone, Debug, PartialEq)]
pub struct Conditions {
    pub at: DateTime<Utc>,
    pub description: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub wind_speed: f64,
}

/// One 3-hour forecast slot
#[derive(Clone, Debug, PartialEq)]
pub struct ForecastEntry {
    pub conditions: Conditions,
    /// Probability of precipitation, 0.0..=1.0
    pub precipitation_chance: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outlook {
    Current(Conditions),
    Forecast(Vec<ForecastEntry>),
}

/// Weather payload as delivered by the fetch collaborator
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherReport {
    pub location: String,
    pub country: Option<String>,
    pub units: Units,
    pub outlook: Outlook,
}

impl WeatherReport {
    /// "Chicago, US" or just "Chicago"
    pub fn display_location(&self) -> String {
        match self.country.as_deref().filter(|c| !c.trim().is_empty()) {
            Some(country) => format!("{}, {}", self.location, country),
            None => self.location.clone(),
        }
    }

    /// True when there is nothing worth showing
    pub fn is_empty(&self) -> bool {
        if self.location.trim().is_empty() {
            return true;
        }
        match &self.outlook {
            Outlook::Current(conditions) => conditions.description.trim().is_empty(),
            Outlook::Forecast(entries) => entries.is_empty(),
        }
    }
}

/// Emptiness predicate applied by the result view on mount
pub fn is_weather_result_empty(report: Option<&WeatherReport>) -> bool {
    report.map_or(true, WeatherReport::is_empty)
}

/// Shared error slot
///
/// `revision` moves on every `set`, so setting the same message twice is
/// still observed as a change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorState {
    pub message: Option<String>,
    pub revision: u64,
}

impl ErrorState {
    pub fn set(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.revision = self.revision.wrapping_add(1);
    }

    /// Returns whether anything was cleared
    pub fn clear(&mut self) -> bool {
        if self.message.is_none() {
            return false;
        }
        self.message = None;
        self.revision = self.revision.wrapping_add(1);
        true
    }

    /// The message, if one is set and non-blank
    pub fn active(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub route: Route,

    /// Last accepted weather payload
    pub weather: Option<WeatherReport>,

    pub error: ErrorState,

    /// Sequence number of the newest fetch; older results are discarded
    pub request_seq: u64,
}
