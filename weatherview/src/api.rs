//! OpenWeatherMap client
//!
//! The HTTP call runs inside a task spawned by the effect handler; decoding
//! is split out into plain functions over the response body.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::Config;
use crate::error::FetchError;
use crate::state::{
    Conditions, ForecastEntry, ForecastMode, Outlook, SearchTerm, Units, WeatherQuery,
    WeatherReport,
};

/// 8 slots of 3 hours
const FORECAST_SLOTS: &str = "8";

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    #[serde(default)]
    name: String,
    sys: Option<Sys>,
    dt: i64,
    main: Main,
    #[serde(default)]
    weather: Vec<Summary>,
    wind: Option<Wind>,
}

#[derive(Debug, Deserialize)]
struct Sys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Main {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct Summary {
    description: String,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    city: City,
    #[serde(default)]
    list: Vec<Slot>,
}

#[derive(Debug, Deserialize)]
struct City {
    #[serde(default)]
    name: String,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Slot {
    dt: i64,
    main: Main,
    #[serde(default)]
    weather: Vec<Summary>,
    wind: Option<Wind>,
    #[serde(default)]
    pop: f64,
}

fn conditions(dt: i64, main: Main, weather: Vec<Summary>, wind: Option<Wind>) -> Conditions {
    Conditions {
        at: DateTime::<Utc>::from_timestamp(dt, 0).unwrap_or_default(),
        description: weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .unwrap_or_default(),
        temperature: main.temp,
        feels_like: main.feels_like,
        humidity: main.humidity,
        wind_speed: wind.map_or(0.0, |w| w.speed),
    }
}

/// Decode a `/weather` response body
pub fn parse_current(body: &str, units: Units) -> Result<WeatherReport, FetchError> {
    let data: CurrentResponse = serde_json::from_str(body)?;
    Ok(WeatherReport {
        location: data.name,
        country: data.sys.and_then(|s| s.country),
        units,
        outlook: Outlook::Current(conditions(data.dt, data.main, data.weather, data.wind)),
    })
}

/// Decode a `/forecast` response body
pub fn parse_forecast(body: &str, units: Units) -> Result<WeatherReport, FetchError> {
    let data: ForecastResponse = serde_json::from_str(body)?;
    let entries = data
        .list
        .into_iter()
        .map(|slot| ForecastEntry {
            precipitation_chance: slot.pop,
            conditions: conditions(slot.dt, slot.main, slot.weather, slot.wind),
        })
        .collect();
    Ok(WeatherReport {
        location: data.city.name,
        country: data.city.country,
        units,
        outlook: Outlook::Forecast(entries),
    })
}

// ============================================================================
// Client
// ============================================================================

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    units: Units,
    country: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: &str, config: &Config) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            units: config.units,
            country: config.country.clone(),
        })
    }

    /// Endpoint URL and query parameters for `query`
    pub fn request_for(&self, query: &WeatherQuery) -> (String, Vec<(&'static str, String)>) {
        let endpoint = match query.mode {
            ForecastMode::Current => "weather",
            ForecastMode::Forecast => "forecast",
        };
        let mut params = match &query.term {
            SearchTerm::City(city) => vec![("q", city.clone())],
            SearchTerm::Zip(zip) => vec![("zip", format!("{},{}", zip, self.country))],
        };
        if query.mode == ForecastMode::Forecast {
            params.push(("cnt", FORECAST_SLOTS.to_string()));
        }
        params.push(("units", self.units.as_query().to_string()));
        params.push(("appid", self.api_key.clone()));
        (format!("{}/{}", self.base_url, endpoint), params)
    }

    pub async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherReport, FetchError> {
        let (url, params) = self.request_for(query);
        let response = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(transport_error)?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(FetchError::NotFound(query.term.text().to_string())),
            StatusCode::UNAUTHORIZED => return Err(FetchError::Unauthorized),
            status if !status.is_success() => return Err(FetchError::Status(status)),
            _ => {}
        }

        let body = response.text().await.map_err(transport_error)?;
        match query.mode {
            ForecastMode::Current => parse_current(&body, self.units),
            ForecastMode::Forecast => parse_forecast(&body, self.units),
        }
    }
}

fn transport_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Request(e)
    }
}
