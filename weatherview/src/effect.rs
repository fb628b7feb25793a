//! Side effects declared by the reducer

use crate::state::WeatherQuery;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch weather for `query`; the result is tagged with `seq`
    FetchWeather { query: WeatherQuery, seq: u64 },
}
