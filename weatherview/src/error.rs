use std::path::PathBuf;

use thiserror::Error;

/// Failure talking to the weather service
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Location not found: {0}")]
    NotFound(String),

    #[error("Invalid API key")]
    Unauthorized,

    #[error("Weather service returned {0}")]
    Status(reqwest::StatusCode),

    #[error("Weather request timed out")]
    Timeout,

    #[error("Weather request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected weather data: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failure loading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("no OpenWeatherMap API key; set api_key in {path}, pass --api-key, or export OPENWEATHER_API_KEY")]
    MissingApiKey { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_messages() {
        assert_eq!(
            FetchError::NotFound("Atlantis".into()).to_string(),
            "Location not found: Atlantis"
        );
        assert_eq!(FetchError::Unauthorized.to_string(), "Invalid API key");
        assert_eq!(
            FetchError::Status(reqwest::StatusCode::BAD_GATEWAY).to_string(),
            "Weather service returned 502 Bad Gateway"
        );
    }
}
