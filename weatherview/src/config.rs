//! Configuration file handling
//!
//! Looked up at `<config dir>/weatherview/config.toml`. A missing file means
//! defaults; CLI flags and `OPENWEATHER_API_KEY` override what the file says.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use weatherview_core::Keybindings;

use crate::error::ConfigError;
use crate::keymap::Screen;
use crate::state::Units;

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub units: Units,
    /// Country code appended to zip lookups
    pub country: String,
    pub base_url: String,
    pub timeout_secs: u64,
    /// Start the search view in forecast mode
    pub forecast: bool,
    /// User key bindings, layered over the defaults
    pub keys: Keybindings<Screen>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            units: Units::Metric,
            country: "us".into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout_secs: 10,
            forecast: false,
            keys: Keybindings::new(),
        }
    }
}

impl Config {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("weatherview")
            .join("config.toml")
    }

    /// Load from `path`, or return defaults if the file does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// `OPENWEATHER_API_KEY`, when set, replaces the key from the file
    pub fn with_env(mut self) -> Self {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.api_key = Some(key);
            }
        }
        self
    }

    pub fn require_api_key(&self, path: &Path) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey {
                path: path.to_path_buf(),
            })
    }
}
