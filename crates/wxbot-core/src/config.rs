use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable holding the geocoding API key.
pub const GEOCODING_API_KEY_VAR: &str = "WXBOT_GEOCODING_API_KEY";
/// Environment variable holding the weather API key.
pub const WEATHER_API_KEY_VAR: &str = "WXBOT_WEATHER_API_KEY";
/// Environment variable overriding the data directory.
pub const DATA_DIR_VAR: &str = "WXBOT_DATA_DIR";

/// Runtime configuration for the bot.
///
/// Credentials are optional here: a missing key is not a configuration error,
/// it just disables the weather command (it replies with nothing at all).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API key for the geocoding service.
    pub geocoding_api_key: Option<String>,

    /// API key for the weather provider.
    pub weather_api_key: Option<String>,

    /// Directory holding the location database.
    pub data_dir: PathBuf,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Creates the data directory if it does not exist yet.
    pub fn load() -> Result<Self, ConfigError> {
        let data_dir = match std::env::var_os(DATA_DIR_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };
        std::fs::create_dir_all(&data_dir)?;

        Ok(Self {
            geocoding_api_key: env_key(GEOCODING_API_KEY_VAR),
            weather_api_key: env_key(WEATHER_API_KEY_VAR),
            data_dir,
        })
    }

    /// Path of the location database file.
    pub fn location_db_path(&self) -> PathBuf {
        self.data_dir.join("locations.db")
    }

    /// True when both external credentials are configured.
    pub fn has_credentials(&self) -> bool {
        self.geocoding_api_key.is_some() && self.weather_api_key.is_some()
    }
}

fn env_key(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

fn default_data_dir() -> Result<PathBuf, ConfigError> {
    dirs::data_dir()
        .map(|d| d.join("wxbot"))
        .ok_or(ConfigError::NoDataDir)
}
