use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::error::ConfigError;

/// Environment variable holding the OpenWeather API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_HISTORY_FILE: &str = "weather_history.json";

/// Optional, non-secret settings stored on disk.
///
/// Example TOML:
/// ```toml
/// timeout_secs = 5
/// history_file = "/home/me/.weather_history.json"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub history_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            history_file: PathBuf::from(DEFAULT_HISTORY_FILE),
        }
    }
}

impl Settings {
    /// Load settings from the platform config directory, or defaults if
    /// there is no settings file yet.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::settings_file_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let settings: Self =
            toml::from_str(&contents).map_err(|source| ConfigError::InvalidSettings {
                path: path.to_path_buf(),
                source,
            })?;

        if settings.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout {
                path: path.to_path_buf(),
            });
        }

        Ok(settings)
    }

    /// Path to the settings file, if the platform has a config directory.
    pub fn settings_file_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "weather-cli", "weather")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Everything needed to run a session: the API key plus settings.
#[derive(Clone)]
pub struct Config {
    api_key: String,
    pub settings: Settings,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("settings", &self.settings)
            .finish()
    }
}

impl Config {
    /// Resolve the API key through `lookup`; blank values count as missing.
    pub fn from_lookup<F>(lookup: F, settings: Settings) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self { api_key, settings })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn missing_api_key_is_an_error() {
        let err = Config::from_lookup(|_| None, Settings::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let err = Config::from_lookup(|_| Some("  ".into()), Settings::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn api_key_is_read_from_lookup() {
        let cfg = Config::from_lookup(
            |name| (name == API_KEY_ENV).then(|| "SECRET".to_string()),
            Settings::default(),
        )
        .expect("key present");

        assert_eq!(cfg.api_key(), "SECRET");
        assert!(!format!("{cfg:?}").contains("SECRET"));
    }

    #[test]
    fn settings_default_when_file_absent() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.timeout(), Duration::from_secs(10));
        assert_eq!(settings.history_file, PathBuf::from("weather_history.json"));
    }

    #[test]
    fn settings_partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = 3").unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.timeout_secs, 3);
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn settings_zero_timeout_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = 0").unwrap();

        let err = Settings::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTimeout { .. }));
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn settings_malformed_file_is_reported() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = \"soon\"").unwrap();

        let err = Settings::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSettings { .. }));
    }
}
