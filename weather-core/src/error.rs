//! Error types shared by the core library.
//!
//! Each component gets its own enum so callers can match on exactly the
//! failures that component can produce.

use std::{io, path::PathBuf, time::Duration};

use thiserror::Error;

/// Failures from a single weather lookup.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Upstream rejected the API key (HTTP 401).
    #[error("Invalid or missing API key.")]
    Auth,

    /// Upstream does not know the requested city (HTTP 404).
    #[error("City not found.")]
    NotFound,

    /// Any other non-success status.
    #[error("Weather service responded with HTTP {status}.")]
    Upstream { status: u16 },

    /// The request did not complete within the configured timeout.
    #[error("Request timed out after {}s.", .after.as_secs())]
    Timeout { after: Duration },

    /// The request could not be sent or the body could not be read.
    #[error("Could not reach weather service: {0}")]
    Network(String),

    /// A success response whose body does not have the expected shape.
    #[error("Malformed weather response: {0}")]
    Parse(String),
}

/// Failures while loading or saving the search history file.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Failed to access history file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("History file {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failures while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OPENWEATHER_API_KEY environment variable is not set.")]
    MissingApiKey,

    #[error("Failed to parse settings file {}: {source}", .path.display())]
    InvalidSettings {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Settings file {}: timeout_secs must be at least 1", .path.display())]
    ZeroTimeout { path: PathBuf },

    #[error("Failed to read settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Rejected user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a city name.")]
    EmptyCity,
}
