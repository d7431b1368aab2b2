//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration (API key from the environment, optional settings file)
//! - The weather provider abstraction and its OpenWeather implementation
//! - Rendering of readings for the terminal
//! - The bounded, file-backed search history
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod provider;
pub mod render;

pub use config::{Config, Settings};
pub use error::{ConfigError, HistoryError, ValidationError, WeatherError};
pub use history::{HistoryEntry, HistoryLog, HistoryStore};
pub use model::{CityQuery, WeatherReading};
pub use provider::{OpenWeatherProvider, WeatherProvider};
