use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::WeatherError,
    model::{CityQuery, WeatherReading},
};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Source of current weather conditions.
///
/// One call is one upstream request: no retries, no caching.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, city: &CityQuery) -> Result<WeatherReading, WeatherError>;
}
