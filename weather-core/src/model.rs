use std::{convert::TryFrom, fmt};

use crate::error::ValidationError;

/// A city name as entered by the user, trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery(String);

impl CityQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for CityQuery {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyCity);
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current conditions for one city, as reported by the upstream provider.
///
/// Fields the provider may omit are `None`; the presenter renders them as
/// `unknown`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub city: String,
    /// ISO country code, empty when the provider did not report one.
    pub country: String,
    pub temperature_c: f64,
    pub feels_like_c: Option<f64>,
    /// Lower-case description straight from the provider, or `N/A`.
    pub condition: String,
    pub humidity_pct: Option<u8>,
    pub wind_speed_mps: Option<f64>,
}
