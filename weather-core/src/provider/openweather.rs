use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    config::Config,
    error::WeatherError,
    model::{CityQuery, WeatherReading},
};

use super::WeatherProvider;

/// Client for the OpenWeather "current weather" endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    endpoint: String,
    timeout: Duration,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, endpoint: String, timeout: Duration) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WeatherError::Network(e.to_string()))?;

        Ok(Self {
            api_key,
            endpoint,
            timeout,
            http,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        Self::new(
            config.api_key().to_owned(),
            config.settings.base_url.clone(),
            config.settings.timeout(),
        )
    }

    fn transport_error(&self, err: reqwest::Error) -> WeatherError {
        if err.is_timeout() {
            WeatherError::Timeout {
                after: self.timeout,
            }
        } else {
            WeatherError::Network(err.without_url().to_string())
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self, city), fields(city = %city))]
    async fn fetch(&self, city: &CityQuery) -> Result<WeatherReading, WeatherError> {
        let res = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", city.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = res.status();
        debug!(%status, "OpenWeather responded");

        match status {
            StatusCode::UNAUTHORIZED => return Err(WeatherError::Auth),
            StatusCode::NOT_FOUND => return Err(WeatherError::NotFound),
            s if !s.is_success() => {
                let body = res.text().await.unwrap_or_default();
                debug!(body = %truncate_body(&body), "Unexpected OpenWeather status");
                return Err(WeatherError::Upstream {
                    status: s.as_u16(),
                });
            }
            _ => {}
        }

        let body = res.text().await.map_err(|e| self.transport_error(e))?;

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))?;

        Ok(parsed.into_reading())
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: Option<f64>,
    humidity: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: Option<String>,
    sys: Option<OwSys>,
    main: OwMain,
    weather: Option<Vec<OwWeather>>,
    wind: Option<OwWind>,
}

impl OwCurrentResponse {
    fn into_reading(self) -> WeatherReading {
        let condition = self
            .weather
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|w| w.description)
            .unwrap_or_else(|| "N/A".to_string());

        WeatherReading {
            city: self.name.unwrap_or_else(|| "Unknown".to_string()),
            country: self.sys.and_then(|s| s.country).unwrap_or_default(),
            temperature_c: self.main.temp,
            feels_like_c: self.main.feels_like,
            condition,
            humidity_pct: self.main.humidity,
            wind_speed_mps: self.wind.and_then(|w| w.speed),
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        let head: String = body.chars().take(MAX).collect();
        format!("{head}...")
    } else {
        body.to_string()
    }
}
