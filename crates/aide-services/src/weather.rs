//! Current-conditions lookup.

use aide_core::{Coordinates, Forecast, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::http::service_error;

const SERVICE: &str = "weather service";

/// Current weather for a position.
#[async_trait]
pub trait WeatherService: Send + Sync {
    async fn forecast(&self, coords: Coordinates) -> Result<Forecast>;
}

/// Weather service backed by the Open-Meteo forecast API.
#[derive(Clone)]
pub struct OpenMeteoClient {
    base_url: String,
    http_client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: CurrentWeather,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
}

impl OpenMeteoClient {
    pub fn new(base_url: &str, http_client: reqwest::Client) -> Self {
        Self {
            base_url: crate::http::base_url(base_url),
            http_client,
        }
    }
}

#[async_trait]
impl WeatherService for OpenMeteoClient {
    async fn forecast(&self, coords: Coordinates) -> Result<Forecast> {
        let url = format!("{}/v1/forecast", self.base_url);

        let response: ForecastResponse = self
            .http_client
            .get(&url)
            .query(&[
                ("latitude", coords.lat.to_string()),
                ("longitude", coords.lon.to_string()),
                ("current_weather", "true".to_string()),
            ])
            .send()
            .await
            .map_err(|e| service_error(SERVICE, e))?
            .error_for_status()
            .map_err(|e| service_error(SERVICE, e))?
            .json()
            .await
            .map_err(|e| service_error(SERVICE, e))?;

        Ok(Forecast {
            temperature: response.current_weather.temperature,
        })
    }
}
