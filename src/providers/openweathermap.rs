//! OpenWeatherMap current weather client.

use crate::constants::HTTP_USER_AGENT;
use crate::errors::WeatherError;
use crate::providers::{Observation, WeatherService};
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use tracing::debug;

/// Response from the current weather endpoint.
#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    weather: Vec<Condition>,
    main: Readings,
}

#[derive(Debug, Deserialize)]
struct Condition {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct Readings {
    temp: f64,
    humidity: f64,
}

/// Client for the OpenWeatherMap API.
pub struct OpenWeatherMap {
    base_url: String,
    client: Client,
}

impl OpenWeatherMap {
    /// Creates a new OpenWeatherMap client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the API (e.g., "https://api.openweathermap.org")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }
}

impl WeatherService for OpenWeatherMap {
    fn current_weather(
        &self,
        latitude: f64,
        longitude: f64,
        api_key: &str,
        language: &str,
    ) -> Result<Observation, WeatherError> {
        debug!("Fetching current weather in language: {}", language);

        let url = format!("{}/data/2.5/weather", self.base_url);
        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, HTTP_USER_AGENT)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("appid", api_key.to_string()),
                ("units", "metric".to_string()),
                ("lang", language.to_string()),
            ])
            .send()
            .map_err(WeatherError::Request)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            return Err(WeatherError::Service {
                status: status.to_string(),
                message: error_text,
            });
        }

        let body: CurrentWeatherResponse = response.json().map_err(|e| {
            WeatherError::InvalidResponse(format!("Failed to parse weather response: {}", e))
        })?;

        let condition = body.weather.into_iter().next().ok_or_else(|| {
            WeatherError::InvalidResponse("Weather response has no conditions".to_string())
        })?;

        Ok(Observation {
            detailed_status: condition.description,
            short_status: condition.main,
            temperature_celsius: body.main.temp,
            humidity_percent: body.main.humidity,
        })
    }
}
