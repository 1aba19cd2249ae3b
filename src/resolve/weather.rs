//! Weather resolution.

use crate::entry_core::{
    capitalize_words, celsius_to_fahrenheit, percent_to_fraction, weather_window_allows, Weather,
};
use crate::providers::WeatherService;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// Fetches current conditions for an entry, when that makes sense.
///
/// Returns `None` without calling the service when the coordinates are
/// unknown or `occurred_at` lies outside the weather window. A failing
/// service is logged and also yields `None`.
pub fn resolve_weather(
    coordinates: Option<(f64, f64)>,
    occurred_at: DateTime<Utc>,
    now: DateTime<Utc>,
    api_key: &str,
    language: &str,
    service: &dyn WeatherService,
) -> Option<Weather> {
    let (latitude, longitude) = coordinates?;

    if !weather_window_allows(occurred_at, now) {
        debug!("Entry time outside the weather window; skipping weather");
        return None;
    }

    match service.current_weather(latitude, longitude, api_key, language) {
        Ok(observation) => Some(Weather {
            humidity: Some(percent_to_fraction(observation.humidity_percent)),
            temperature: Some(celsius_to_fahrenheit(observation.temperature_celsius)),
            skyline: Some(observation.short_status),
            weather: Some(capitalize_words(&observation.detailed_status)),
        }),
        Err(e) => {
            warn!("Weather lookup failed, entry will have no weather: {}", e);
            None
        }
    }
}
