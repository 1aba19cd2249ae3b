//! External geocoding and weather collaborators.
//!
//! The entry pipeline only sees the `Geocoder` and `WeatherService` traits.
//! Which implementation backs them is chosen from the settings file, so
//! switching providers never touches the pipeline itself.
//!
//! # Module Structure
//!
//! - `google`: Google Geocoding and Elevation APIs
//! - `nominatim`: OpenStreetMap Nominatim with Open-Elevation
//! - `openweathermap`: OpenWeatherMap current conditions
//!
//! # Example
//!
//! ```no_run
//! use dayly::providers::{Geocoder, NominatimGeocoder};
//!
//! let geocoder = NominatimGeocoder::new(
//!     "https://nominatim.openstreetmap.org",
//!     "https://api.open-elevation.com",
//! );
//! let place = geocoder.geocode("Tokyo Tower", "en")?;
//! println!("{} at ({}, {})", place.address, place.latitude, place.longitude);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod google;
pub mod nominatim;
pub mod openweathermap;

use crate::config::{GeocodingProvider, GeocodingSettings, WeatherSettings};
use crate::constants::{
    GOOGLE_MAPS_BASE_URL, NOMINATIM_BASE_URL, OPENWEATHERMAP_BASE_URL, OPEN_ELEVATION_BASE_URL,
};
use crate::errors::{AppError, AppResult, LocationError, WeatherError};

pub use google::GoogleGeocoder;
pub use nominatim::NominatimGeocoder;
pub use openweathermap::OpenWeatherMap;

/// A geocoding match.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    /// Formatted address as returned by the service
    pub address: String,
    /// Degrees north
    pub latitude: f64,
    /// Degrees east
    pub longitude: f64,
}

/// Current conditions reported by a weather service.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Detailed status, e.g. `light rain`
    pub detailed_status: String,
    /// Short status, e.g. `Rain`
    pub short_status: String,
    /// Temperature in degrees Celsius
    pub temperature_celsius: f64,
    /// Relative humidity, 0-100
    pub humidity_percent: f64,
}

/// Forward, reverse and elevation lookups.
pub trait Geocoder {
    /// Finds the place best matching `address`.
    fn geocode(&self, address: &str, language: &str) -> Result<Place, LocationError>;

    /// Finds the place at the given coordinates.
    fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
        language: &str,
    ) -> Result<Place, LocationError>;

    /// Ground elevation in meters, when the service knows it.
    fn elevation(&self, latitude: f64, longitude: f64) -> Result<Option<f64>, LocationError>;
}

/// Current-conditions lookup.
pub trait WeatherService {
    /// Conditions right now at the given coordinates.
    fn current_weather(
        &self,
        latitude: f64,
        longitude: f64,
        api_key: &str,
        language: &str,
    ) -> Result<Observation, WeatherError>;
}

/// Builds the geocoder selected in the settings file.
///
/// # Errors
///
/// Returns `AppError::Config` when Google is selected without an API key.
pub fn geocoder_from_settings(settings: &GeocodingSettings) -> AppResult<Box<dyn Geocoder>> {
    match settings.provider {
        GeocodingProvider::Google => {
            let api_key = settings.apikey.clone().ok_or_else(|| {
                AppError::Config("geocoding.apikey is required for the google provider".to_string())
            })?;
            let base_url = settings
                .base_url
                .clone()
                .unwrap_or_else(|| GOOGLE_MAPS_BASE_URL.to_string());
            Ok(Box::new(GoogleGeocoder::new(base_url, api_key)))
        }
        GeocodingProvider::Nominatim => {
            let base_url = settings
                .base_url
                .clone()
                .unwrap_or_else(|| NOMINATIM_BASE_URL.to_string());
            let elevation_url = settings
                .elevation_url
                .clone()
                .unwrap_or_else(|| OPEN_ELEVATION_BASE_URL.to_string());
            Ok(Box::new(NominatimGeocoder::new(base_url, elevation_url)))
        }
    }
}

/// Builds the weather client for the settings file.
pub fn weather_from_settings(settings: &WeatherSettings) -> Box<dyn WeatherService> {
    let base_url = settings
        .base_url
        .clone()
        .unwrap_or_else(|| OPENWEATHERMAP_BASE_URL.to_string());
    Box::new(OpenWeatherMap::new(base_url))
}
