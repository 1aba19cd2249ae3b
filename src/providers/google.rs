//! Google Maps Geocoding and Elevation API client.

use crate::constants::HTTP_USER_AGENT;
use crate::errors::LocationError;
use crate::providers::{Geocoder, Place};
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Response from the geocode endpoint.
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Response from the elevation endpoint.
#[derive(Debug, Deserialize)]
struct ElevationResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<ElevationResult>,
}

#[derive(Debug, Deserialize)]
struct ElevationResult {
    elevation: f64,
}

/// Client for the Google Maps web services.
pub struct GoogleGeocoder {
    base_url: String,
    api_key: String,
    client: Client,
}

impl GoogleGeocoder {
    /// Creates a new Google client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the API (e.g., "https://maps.googleapis.com")
    /// * `api_key` - Google Maps API key
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client: Client::new(),
        }
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, LocationError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, HTTP_USER_AGENT)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .map_err(LocationError::Request)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            return Err(LocationError::Service {
                status: status.to_string(),
                message: error_text,
            });
        }

        response.json().map_err(|e| {
            LocationError::InvalidResponse(format!("Failed to parse Google response: {}", e))
        })
    }

    fn geocode_query(&self, query: &[(&str, String)]) -> Result<Place, LocationError> {
        let response: GeocodeResponse = self.get_json("/maps/api/geocode/json", query)?;
        check_status(&response.status, response.error_message)?;

        let first = response
            .results
            .into_iter()
            .next()
            .ok_or(LocationError::NoResult)?;
        Ok(Place {
            address: first.formatted_address,
            latitude: first.geometry.location.lat,
            longitude: first.geometry.location.lng,
        })
    }
}

/// Maps a Google status keyword onto `LocationError`.
fn check_status(status: &str, error_message: Option<String>) -> Result<(), LocationError> {
    match status {
        STATUS_OK => Ok(()),
        STATUS_ZERO_RESULTS => Err(LocationError::NoResult),
        other => Err(LocationError::Service {
            status: other.to_string(),
            message: error_message.unwrap_or_default(),
        }),
    }
}

impl Geocoder for GoogleGeocoder {
    fn geocode(&self, address: &str, language: &str) -> Result<Place, LocationError> {
        debug!("Google forward geocoding in language: {}", language);
        self.geocode_query(&[
            ("address", address.to_string()),
            ("language", language.to_string()),
        ])
    }

    fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
        language: &str,
    ) -> Result<Place, LocationError> {
        debug!("Google reverse geocoding in language: {}", language);
        self.geocode_query(&[
            ("latlng", format!("{},{}", latitude, longitude)),
            ("language", language.to_string()),
        ])
    }

    fn elevation(&self, latitude: f64, longitude: f64) -> Result<Option<f64>, LocationError> {
        let response: ElevationResponse = self.get_json(
            "/maps/api/elevation/json",
            &[("locations", format!("{},{}", latitude, longitude))],
        )?;
        match check_status(&response.status, response.error_message) {
            Ok(()) => Ok(response.results.first().map(|r| r.elevation)),
            Err(LocationError::NoResult) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
