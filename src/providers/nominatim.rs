//! OpenStreetMap Nominatim geocoding with Open-Elevation altitudes.

use crate::constants::HTTP_USER_AGENT;
use crate::errors::LocationError;
use crate::providers::{Geocoder, Place};
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

/// One match of the search and reverse endpoints. Coordinates are strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    lat: Option<String>,
    #[serde(default)]
    lon: Option<String>,
}

impl NominatimPlace {
    fn into_place(self) -> Result<Place, LocationError> {
        if self.error.is_some() {
            return Err(LocationError::NoResult);
        }
        let (Some(address), Some(lat), Some(lon)) = (self.display_name, self.lat, self.lon) else {
            return Err(LocationError::NoResult);
        };
        Ok(Place {
            address,
            latitude: parse_degrees(&lat)?,
            longitude: parse_degrees(&lon)?,
        })
    }
}

fn parse_degrees(text: &str) -> Result<f64, LocationError> {
    text.parse()
        .map_err(|_| LocationError::InvalidResponse(format!("Invalid coordinate '{}'", text)))
}

#[derive(Debug, Deserialize)]
struct ElevationResponse {
    #[serde(default)]
    results: Vec<ElevationResult>,
}

#[derive(Debug, Deserialize)]
struct ElevationResult {
    elevation: f64,
}

/// Client for Nominatim and Open-Elevation.
pub struct NominatimGeocoder {
    base_url: String,
    elevation_url: String,
    client: Client,
}

impl NominatimGeocoder {
    /// Creates a new Nominatim client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Nominatim base URL (e.g., "https://nominatim.openstreetmap.org")
    /// * `elevation_url` - Open-Elevation base URL (e.g., "https://api.open-elevation.com")
    pub fn new(base_url: impl Into<String>, elevation_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            elevation_url: elevation_url.into(),
            client: Client::new(),
        }
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, LocationError> {
        // Nominatim's usage policy rejects requests without a user agent
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, HTTP_USER_AGENT)
            .query(query)
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
            LocationError::InvalidResponse(format!("Failed to parse response from {}: {}", url, e))
        })
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, address: &str, language: &str) -> Result<Place, LocationError> {
        debug!("Nominatim forward geocoding in language: {}", language);
        let url = format!("{}/search", self.base_url);
        let places: Vec<NominatimPlace> = self.get_json(
            &url,
            &[
                ("q", address.to_string()),
                ("format", "jsonv2".to_string()),
                ("limit", "1".to_string()),
                ("accept-language", language.to_string()),
            ],
        )?;
        places
            .into_iter()
            .next()
            .ok_or(LocationError::NoResult)?
            .into_place()
    }

    fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
        language: &str,
    ) -> Result<Place, LocationError> {
        debug!("Nominatim reverse geocoding in language: {}", language);
        let url = format!("{}/reverse", self.base_url);
        let place: NominatimPlace = self.get_json(
            &url,
            &[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("format", "jsonv2".to_string()),
                ("accept-language", language.to_string()),
            ],
        )?;
        place.into_place()
    }

    fn elevation(&self, latitude: f64, longitude: f64) -> Result<Option<f64>, LocationError> {
        let url = format!("{}/api/v1/lookup", self.elevation_url);
        let response: ElevationResponse =
            self.get_json(&url, &[("locations", format!("{},{}", latitude, longitude))])?;
        Ok(response.results.first().map(|r| r.elevation))
    }
}
