//! Location resolution.

use crate::config::AltitudeUnit;
use crate::constants::UNKNOWN_PLACE;
use crate::entry_core::{normalize_address, Location, LocationInput};
use crate::errors::{AppResult, LocationError};
use crate::providers::{Geocoder, Place};
use tracing::{debug, info, warn};

/// Resolves a location input into a `Location` record.
///
/// Addresses are geocoded forward and coordinate pairs in reverse. When the
/// service finds nothing the address becomes `unknown place`; a reverse lookup
/// keeps the supplied coordinates in that case. A supplied `altitude` is kept
/// as is, otherwise it is looked up after a successful match; a failed
/// elevation lookup leaves the altitude unknown.
///
/// # Errors
///
/// Returns `AppError::Location` for every forward or reverse geocoding
/// failure other than "no result".
pub fn resolve_location(
    input: &LocationInput,
    altitude: Option<f64>,
    geocoder: &dyn Geocoder,
    language: &str,
    unit: AltitudeUnit,
) -> AppResult<Location> {
    let lookup = match input {
        LocationInput::Address(address) => {
            debug!("Geocoding address");
            geocoder.geocode(address, language)
        }
        LocationInput::Coordinates {
            latitude,
            longitude,
        } => {
            debug!("Reverse geocoding coordinates");
            geocoder.reverse_geocode(*latitude, *longitude, language)
        }
    };

    let place = match lookup {
        Ok(place) => place,
        Err(LocationError::NoResult) => {
            info!("Geocoding found no match; storing placeholder address");
            return Ok(unknown_place(input, altitude));
        }
        Err(e) => return Err(e.into()),
    };

    let altitude = match altitude {
        Some(altitude) => Some(altitude),
        None => match geocoder.elevation(place.latitude, place.longitude) {
            Ok(meters) => meters.map(|meters| unit.convert_meters(meters)),
            Err(e) => {
                warn!("Elevation lookup failed, altitude left unknown: {}", e);
                None
            }
        },
    };

    Ok(found_place(place, altitude))
}

fn found_place(place: Place, altitude: Option<f64>) -> Location {
    Location {
        address: Some(normalize_address(&place.address)),
        latitude: Some(place.latitude),
        longitude: Some(place.longitude),
        altitude,
    }
}

fn unknown_place(input: &LocationInput, altitude: Option<f64>) -> Location {
    let (latitude, longitude) = match input {
        LocationInput::Address(_) => (None, None),
        LocationInput::Coordinates {
            latitude,
            longitude,
        } => (Some(*latitude), Some(*longitude)),
    };
    Location {
        address: Some(UNKNOWN_PLACE.to_string()),
        latitude,
        longitude,
        altitude,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use std::cell::Cell;

    /// Geocoder answering from fixed results, counting elevation calls.
    struct FixedGeocoder {
        forward: fn() -> Result<Place, LocationError>,
        reverse: fn() -> Result<Place, LocationError>,
        elevation: Option<f64>,
        elevation_fails: bool,
        elevation_calls: Cell<u32>,
    }

    impl FixedGeocoder {
        fn new(
            forward: fn() -> Result<Place, LocationError>,
            reverse: fn() -> Result<Place, LocationError>,
        ) -> Self {
            FixedGeocoder {
                forward,
                reverse,
                elevation: Some(40.0),
                elevation_fails: false,
                elevation_calls: Cell::new(0),
            }
        }
    }

    impl Geocoder for FixedGeocoder {
        fn geocode(&self, _address: &str, _language: &str) -> Result<Place, LocationError> {
            (self.forward)()
        }

        fn reverse_geocode(&self, _lat: f64, _lon: f64, _language: &str) -> Result<Place, LocationError> {
            (self.reverse)()
        }

        fn elevation(&self, _lat: f64, _lon: f64) -> Result<Option<f64>, LocationError> {
            self.elevation_calls.set(self.elevation_calls.get() + 1);
            if self.elevation_fails {
                return Err(LocationError::Service {
                    status: "504 Gateway Timeout".to_string(),
                    message: String::new(),
                });
            }
            Ok(self.elevation)
        }
    }

    fn tokyo_tower() -> Result<Place, LocationError> {
        Ok(Place {
            address: "４－２－８ Shibakoen, Minato City, Tokyo".to_string(),
            latitude: 35.6586,
            longitude: 139.7454,
        })
    }

    fn nothing() -> Result<Place, LocationError> {
        Err(LocationError::NoResult)
    }

    fn denied() -> Result<Place, LocationError> {
        Err(LocationError::Service {
            status: "REQUEST_DENIED".to_string(),
            message: "bad key".to_string(),
        })
    }

    #[test]
    fn test_forward_lookup() {
        let geocoder = FixedGeocoder::new(tokyo_tower, nothing);
        let input = LocationInput::Address("Tokyo Tower".to_string());

        let location =
            resolve_location(&input, None, &geocoder, "en", AltitudeUnit::Meters).unwrap();

        assert_eq!(
            location.address.as_deref(),
            Some("4-2-8 Shibakoen, Minato City, Tokyo")
        );
        assert_eq!(location.coordinates(), Some((35.6586, 139.7454)));
        assert_eq!(location.altitude, Some(40.0));
        assert_eq!(geocoder.elevation_calls.get(), 1);
    }

    #[test]
    fn test_forward_no_result_uses_placeholder() {
        let geocoder = FixedGeocoder::new(nothing, nothing);
        let input = LocationInput::Address("Atlantis".to_string());

        let location =
            resolve_location(&input, None, &geocoder, "en", AltitudeUnit::Meters).unwrap();

        assert_eq!(location.address.as_deref(), Some("unknown place"));
        assert!(location.coordinates().is_none());
        assert!(location.altitude.is_none());
        assert_eq!(geocoder.elevation_calls.get(), 0);
    }

    #[test]
    fn test_reverse_no_result_keeps_coordinates() {
        let geocoder = FixedGeocoder::new(nothing, nothing);
        let input = LocationInput::Coordinates {
            latitude: 0.0,
            longitude: -160.0,
        };

        let location =
            resolve_location(&input, None, &geocoder, "en", AltitudeUnit::Meters).unwrap();

        assert_eq!(location.address.as_deref(), Some("unknown place"));
        assert_eq!(location.coordinates(), Some((0.0, -160.0)));
    }

    #[test]
    fn test_service_error_propagates() {
        let geocoder = FixedGeocoder::new(denied, denied);
        let input = LocationInput::Address("Tokyo".to_string());

        match resolve_location(&input, None, &geocoder, "en", AltitudeUnit::Meters) {
            Err(AppError::Location(LocationError::Service { status, .. })) => {
                assert_eq!(status, "REQUEST_DENIED")
            }
            other => panic!("Expected Location service error, got {:?}", other),
        }
    }

    #[test]
    fn test_supplied_altitude_skips_lookup() {
        let geocoder = FixedGeocoder::new(nothing, tokyo_tower);
        let input = LocationInput::Coordinates {
            latitude: 35.6586,
            longitude: 139.7454,
        };

        let location =
            resolve_location(&input, Some(333.0), &geocoder, "en", AltitudeUnit::Feet).unwrap();

        assert_eq!(location.altitude, Some(333.0));
        assert_eq!(geocoder.elevation_calls.get(), 0);
    }

    #[test]
    fn test_altitude_in_feet() {
        let geocoder = FixedGeocoder::new(tokyo_tower, nothing);
        let input = LocationInput::Address("Tokyo Tower".to_string());

        let location =
            resolve_location(&input, None, &geocoder, "en", AltitudeUnit::Feet).unwrap();

        assert_eq!(location.altitude, Some(131.23));
    }

    #[test]
    fn test_elevation_failure_keeps_location() {
        let mut geocoder = FixedGeocoder::new(tokyo_tower, nothing);
        geocoder.elevation_fails = true;
        let input = LocationInput::Address("Tokyo Tower".to_string());

        let location =
            resolve_location(&input, None, &geocoder, "en", AltitudeUnit::Meters).unwrap();

        assert_eq!(
            location.address.as_deref(),
            Some("4-2-8 Shibakoen, Minato City, Tokyo")
        );
        assert_eq!(location.coordinates(), Some((35.6586, 139.7454)));
        assert!(location.altitude.is_none());
        assert_eq!(geocoder.elevation_calls.get(), 1);
    }
}
