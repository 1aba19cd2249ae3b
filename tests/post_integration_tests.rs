//! Integration tests for the post pipeline (ops module).
//!
//! These tests drive `post_entry` end to end against a temporary storage
//! root, with in-process geocoding and weather services.

use chrono::{DateTime, Duration, TimeZone, Utc};
use dayly::config::Config;
use dayly::entry_core::Weather;
use dayly::errors::{AppError, LocationError, WeatherError};
use dayly::ops::{post_entry, PostRequest, Services};
use dayly::providers::{Geocoder, Observation, Place, WeatherService};
use std::cell::Cell;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

struct FakeGeocoder {
    place: Option<Place>,
    elevation: Option<f64>,
    denied: bool,
    calls: Cell<usize>,
}

impl FakeGeocoder {
    fn tokyo_tower() -> Self {
        Self {
            place: Some(Place {
                address: "4-2-8 Shibakoen, Minato City, Tokyo".to_string(),
                latitude: 35.6586,
                longitude: 139.7454,
            }),
            elevation: Some(23.5),
            denied: false,
            calls: Cell::new(0),
        }
    }

    fn nowhere() -> Self {
        Self {
            place: None,
            elevation: None,
            denied: false,
            calls: Cell::new(0),
        }
    }

    fn denied() -> Self {
        Self {
            denied: true,
            ..Self::tokyo_tower()
        }
    }

    fn lookup(&self) -> Result<Place, LocationError> {
        self.calls.set(self.calls.get() + 1);
        if self.denied {
            return Err(LocationError::Service {
                status: "REQUEST_DENIED".to_string(),
                message: "The provided API key is invalid.".to_string(),
            });
        }
        self.place.clone().ok_or(LocationError::NoResult)
    }
}

impl Geocoder for FakeGeocoder {
    fn geocode(&self, _address: &str, _language: &str) -> Result<Place, LocationError> {
        self.lookup()
    }

    fn reverse_geocode(
        &self,
        _latitude: f64,
        _longitude: f64,
        _language: &str,
    ) -> Result<Place, LocationError> {
        self.lookup()
    }

    fn elevation(&self, _latitude: f64, _longitude: f64) -> Result<Option<f64>, LocationError> {
        Ok(self.elevation)
    }
}

struct FakeWeather {
    fail: bool,
    calls: Cell<usize>,
}

impl FakeWeather {
    fn sunny() -> Self {
        Self {
            fail: false,
            calls: Cell::new(0),
        }
    }

    fn broken() -> Self {
        Self {
            fail: true,
            calls: Cell::new(0),
        }
    }
}

impl WeatherService for FakeWeather {
    fn current_weather(
        &self,
        _latitude: f64,
        _longitude: f64,
        _api_key: &str,
        _language: &str,
    ) -> Result<Observation, WeatherError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(WeatherError::InvalidResponse("boom".to_string()));
        }
        Ok(Observation {
            detailed_status: "clear sky".to_string(),
            short_status: "Clear".to_string(),
            temperature_celsius: 20.0,
            humidity_percent: 55.0,
        })
    }
}

fn setup(extra: &str) -> (TempDir, Config) {
    let temp_dir = tempdir().expect("create temp dir");
    let text = format!(
        "[dayly]\nroot = \"{}\"\ntimezone = \"UTC\"\n{}",
        temp_dir.path().join("Dayly").display(),
        extra
    );
    let config = Config::from_toml_str(&text).expect("parse settings");
    (temp_dir, config)
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

fn count_files(dir: &Path) -> usize {
    fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}

#[test]
fn test_post_with_location_and_weather() {
    let (_temp_dir, config) = setup("[openweathermap]\napikey = \"k\"\n");
    let geocoder = FakeGeocoder::tokyo_tower();
    let weather = FakeWeather::sunny();
    let services = Services {
        geocoder: &geocoder,
        weather: &weather,
    };
    let request = PostRequest {
        text: "@Tokyo Tower\nGreat view.".to_string(),
        ..PostRequest::default()
    };

    let mut out = Vec::new();
    let outcome = post_entry(&config, &services, request, now(), &mut out).unwrap();

    let path = outcome.path.expect("entry path");
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("    <address>4-2-8 Shibakoen, Minato City, Tokyo</address>"));
    assert!(text.contains("    <latitude>35.6586</latitude>"));
    assert!(text.contains("    <altitude>23.5</altitude>"));
    assert!(text.contains("    <humidity>0.55</humidity>"));
    assert!(text.contains("    <temperature>68.0</temperature>"));
    assert!(text.contains("    <skyline>Clear</skyline>"));
    assert!(text.contains("    <weather>Clear Sky</weather>"));
    assert!(text.contains("  <content>Great view.</content>"));
    assert_eq!(weather.calls.get(), 1);
    assert!(out.is_empty());
}

#[test]
fn test_old_entry_gets_no_weather() {
    let (_temp_dir, config) = setup("[openweathermap]\napikey = \"k\"\n");
    let geocoder = FakeGeocoder::tokyo_tower();
    let weather = FakeWeather::sunny();
    let services = Services {
        geocoder: &geocoder,
        weather: &weather,
    };
    let request = PostRequest {
        text: "Last week.".to_string(),
        datetime: Some("20231225T120000".to_string()),
        location: Some("Tokyo Tower".to_string()),
        ..PostRequest::default()
    };

    let outcome = post_entry(&config, &services, request, now(), &mut Vec::new()).unwrap();

    assert!(outcome.entry.weather().is_none());
    assert!(outcome.entry.location().is_some());
    assert_eq!(weather.calls.get(), 0);
}

#[test]
fn test_weather_failure_still_posts() {
    let (_temp_dir, config) = setup("[openweathermap]\napikey = \"k\"\n");
    let geocoder = FakeGeocoder::tokyo_tower();
    let weather = FakeWeather::broken();
    let services = Services {
        geocoder: &geocoder,
        weather: &weather,
    };
    let request = PostRequest {
        text: "Rainy?".to_string(),
        location: Some("Tokyo Tower".to_string()),
        ..PostRequest::default()
    };

    let outcome = post_entry(&config, &services, request, now(), &mut Vec::new()).unwrap();

    assert!(outcome.path.is_some());
    assert!(outcome.entry.weather().is_none());
    assert_eq!(weather.calls.get(), 1);
}

#[test]
fn test_no_api_key_skips_weather() {
    let (_temp_dir, config) = setup("");
    let geocoder = FakeGeocoder::tokyo_tower();
    let weather = FakeWeather::sunny();
    let services = Services {
        geocoder: &geocoder,
        weather: &weather,
    };
    let request = PostRequest {
        text: "Hi".to_string(),
        location: Some("Tokyo Tower".to_string()),
        ..PostRequest::default()
    };

    let outcome = post_entry(&config, &services, request, now(), &mut Vec::new()).unwrap();
    assert!(outcome.entry.weather().is_none());
    assert_eq!(weather.calls.get(), 0);
}

#[test]
fn test_unknown_address_uses_placeholder() {
    let (_temp_dir, config) = setup("");
    let geocoder = FakeGeocoder::nowhere();
    let weather = FakeWeather::sunny();
    let services = Services {
        geocoder: &geocoder,
        weather: &weather,
    };
    let request = PostRequest {
        text: "Somewhere".to_string(),
        location: Some("Atlantis".to_string()),
        ..PostRequest::default()
    };

    let outcome = post_entry(&config, &services, request, now(), &mut Vec::new()).unwrap();
    let text = fs::read_to_string(outcome.path.unwrap()).unwrap();
    assert!(text.contains("    <address>unknown place</address>"));
    assert!(text.contains("    <latitude>nan</latitude>"));
    assert!(text.contains("    <altitude>nan</altitude>"));
}

#[test]
fn test_manual_weather_overrides_fetched() {
    let (_temp_dir, config) = setup("[openweathermap]\napikey = \"k\"\n");
    let geocoder = FakeGeocoder::tokyo_tower();
    let weather = FakeWeather::sunny();
    let services = Services {
        geocoder: &geocoder,
        weather: &weather,
    };
    let request = PostRequest {
        text: "Hot".to_string(),
        coordinates: Some((35.6586, 139.7454)),
        altitude: Some(150.0),
        weather: Weather {
            temperature: Some(95.0),
            ..Weather::default()
        },
        ..PostRequest::default()
    };

    let outcome = post_entry(&config, &services, request, now(), &mut Vec::new()).unwrap();
    let fields = outcome.entry.weather().unwrap();
    assert_eq!(fields.temperature, Some(95.0));
    assert_eq!(fields.humidity, Some(0.55));
    assert_eq!(outcome.entry.location().unwrap().altitude, Some(150.0));
}

#[test]
fn test_dry_run_with_photo_touches_nothing() {
    let (temp_dir, config) = setup("");
    let photo = temp_dir.path().join("beach.jpeg");
    fs::write(&photo, b"jpeg").unwrap();
    let geocoder = FakeGeocoder::nowhere();
    let weather = FakeWeather::sunny();
    let services = Services {
        geocoder: &geocoder,
        weather: &weather,
    };
    let request = PostRequest {
        text: "Beach day".to_string(),
        photo: Some(photo.clone()),
        photo_description: "Waves".to_string(),
        dry_run: true,
        ..PostRequest::default()
    };

    let mut out = Vec::new();
    let outcome = post_entry(&config, &services, request, now(), &mut out).unwrap();
    let report = String::from_utf8(out).unwrap();

    assert!(outcome.path.is_none());
    assert!(report.starts_with(&format!("----- copy {} to ", photo.display())));
    assert!(report.contains(&format!("\n{}\n", outcome.filename)));
    assert!(report.contains("|       <description>Waves</description>"));
    assert!(!config.storage_root.exists());
}

#[test]
fn test_photo_stored_under_entry_id() {
    let (temp_dir, config) = setup("");
    let photo = temp_dir.path().join("IMG_0042.JPG");
    fs::write(&photo, b"jpeg").unwrap();
    let geocoder = FakeGeocoder::nowhere();
    let weather = FakeWeather::sunny();
    let services = Services {
        geocoder: &geocoder,
        weather: &weather,
    };
    let request = PostRequest {
        text: "Snap".to_string(),
        photo: Some(photo),
        ..PostRequest::default()
    };

    let outcome = post_entry(&config, &services, request, now(), &mut Vec::new()).unwrap();
    let media = outcome.entry.media();
    assert_eq!(media.len(), 1);
    assert_eq!(media[0].kind, "photo");
    assert!(media[0]
        .filename
        .ends_with(&format!("_{}.jpg", outcome.entry.id())));
    assert!(config.photos_dir().join(&media[0].filename).is_file());
}

#[test]
fn test_failure_leaves_no_files() {
    let (temp_dir, config) = setup("");
    let photo = temp_dir.path().join("missing.jpg");
    let geocoder = FakeGeocoder::nowhere();
    let weather = FakeWeather::sunny();
    let services = Services {
        geocoder: &geocoder,
        weather: &weather,
    };
    let request = PostRequest {
        text: "Lost".to_string(),
        photo: Some(photo),
        ..PostRequest::default()
    };

    let result = post_entry(&config, &services, request, now(), &mut Vec::new());
    assert!(matches!(result, Err(AppError::Io(_))));
    assert_eq!(count_files(&config.entries_dir()), 0);
}

#[test]
fn test_geocoding_failure_aborts_without_files() {
    let (temp_dir, config) = setup("");
    let photo = temp_dir.path().join("IMG_0007.jpg");
    fs::write(&photo, b"jpeg").unwrap();
    let geocoder = FakeGeocoder::denied();
    let weather = FakeWeather::sunny();
    let services = Services {
        geocoder: &geocoder,
        weather: &weather,
    };
    let request = PostRequest {
        text: "@Tokyo Tower\nGreat view.".to_string(),
        photo: Some(photo),
        ..PostRequest::default()
    };

    let result = post_entry(&config, &services, request, now(), &mut Vec::new());

    match result {
        Err(AppError::Location(LocationError::Service { status, .. })) => {
            assert_eq!(status, "REQUEST_DENIED")
        }
        other => panic!("Expected Location error, got {:?}", other.map(|o| o.filename)),
    }
    assert_eq!(geocoder.calls.get(), 1);
    assert_eq!(count_files(&config.entries_dir()), 0);
    assert_eq!(count_files(&config.photos_dir()), 0);
    assert_eq!(weather.calls.get(), 0);
}

#[test]
fn test_datetime_in_configured_zone() {
    let (_temp_dir, mut config) = setup("");
    config.zone = dayly::entry_core::Zone::from_name(Some("Asia/Tokyo")).unwrap();
    let geocoder = FakeGeocoder::nowhere();
    let weather = FakeWeather::sunny();
    let services = Services {
        geocoder: &geocoder,
        weather: &weather,
    };
    let request = PostRequest {
        text: "!2024-01-01 21:00:00\nDinner".to_string(),
        ..PostRequest::default()
    };

    let outcome = post_entry(&config, &services, request, now(), &mut Vec::new()).unwrap();
    assert_eq!(outcome.entry.occurred_at(), Some(now()));
    assert_eq!(outcome.entry.generated(), Some(now()));
    assert_eq!(outcome.entry.content(), "Dinner");
}

#[test]
fn test_each_post_gets_its_own_file() {
    let (_temp_dir, config) = setup("");
    let geocoder = FakeGeocoder::nowhere();
    let weather = FakeWeather::sunny();
    let services = Services {
        geocoder: &geocoder,
        weather: &weather,
    };

    for minutes in 0..3 {
        let request = PostRequest {
            text: format!("Entry {}", minutes),
            ..PostRequest::default()
        };
        post_entry(
            &config,
            &services,
            request,
            now() + Duration::minutes(minutes),
            &mut Vec::new(),
        )
        .unwrap();
    }

    assert_eq!(count_files(&config.entries_dir()), 3);
    assert_eq!(geocoder.calls.get(), 0);
}
