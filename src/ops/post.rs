//! Post one entry: the full build pipeline.

use crate::config::Config;
use crate::entry_core::{
    expand_alias, extract_metadata, new_id, parse_timespec, Entry, EntryBuilder, LocationInput,
    Media, Weather,
};
use crate::entry_io::{
    attach_media, ensure_directory_exists, photo_extension, report_entry, write_entry,
};
use crate::errors::{AppError, AppResult};
use crate::providers::{Geocoder, WeatherService};
use crate::resolve::{resolve_location, resolve_weather};
use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

/// Everything the user supplied for one entry.
#[derive(Debug, Clone, Default)]
pub struct PostRequest {
    /// Raw entry text, possibly starting with directive lines.
    pub text: String,
    /// `--datetime` override.
    pub datetime: Option<String>,
    /// Positional location argument: alias, address or `(lat, lon)`.
    pub location: Option<String>,
    /// `--address` override.
    pub address: Option<String>,
    /// `--latitude` and `--longitude` override.
    pub coordinates: Option<(f64, f64)>,
    /// `--altitude`, already in the configured unit.
    pub altitude: Option<f64>,
    /// Manually given weather fields.
    pub weather: Weather,
    /// `--timestamp` marker.
    pub timestamp: Option<i64>,
    /// Photo to attach.
    pub photo: Option<PathBuf>,
    /// Caption of the photo.
    pub photo_description: String,
    /// `--language` override.
    pub language: Option<String>,
    /// Report instead of writing.
    pub dry_run: bool,
}

/// The external collaborators used while posting.
pub struct Services<'a> {
    pub geocoder: &'a dyn Geocoder,
    pub weather: &'a dyn WeatherService,
}

/// Result of a successful post.
#[derive(Debug, Clone)]
pub struct PostOutcome {
    /// `{id}.entry`
    pub filename: String,
    /// Full path of the written file; `None` in dry-run mode.
    pub path: Option<PathBuf>,
    /// The entry as rendered.
    pub entry: Entry,
}

/// Builds an entry from `request` and stores it.
///
/// # Flow
///
/// 1. Split directive lines off the text; command-line values win over them
/// 2. Reject an unsupported photo before any lookup
/// 3. Resolve the location, then weather if an API key is configured
/// 4. Copy the photo into the media store
/// 5. Write `{id}.entry`, or report it to `out` in dry-run mode
///
/// # Errors
///
/// Returns an error if:
/// - The date/time override or coordinates cannot be parsed
/// - The photo is not a JPEG or cannot be copied
/// - Geocoding fails for any reason other than "no result"
/// - Manual weather is given without coordinates to attach it to
/// - The entry file cannot be written
pub fn post_entry(
    config: &Config,
    services: &Services<'_>,
    request: PostRequest,
    now: DateTime<Utc>,
    out: &mut dyn Write,
) -> AppResult<PostOutcome> {
    let meta = extract_metadata(&request.text);
    let language = request
        .language
        .clone()
        .unwrap_or_else(|| config.language.clone());

    let occurred_at = match request.datetime.as_deref().or(meta.timespec.as_deref()) {
        Some(spec) => config.zone.to_utc(parse_timespec(spec)?)?,
        None => now,
    };

    let location_input = select_location_input(&request, meta.location.as_deref(), config)?;

    if let Some(photo) = &request.photo {
        photo_extension(photo)?;
    }

    let mut builder = EntryBuilder::new(new_id(), meta.body)
        .generated(Some(now))
        .occurred_at(occurred_at)
        .timestamp(request.timestamp);

    if let Some(input) = location_input {
        let location = resolve_location(
            &input,
            request.altitude,
            services.geocoder,
            &language,
            config.altitude_unit,
        )?;

        let fetched = match &config.weather.apikey {
            Some(api_key) => resolve_weather(
                location.coordinates(),
                occurred_at,
                now,
                api_key,
                &language,
                services.weather,
            ),
            None => {
                debug!("No weather API key configured; skipping weather");
                None
            }
        };
        let weather = fetched.unwrap_or_default().overridden_by(&request.weather);

        if !weather.is_empty() && location.coordinates().is_none() {
            return Err(AppError::InvalidInput(
                "Weather fields need a location with coordinates".to_string(),
            ));
        }
        builder = builder.location(location).weather(weather);
    } else if !request.weather.is_empty() {
        return Err(AppError::InvalidInput(
            "Weather fields need a location".to_string(),
        ));
    }

    if let Some(photo) = &request.photo {
        let photos_dir = config.photos_dir();
        if !request.dry_run {
            ensure_directory_exists(&photos_dir)?;
        }
        let filename = attach_media(photo, &photos_dir, builder.id(), request.dry_run, out)?;
        builder = builder.media(Media::photo(filename, request.photo_description.clone()));
    }

    let entry = builder.build()?;
    let filename = entry.filename();

    let path = if request.dry_run {
        report_entry(&entry, out)?;
        None
    } else {
        let entries_dir = config.entries_dir();
        ensure_directory_exists(&entries_dir)?;
        Some(write_entry(&entries_dir, &entry)?)
    };

    info!("Posted entry {}", filename);
    Ok(PostOutcome {
        filename,
        path,
        entry,
    })
}

/// Picks the location to look up, command-line values first.
fn select_location_input(
    request: &PostRequest,
    directive: Option<&str>,
    config: &Config,
) -> AppResult<Option<LocationInput>> {
    if let Some(address) = &request.address {
        return LocationInput::parse(address).map(Some);
    }
    if let Some((latitude, longitude)) = request.coordinates {
        return LocationInput::coordinates(latitude, longitude).map(Some);
    }
    match request.location.as_deref().or(directive) {
        Some(text) => LocationInput::parse(expand_alias(text, &config.aliases)).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_aliases() -> Config {
        Config::from_toml_str(
            r#"
            [dayly]
            root = "/tmp/dayly-unused"
            [aliases]
            home = "(35.6586, 139.7454)"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_select_location_prefers_command_line() {
        let config = config_with_aliases();
        let request = PostRequest {
            location: Some("Kyoto".to_string()),
            ..PostRequest::default()
        };

        let input = select_location_input(&request, Some("Osaka"), &config).unwrap();
        assert_eq!(input, Some(LocationInput::Address("Kyoto".to_string())));
    }

    #[test]
    fn test_select_location_expands_directive_alias() {
        let config = config_with_aliases();
        let request = PostRequest::default();

        let input = select_location_input(&request, Some("home"), &config).unwrap();
        assert_eq!(
            input,
            Some(LocationInput::Coordinates {
                latitude: 35.6586,
                longitude: 139.7454
            })
        );
    }

    #[test]
    fn test_select_location_explicit_fields() {
        let config = config_with_aliases();
        let request = PostRequest {
            address: Some("Sapporo".to_string()),
            coordinates: Some((1.0, 2.0)),
            location: Some("home".to_string()),
            ..PostRequest::default()
        };
        assert_eq!(
            select_location_input(&request, None, &config).unwrap(),
            Some(LocationInput::Address("Sapporo".to_string()))
        );

        let request = PostRequest {
            coordinates: Some((100.0, 2.0)),
            ..PostRequest::default()
        };
        assert!(matches!(
            select_location_input(&request, None, &config),
            Err(AppError::InvalidCoordinateFormat(_))
        ));
    }

    #[test]
    fn test_select_location_none() {
        let config = config_with_aliases();
        assert_eq!(
            select_location_input(&PostRequest::default(), None, &config).unwrap(),
            None
        );
    }
}
