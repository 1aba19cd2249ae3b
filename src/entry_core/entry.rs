//! The entry record and its builder.
//!
//! An `Entry` is assembled once through `EntryBuilder` and is immutable
//! afterwards; `EntryBuilder::build` is the only way to obtain one, so an
//! entry whose weather has no coordinates to belong to cannot exist.

use crate::constants::{ENTRY_FILE_EXTENSION, ID_BYTES, MEDIA_TYPE_PHOTO};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};

/// Where an entry was written. Each field may be unknown on its own.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Location {
    /// Normalized address text.
    pub address: Option<String>,
    /// Degrees north.
    pub latitude: Option<f64>,
    /// Degrees east.
    pub longitude: Option<f64>,
    /// Altitude in the configured unit.
    pub altitude: Option<f64>,
}

impl Location {
    /// Latitude and longitude, when both are known.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// Conditions at the time of writing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Weather {
    /// Relative humidity as a 0.0-1.0 fraction.
    pub humidity: Option<f64>,
    /// Temperature in degrees Fahrenheit.
    pub temperature: Option<f64>,
    /// Short category, e.g. `Clouds`.
    pub skyline: Option<String>,
    /// Human-readable description, e.g. `Broken Clouds`.
    pub weather: Option<String>,
}

impl Weather {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.humidity.is_none()
            && self.temperature.is_none()
            && self.skyline.is_none()
            && self.weather.is_none()
    }

    /// Fields of `overrides` replace the corresponding fields of `self`.
    pub fn overridden_by(self, overrides: &Weather) -> Weather {
        Weather {
            humidity: overrides.humidity.or(self.humidity),
            temperature: overrides.temperature.or(self.temperature),
            skyline: overrides.skyline.clone().or(self.skyline),
            weather: overrides.weather.clone().or(self.weather),
        }
    }
}

/// A file attached to an entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Media {
    /// Media type, `photo` for images.
    pub kind: String,
    /// Basename inside the photos directory.
    pub filename: String,
    /// Free-text caption.
    pub description: String,
}

impl Media {
    /// A photo stored under `filename`.
    pub fn photo(filename: impl Into<String>, description: impl Into<String>) -> Self {
        Media {
            kind: MEDIA_TYPE_PHOTO.to_string(),
            filename: filename.into(),
            description: description.into(),
        }
    }
}

/// One diary entry, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    id: String,
    generated: Option<DateTime<Utc>>,
    occurred_at: Option<DateTime<Utc>>,
    content: String,
    timestamp: Option<i64>,
    location: Option<Location>,
    weather: Option<Weather>,
    media: Vec<Media>,
}

impl Entry {
    /// Fixed-width hexadecimal identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// When this record was generated.
    pub fn generated(&self) -> Option<DateTime<Utc>> {
        self.generated
    }

    /// When the described events happened.
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        self.occurred_at
    }

    /// Raw (unescaped) entry text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Secondary numeric marker.
    pub fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn weather(&self) -> Option<&Weather> {
        self.weather.as_ref()
    }

    pub fn media(&self) -> &[Media] {
        &self.media
    }

    /// Name of the file this entry is stored in: `{id}.entry`.
    pub fn filename(&self) -> String {
        format!("{}{}", self.id, ENTRY_FILE_EXTENSION)
    }
}

/// Accumulates the parts of an `Entry`.
///
/// # Examples
///
/// ```
/// use dayly::entry_core::{EntryBuilder, Location};
///
/// let entry = EntryBuilder::new("ABC", "Hello")
///     .location(Location {
///         address: Some("Tokyo".to_string()),
///         ..Location::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(entry.id().len(), 40);
/// assert!(entry.id().ends_with("ABC"));
/// assert_eq!(entry.filename(), format!("{}.entry", entry.id()));
/// ```
#[derive(Debug, Clone)]
pub struct EntryBuilder {
    id: String,
    generated: Option<DateTime<Utc>>,
    occurred_at: Option<DateTime<Utc>>,
    content: String,
    timestamp: Option<i64>,
    location: Option<Location>,
    weather: Option<Weather>,
    media: Vec<Media>,
}

impl EntryBuilder {
    /// Starts an entry stamped with the current time.
    ///
    /// `id` is left-padded with zeros to the fixed identifier width.
    pub fn new(id: impl AsRef<str>, content: impl Into<String>) -> Self {
        EntryBuilder {
            id: format!("{:0>width$}", id.as_ref(), width = ID_BYTES * 2),
            generated: Some(Utc::now()),
            occurred_at: None,
            content: content.into(),
            timestamp: None,
            location: None,
            weather: None,
            media: Vec::new(),
        }
    }

    /// Identifier the built entry will carry.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn generated(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.generated = at;
        self
    }

    pub fn occurred_at(mut self, at: DateTime<Utc>) -> Self {
        self.occurred_at = Some(at);
        self
    }

    pub fn timestamp(mut self, timestamp: Option<i64>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Attaches weather; an empty record is ignored.
    pub fn weather(mut self, weather: Weather) -> Self {
        if !weather.is_empty() {
            self.weather = Some(weather);
        }
        self
    }

    pub fn media(mut self, media: Media) -> Self {
        self.media.push(media);
        self
    }

    /// Finishes the entry.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidInput` when weather is attached without a
    /// location that has both coordinates.
    pub fn build(self) -> AppResult<Entry> {
        if self.weather.is_some()
            && self
                .location
                .as_ref()
                .and_then(Location::coordinates)
                .is_none()
        {
            return Err(AppError::InvalidInput(
                "Weather requires a location with latitude and longitude".to_string(),
            ));
        }

        Ok(Entry {
            id: self.id,
            generated: self.generated,
            occurred_at: self.occurred_at,
            content: self.content,
            timestamp: self.timestamp,
            location: self.location,
            weather: self.weather,
            media: self.media,
        })
    }
}
