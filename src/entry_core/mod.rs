//! Core entry functionality without I/O operations.
//!
//! This module contains the pure logic of building a Dayly entry: identifier
//! generation, directive extraction, timespec parsing, location and weather
//! normalization, the `Entry` record itself and its rendering.

pub mod entry;
pub mod id;
pub mod location;
pub mod metadata;
pub mod render;
pub mod timespec;
pub mod weather;

pub use entry::{Entry, EntryBuilder, Location, Media, Weather};
pub use id::new_id;
pub use location::{expand_alias, normalize_address, LocationInput};
pub use metadata::{extract_metadata, Metadata};
pub use render::{first_present, sanitize, serialize};
pub use timespec::{parse_timespec, Zone};
pub use weather::{
    capitalize_words, celsius_to_fahrenheit, parse_humidity, parse_temperature,
    percent_to_fraction, weather_window_allows,
};
