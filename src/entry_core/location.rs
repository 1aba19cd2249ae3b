//! Location inputs: coordinate pairs, address text and aliases.

use crate::errors::{AppError, AppResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use unicode_normalization::UnicodeNormalization;

static COORDINATES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\(\s*([+-]?\d+(?:\.\d+)?)\s*,\s*([+-]?\d+(?:\.\d+)?)\s*\)$")
        .expect("valid coordinates regex")
});

/// Glyphs that look like a hyphen and are folded into `-`.
const HYPHEN_LOOKALIKES: &[char] = &[
    '\u{2010}', // hyphen
    '\u{2011}', // non-breaking hyphen
    '\u{2012}', // figure dash
    '\u{2013}', // en dash
    '\u{2014}', // em dash
    '\u{2015}', // horizontal bar
    '\u{2043}', // hyphen bullet
    '\u{2212}', // minus sign
    '\u{FE58}', // small em dash
    '\u{FE63}', // small hyphen-minus
    '\u{FF0D}', // fullwidth hyphen-minus
];

/// What to look up for an entry's location.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationInput {
    /// Free-text address, resolved by forward geocoding.
    Address(String),
    /// Explicit coordinates, resolved by reverse geocoding.
    Coordinates {
        /// Degrees north
        latitude: f64,
        /// Degrees east
        longitude: f64,
    },
}

impl LocationInput {
    /// Parses a location argument or `@` directive.
    ///
    /// Text starting with `(` must be a `(latitude, longitude)` pair; anything
    /// else is taken as an address.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidCoordinateFormat` for a malformed or
    /// out-of-range pair, and `AppError::InvalidInput` for empty text.
    ///
    /// # Examples
    ///
    /// ```
    /// use dayly::entry_core::LocationInput;
    ///
    /// let input = LocationInput::parse("(35.6, 139.7)").unwrap();
    /// assert_eq!(input, LocationInput::Coordinates { latitude: 35.6, longitude: 139.7 });
    ///
    /// assert!(LocationInput::parse("(35.6,139.7").is_err());
    /// ```
    pub fn parse(text: &str) -> AppResult<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::InvalidInput("Location is empty".to_string()));
        }
        if !text.starts_with('(') {
            return Ok(LocationInput::Address(text.to_string()));
        }

        let invalid = || AppError::InvalidCoordinateFormat(text.to_string());
        let caps = COORDINATES_RE.captures(text).ok_or_else(invalid)?;
        let latitude: f64 = caps[1].parse().map_err(|_| invalid())?;
        let longitude: f64 = caps[2].parse().map_err(|_| invalid())?;
        Self::coordinates(latitude, longitude).map_err(|_| invalid())
    }

    /// Builds a coordinate input, checking the degree ranges.
    pub fn coordinates(latitude: f64, longitude: f64) -> AppResult<Self> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(AppError::InvalidCoordinateFormat(format!(
                "({}, {})",
                latitude, longitude
            )));
        }
        Ok(LocationInput::Coordinates {
            latitude,
            longitude,
        })
    }
}

/// Replaces a configured alias with its raw location string.
///
/// Text that is not an alias is returned unchanged.
pub fn expand_alias<'a>(text: &'a str, aliases: &'a HashMap<String, String>) -> &'a str {
    aliases.get(text.trim()).map(String::as_str).unwrap_or(text)
}

/// Normalizes an address for storage: NFKC, then hyphen look-alikes to `-`.
pub fn normalize_address(address: &str) -> String {
    address
        .nfkc()
        .map(|c| if HYPHEN_LOOKALIKES.contains(&c) { '-' } else { c })
        .collect()
}
