//! Weather normalization and the staleness window.

use crate::constants::WEATHER_WINDOW_SECS;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};

/// Whether current conditions are a fair description of `occurred_at`.
///
/// Only entries between zero and three hours old qualify; future entries and
/// older ones get no weather.
pub fn weather_window_allows(occurred_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    let elapsed = now.signed_duration_since(occurred_at).num_seconds();
    (0..=WEATHER_WINDOW_SECS).contains(&elapsed)
}

/// Converts Celsius to Fahrenheit, rounded to two decimals.
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    round2(celsius * 9.0 / 5.0 + 32.0)
}

/// Converts a 0-100 percentage into a 0.0-1.0 fraction.
pub fn percent_to_fraction(percent: f64) -> f64 {
    percent / 100.0
}

/// Capitalizes every whitespace-separated word, lower-casing the rest of it.
///
/// # Examples
///
/// ```
/// use dayly::entry_core::capitalize_words;
///
/// assert_eq!(capitalize_words("light  RAIN"), "Light Rain");
/// ```
pub fn capitalize_words(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Parses a manual temperature into Fahrenheit.
///
/// A `C` suffix converts from Celsius; an `F` suffix or a bare number is
/// already Fahrenheit.
pub fn parse_temperature(text: &str) -> AppResult<f64> {
    let trimmed = text.trim();
    let invalid = || AppError::InvalidInput(format!("Invalid temperature '{}'", text));

    if let Some(celsius) = trimmed
        .strip_suffix('C')
        .or_else(|| trimmed.strip_suffix('c'))
    {
        let celsius: f64 = celsius.trim().parse().map_err(|_| invalid())?;
        return Ok(celsius_to_fahrenheit(celsius));
    }
    let fahrenheit = trimmed
        .strip_suffix('F')
        .or_else(|| trimmed.strip_suffix('f'))
        .unwrap_or(trimmed);
    fahrenheit.trim().parse().map_err(|_| invalid())
}

/// Parses a manual humidity percentage (`55` or `55%`) into a fraction.
pub fn parse_humidity(text: &str) -> AppResult<f64> {
    let invalid = || AppError::InvalidInput(format!("Invalid humidity '{}'", text));
    let percent: f64 = text
        .trim()
        .trim_end_matches('%')
        .trim()
        .parse()
        .map_err(|_| invalid())?;
    if !(0.0..=100.0).contains(&percent) {
        return Err(invalid());
    }
    Ok(percent_to_fraction(percent))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
