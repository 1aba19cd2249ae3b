//! Date/time overrides and the zone they are read in.

use crate::constants::TIMESPEC_FORMAT;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Parses a `YYYYmmddTHHMMSS` timespec into a naive local date/time.
///
/// `-` and `:` separators are ignored and a space may stand in for `T`, so
/// `2024-01-01 12:00:00` is accepted as well.
///
/// # Errors
///
/// Returns `AppError::InvalidTimespec` when the text is not a valid date/time.
///
/// # Examples
///
/// ```
/// use dayly::entry_core::parse_timespec;
///
/// let dt = parse_timespec("2024-01-01T12:30:00").unwrap();
/// assert_eq!(dt.to_string(), "2024-01-01 12:30:00");
/// ```
pub fn parse_timespec(spec: &str) -> AppResult<NaiveDateTime> {
    let compact: String = spec
        .trim()
        .chars()
        .filter(|c| *c != '-' && *c != ':')
        .map(|c| if c == ' ' { 'T' } else { c })
        .collect();

    NaiveDateTime::parse_from_str(&compact, TIMESPEC_FORMAT)
        .map_err(|_| AppError::InvalidTimespec(spec.to_string()))
}

/// The zone naive entry times are interpreted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    /// The system's local zone.
    #[default]
    Local,
    /// A named IANA zone from the settings file.
    Named(Tz),
}

impl Zone {
    /// Looks up a zone by IANA name, falling back to the system zone when absent.
    pub fn from_name(name: Option<&str>) -> AppResult<Self> {
        match name {
            None => Ok(Zone::Local),
            Some(name) => name
                .parse::<Tz>()
                .map(Zone::Named)
                .map_err(|_| AppError::Config(format!("Unknown time zone: {}", name))),
        }
    }

    /// Places a naive wall-clock time in this zone.
    ///
    /// Ambiguous times (DST fold) take the earlier instant.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidTimespec` for times skipped by a DST gap.
    pub fn to_utc(&self, naive: NaiveDateTime) -> AppResult<DateTime<Utc>> {
        let resolved = match self {
            Zone::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            Zone::Named(tz) => tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        };
        resolved.ok_or_else(|| AppError::InvalidTimespec(naive.to_string()))
    }
}
