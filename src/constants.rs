//! Constants used throughout the application.
//!
//! This module contains all constants used in the Dayly application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "dayly";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "Post an entry in a Dayly repository kept in a synced folder";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
/// Log level used when `--verbose` is given.
pub const VERBOSE_LOG_LEVEL: &str = "debug";

// Configuration Keys & Environment Variables
/// Environment variable naming the settings file.
pub const ENV_VAR_DAYLY_CONFIG: &str = "DAYLY_CONFIG";
/// Settings file used when neither `--conf` nor `DAYLY_CONFIG` is given.
pub const DEFAULT_CONFIG_PATH: &str = "~/.dayly.toml";
/// Default synced storage root.
pub const DEFAULT_STORAGE_ROOT: &str = "~/Dropbox/Apps/Dayly";
/// Default language for addresses and weather descriptions.
pub const DEFAULT_LANGUAGE: &str = "en";
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// Entry Format
/// Format version written into every entry.
pub const ENTRY_FORMAT_VERSION: &str = "1.0.3.3";
/// Number of random bytes in an identifier.
pub const ID_BYTES: usize = 20;
/// Constant flags value of an entry.
pub const ENTRY_FLAGS: &str = "0";
/// Constant status value of an entry.
pub const ENTRY_STATUS: &str = "1";
/// Sentinel for an absent secondary timestamp.
pub const TIMESTAMP_SENTINEL: i64 = -1;
/// Rendering of an absent field.
pub const MISSING_VALUE: &str = "nan";
/// Indentation per nesting level of the rendered entry.
pub const RENDER_INDENT: &str = "  ";
/// Media type of an attached photo.
pub const MEDIA_TYPE_PHOTO: &str = "photo";
/// Address stored when geocoding finds nothing.
pub const UNKNOWN_PLACE: &str = "unknown place";

// File System Parameters
/// File extension for entries.
pub const ENTRY_FILE_EXTENSION: &str = ".entry";
/// Extension of stored photos.
pub const PHOTO_FILE_EXTENSION: &str = ".jpg";
/// Entries sub-directory of the storage root.
pub const ENTRIES_SUBDIR: &str = "entries";
/// Photos sub-directory of the storage root.
pub const PHOTOS_SUBDIR: &str = "photos";

// Date/Time Logic
/// Compact timespec layout accepted by `--datetime` and `!` directives.
pub const TIMESPEC_FORMAT: &str = "%Y%m%dT%H%M%S";
/// Oldest age, in seconds, of an entry that still gets current weather.
pub const WEATHER_WINDOW_SECS: i64 = 3 * 60 * 60;

// Units
/// Feet per meter, for `altitude_unit = "feet"`.
pub const FEET_PER_METER: f64 = 3.280_84;

// Provider Endpoints
/// Google Maps API base URL.
pub const GOOGLE_MAPS_BASE_URL: &str = "https://maps.googleapis.com";
/// Nominatim API base URL.
pub const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";
/// Open-Elevation API base URL.
pub const OPEN_ELEVATION_BASE_URL: &str = "https://api.open-elevation.com";
/// OpenWeatherMap API base URL.
pub const OPENWEATHERMAP_BASE_URL: &str = "https://api.openweathermap.org";
/// User agent sent to the HTTP collaborators.
pub const HTTP_USER_AGENT: &str = concat!("dayly/", env!("CARGO_PKG_VERSION"));

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "dayly";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
