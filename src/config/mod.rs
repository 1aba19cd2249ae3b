//! Configuration management for the dayly application.
//!
//! This module handles loading and validating the TOML settings file. It
//! supplies the default language and time zone, the synced storage root, the
//! geocoding and weather provider settings, and the location alias table.
//!
//! # Settings File Lookup
//!
//! 1. The `--conf <path>` command-line option
//! 2. The `DAYLY_CONFIG` environment variable
//! 3. `~/.dayly.toml`
//!
//! `~` and environment variable references are expanded with `shellexpand`.

use crate::constants::{
    DEFAULT_CONFIG_PATH, DEFAULT_LANGUAGE, DEFAULT_STORAGE_ROOT, ENTRIES_SUBDIR,
    ENV_VAR_DAYLY_CONFIG, FEET_PER_METER, PHOTOS_SUBDIR, REDACTED_PLACEHOLDER,
};
use crate::entry_core::Zone;
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Unit altitudes are stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AltitudeUnit {
    #[default]
    Meters,
    Feet,
}

impl AltitudeUnit {
    /// Converts an elevation in meters into this unit.
    pub fn convert_meters(&self, meters: f64) -> f64 {
        match self {
            AltitudeUnit::Meters => meters,
            AltitudeUnit::Feet => (meters * FEET_PER_METER * 100.0).round() / 100.0,
        }
    }
}

/// Which geocoding service answers location lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeocodingProvider {
    Google,
    #[default]
    Nominatim,
}

/// The `[geocoding]` table.
#[derive(Clone, Default, Deserialize)]
pub struct GeocodingSettings {
    #[serde(default)]
    pub provider: GeocodingProvider,
    pub apikey: Option<String>,
    pub base_url: Option<String>,
    pub elevation_url: Option<String>,
}

/// The `[openweathermap]` table. Weather lookups are off without an API key.
#[derive(Clone, Default, Deserialize)]
pub struct WeatherSettings {
    pub apikey: Option<String>,
    pub base_url: Option<String>,
}

impl fmt::Debug for GeocodingSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeocodingSettings")
            .field("provider", &self.provider)
            .field("apikey", &self.apikey.as_ref().map(|_| REDACTED_PLACEHOLDER))
            .field("base_url", &self.base_url)
            .field("elevation_url", &self.elevation_url)
            .finish()
    }
}

impl fmt::Debug for WeatherSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherSettings")
            .field("apikey", &self.apikey.as_ref().map(|_| REDACTED_PLACEHOLDER))
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
struct DaylySection {
    language: Option<String>,
    timezone: Option<String>,
    root: Option<String>,
    altitude_unit: Option<AltitudeUnit>,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    dayly: DaylySection,
    #[serde(default)]
    geocoding: GeocodingSettings,
    #[serde(default)]
    openweathermap: WeatherSettings,
    #[serde(default)]
    aliases: HashMap<String, String>,
}

/// Configuration for the dayly application.
///
/// # Examples
///
/// Parsing settings text directly:
/// ```
/// use dayly::Config;
///
/// let config = Config::from_toml_str(r#"
///     [dayly]
///     language = "ja"
///     root = "/srv/dropbox/Apps/Dayly"
///
///     [aliases]
///     home = "(35.6586, 139.7454)"
/// "#).unwrap();
///
/// assert_eq!(config.language, "ja");
/// assert_eq!(config.aliases["home"], "(35.6586, 139.7454)");
/// ```
#[derive(Clone)]
pub struct Config {
    /// Language for addresses and weather descriptions.
    pub language: String,

    /// Zone naive entry times are read in.
    pub zone: Zone,

    /// Synced storage root holding `entries/` and `photos/`.
    pub storage_root: PathBuf,

    /// Unit altitudes are stored in.
    pub altitude_unit: AltitudeUnit,

    /// Geocoding provider selection.
    pub geocoding: GeocodingSettings,

    /// Weather provider settings.
    pub weather: WeatherSettings,

    /// Short names for addresses or coordinate pairs.
    pub aliases: HashMap<String, String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("language", &self.language)
            .field("zone", &self.zone)
            .field("storage_root", &"[REDACTED_PATH]")
            .field("altitude_unit", &self.altitude_unit)
            .field("geocoding", &self.geocoding)
            .field("weather", &self.weather)
            .field("aliases", &self.aliases.len())
            .finish()
    }
}

impl Config {
    /// Works out which settings file to read.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the path expansion fails.
    pub fn resolve_path(explicit: Option<&str>) -> AppResult<PathBuf> {
        let raw = match explicit {
            Some(path) => path.to_string(),
            None => env::var(ENV_VAR_DAYLY_CONFIG).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string()),
        };
        expand_path(&raw)
    }

    /// Loads the settings file.
    ///
    /// # Errors
    ///
    /// - `AppError::MissingConfiguration` if the file does not exist
    /// - `AppError::Io` if it cannot be read
    /// - `AppError::Config` if it is not valid settings TOML
    pub fn load(explicit: Option<&str>) -> AppResult<Self> {
        let path = Self::resolve_path(explicit)?;
        Self::load_from(&path)
    }

    /// Loads a settings file from a resolved path.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.is_file() {
            return Err(AppError::MissingConfiguration {
                path: path.to_path_buf(),
            });
        }
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Builds a configuration from settings text, applying defaults.
    pub fn from_toml_str(text: &str) -> AppResult<Self> {
        let file: SettingsFile = toml::from_str(text)
            .map_err(|e| AppError::Config(format!("Invalid settings file: {}", e)))?;

        let root = file
            .dayly
            .root
            .unwrap_or_else(|| DEFAULT_STORAGE_ROOT.to_string());

        Ok(Config {
            language: file
                .dayly
                .language
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            zone: Zone::from_name(file.dayly.timezone.as_deref())?,
            storage_root: expand_path(&root)?,
            altitude_unit: file.dayly.altitude_unit.unwrap_or_default(),
            geocoding: file.geocoding,
            weather: file.openweathermap,
            aliases: file.aliases,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Storage root must be an absolute path" if the root is relative
    /// - "Language is empty" if the language is blank
    /// - "geocoding.apikey is required for the google provider"
    pub fn validate(&self) -> AppResult<()> {
        if !self.storage_root.is_absolute() {
            return Err(AppError::Config(
                "Storage root must be an absolute path".to_string(),
            ));
        }

        if self.language.trim().is_empty() {
            return Err(AppError::Config("Language is empty".to_string()));
        }

        if self.geocoding.provider == GeocodingProvider::Google && self.geocoding.apikey.is_none() {
            return Err(AppError::Config(
                "geocoding.apikey is required for the google provider".to_string(),
            ));
        }

        Ok(())
    }

    /// Directory entries are written to.
    pub fn entries_dir(&self) -> PathBuf {
        self.storage_root.join(ENTRIES_SUBDIR)
    }

    /// Directory photos are copied to.
    pub fn photos_dir(&self) -> PathBuf {
        self.storage_root.join(PHOTOS_SUBDIR)
    }
}

fn expand_path(raw: &str) -> AppResult<PathBuf> {
    let expanded = shellexpand::full(raw)
        .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
    Ok(PathBuf::from(expanded.into_owned()))
}
