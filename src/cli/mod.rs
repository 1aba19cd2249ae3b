use crate::constants::{APP_DESCRIPTION, APP_NAME, LOG_FORMAT_JSON, LOG_FORMAT_TEXT};
use crate::entry_core::{parse_humidity, parse_temperature, Weather};
use crate::errors::AppResult;
use crate::ops::PostRequest;
use clap::Parser;
use std::path::PathBuf;

/// Post an entry in a Dayly repository kept in a synced folder.
///
/// The entry text is read from standard input. Its first two lines may hold
/// directives: `!YYYYmmddTHHMMSS` sets the date/time, `@<location>` sets the
/// location.
#[derive(Parser, Debug)]
#[clap(name = APP_NAME, about = APP_DESCRIPTION)]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    /// Location: an alias, an address or "(latitude, longitude)"
    #[clap(conflicts_with_all = &["address", "latitude", "longitude"])]
    pub location: Option<String>,

    /// Read settings from <PATH> [default: $DAYLY_CONFIG or ~/.dayly.toml]
    #[clap(short = 'c', long = "conf", value_name = "PATH")]
    pub conf: Option<String>,

    /// Set the entry date/time (format: YYYYmmddTHHMMSS)
    #[clap(short = 'd', long, value_name = "TIMESPEC")]
    pub datetime: Option<String>,

    /// Set the secondary timestamp marker
    #[clap(long, allow_negative_numbers = true)]
    pub timestamp: Option<i64>,

    /// Set the address to geocode
    #[clap(long)]
    pub address: Option<String>,

    /// Set the latitude in degrees (requires --longitude)
    #[clap(long, requires = "longitude", allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    /// Set the longitude in degrees (requires --latitude)
    #[clap(long, requires = "latitude", allow_negative_numbers = true)]
    pub longitude: Option<f64>,

    /// Set the altitude instead of looking it up
    #[clap(long, allow_negative_numbers = true)]
    pub altitude: Option<f64>,

    /// Set the humidity in percent (e.g. 55 or 55%)
    #[clap(long)]
    pub humidity: Option<String>,

    /// Set the temperature (e.g. 68F, 20C; bare numbers are Fahrenheit)
    #[clap(long, allow_hyphen_values = true)]
    pub temperature: Option<String>,

    /// Set the short weather category (e.g. Clouds)
    #[clap(long)]
    pub skyline: Option<String>,

    /// Set the weather description
    #[clap(long)]
    pub weather: Option<String>,

    /// Attach the JPEG photo at <PATH>
    #[clap(short = 'p', long, value_name = "PATH")]
    pub photo: Option<String>,

    /// Caption for the attached photo
    #[clap(long, default_value = "")]
    pub photo_description: String,

    /// Language for the address and weather description
    #[clap(short = 'l', long)]
    pub language: Option<String>,

    /// Print the path of the written entry
    #[clap(short = 'f', long)]
    pub filename: bool,

    /// Show what would be written without touching storage
    #[clap(short = 'n', long, alias = "debug")]
    pub dry_run: bool,

    /// Print verbose output
    #[clap(short = 'v', long)]
    pub verbose: bool,

    /// Log output format
    #[clap(long, default_value = LOG_FORMAT_TEXT, value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON])]
    pub log_format: String,
}

impl CliArgs {
    /// Manual weather fields given on the command line.
    pub fn manual_weather(&self) -> AppResult<Weather> {
        Ok(Weather {
            humidity: self.humidity.as_deref().map(parse_humidity).transpose()?,
            temperature: self
                .temperature
                .as_deref()
                .map(parse_temperature)
                .transpose()?,
            skyline: self.skyline.clone(),
            weather: self.weather.clone(),
        })
    }

    /// Turns the arguments and the entry text into a post request.
    pub fn to_post_request(&self, text: String) -> AppResult<PostRequest> {
        Ok(PostRequest {
            text,
            datetime: self.datetime.clone(),
            location: self.location.clone(),
            address: self.address.clone(),
            coordinates: self.latitude.zip(self.longitude),
            altitude: self.altitude,
            weather: self.manual_weather()?,
            timestamp: self.timestamp,
            photo: self
                .photo
                .as_deref()
                .map(|path| PathBuf::from(shellexpand::tilde(path).into_owned())),
            photo_description: self.photo_description.clone(),
            language: self.language.clone(),
            dry_run: self.dry_run,
        })
    }
}
