/*!
# Dayly - post a journal entry from the command line

Reads the entry text from standard input, resolves its location and weather,
imports an optional photo, and writes the entry into the `entries/`
directory of a synced Dayly storage root.

## Usage

```
echo "Lunch with Ann" | dayly [OPTIONS] [LOCATION]

Options:
  -c, --conf <PATH>             Read settings from <PATH>
  -d, --datetime <TIMESPEC>     Set the entry date/time (YYYYmmddTHHMMSS)
  -p, --photo <PATH>            Attach a JPEG photo
  -l, --language <LANGUAGE>     Language for address and weather
  -f, --filename                Print the path of the written entry
  -n, --dry-run                 Show what would be written
  -v, --verbose                 Enable verbose output
  -V, --version                 Print version information
```
*/

use chrono::Utc;
use clap::Parser;
use dayly::cli::CliArgs;
use dayly::config::Config;
use dayly::constants::{
    DEFAULT_LOG_LEVEL, LOG_FORMAT_JSON, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME,
    VERBOSE_LOG_LEVEL,
};
use dayly::errors::AppResult;
use dayly::ops::{post_entry, Services};
use dayly::providers::{geocoder_from_settings, weather_from_settings};
use std::io::{self, Read, Write};
use tracing::{debug, info, info_span};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// The main entry point for the dayly application.
///
/// Failures are reported once, as `Error: <reason>` on stderr, with exit
/// status 1.
fn main() {
    let args = CliArgs::parse();
    init_tracing(&args);

    let correlation_id = Uuid::new_v4();
    let span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service_name = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = span.enter();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber on stderr; stdout is reserved for
/// the filename echo and the dry-run report.
fn init_tracing(args: &CliArgs) {
    let filter = if args.verbose {
        EnvFilter::new(VERBOSE_LOG_LEVEL)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if args.log_format == LOG_FORMAT_JSON {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Runs one invocation:
/// 1. Loads and validates configuration
/// 2. Reads the entry text from stdin
/// 3. Sets up the configured geocoding and weather services
/// 4. Posts the entry
fn run(args: &CliArgs) -> AppResult<()> {
    info!("Starting dayly");
    debug!("CLI arguments: {:?}", args);

    let config = Config::load(args.conf.as_deref())?;
    config.validate()?;
    debug!("Configuration: {:?}", config);

    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    let request = args.to_post_request(text.trim().to_string())?;

    let geocoder = geocoder_from_settings(&config.geocoding)?;
    let weather = weather_from_settings(&config.weather);
    let services = Services {
        geocoder: geocoder.as_ref(),
        weather: weather.as_ref(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = post_entry(&config, &services, request, Utc::now(), &mut out)?;

    if args.filename {
        if let Some(path) = &outcome.path {
            writeln!(out, "{}", path.display())?;
        }
    }
    Ok(())
}
