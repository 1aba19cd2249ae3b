//! Error handling utilities for the dayly application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that abort building an entry, the convenience type
//! alias `AppResult`, and the error enums of the two external collaborators
//! (geocoding and weather).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents failures reported by a geocoding collaborator.
///
/// `NoResult` is recovered by the location resolver with a placeholder
/// address; every other variant aborts the build.
///
/// # Examples
///
/// ```
/// use dayly::errors::LocationError;
///
/// let error = LocationError::Service {
///     status: "REQUEST_DENIED".to_string(),
///     message: "The provided API key is invalid.".to_string(),
/// };
/// assert!(format!("{}", error).contains("REQUEST_DENIED"));
/// ```
#[derive(Debug, Error)]
pub enum LocationError {
    /// The lookup succeeded but matched nothing.
    #[error("No location matched the query")]
    NoResult,

    /// The geocoding service could not be reached.
    #[error("Geocoding request failed: {0}. Please check your network connection.")]
    Request(#[source] reqwest::Error),

    /// The geocoding service answered with an error status.
    #[error("Geocoding service returned {status}: {message}")]
    Service {
        /// Status code or keyword reported by the service
        status: String,
        /// Human-readable description from the service
        message: String,
    },

    /// The geocoding service answered with something we could not read.
    #[error("Invalid response from geocoding service: {0}")]
    InvalidResponse(String),
}

/// Represents failures reported by a weather collaborator.
///
/// These never abort a build: the weather resolver logs them and leaves the
/// entry without weather.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The weather service could not be reached.
    #[error("Weather request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The weather service answered with an error status.
    #[error("Weather service returned {status}: {message}")]
    Service {
        /// HTTP status reported by the service
        status: String,
        /// Body or message from the service
        message: String,
    },

    /// The weather service answered with something we could not read.
    #[error("Invalid response from weather service: {0}")]
    InvalidResponse(String),
}

/// Represents all errors that abort posting an entry.
///
/// This enum is the central error type used across the application, with variants
/// for different error categories. It uses `thiserror` for deriving the `Error` trait
/// implementation and formatted error messages.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use dayly::errors::AppError;
///
/// let error = AppError::Config("Storage root must be absolute".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Storage root must be absolute");
/// ```
///
/// Converting from an IO error:
/// ```
/// use dayly::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The settings file does not exist.
    #[error("Configuration file not found: {path}. Create it or pass --conf <path>.")]
    MissingConfiguration {
        /// The path that was looked up
        path: PathBuf,
    },

    /// Input/output errors from filesystem operations.
    ///
    /// This variant automatically converts from `std::io::Error` through the `From` trait.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A date/time override that could not be parsed.
    #[error("Invalid date/time '{0}'. Expected YYYYmmddTHHMMSS")]
    InvalidTimespec(String),

    /// A parenthesised location that is not a valid `(latitude, longitude)` pair.
    #[error("Invalid coordinates '{0}'. Expected (latitude, longitude)")]
    InvalidCoordinateFormat(String),

    /// A photo that is not a JPEG file.
    #[error("Unsupported media type: {path}. Photo must be *.jpg or *.jpeg")]
    UnsupportedMediaType {
        /// The rejected photo path
        path: PathBuf,
    },

    /// Command-line or directive values that cannot be combined or parsed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Geocoding failures other than "no result".
    ///
    /// This variant uses a dedicated LocationError type to provide detailed
    /// information about what went wrong with the geocoding collaborator.
    #[error("Location error: {0}")]
    Location(#[from] LocationError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use dayly::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::InvalidInput("Something went wrong".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;
