//! Entry I/O operations and file management.
//!
//! This module contains all the filesystem work of posting an entry: making
//! sure the storage layout exists, copying photos into the media store under
//! collision-free names, and writing the rendered entry file.

use crate::constants::PHOTO_FILE_EXTENSION;
use crate::entry_core::{new_id, serialize, Entry};
use crate::errors::{AppError, AppResult};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Ensures a storage directory exists, creating it if necessary.
///
/// # Errors
///
/// Returns:
/// - `AppError::Config` if the provided path is not an absolute path
/// - `AppError::Io` if the directory creation fails
pub fn ensure_directory_exists(dir: &Path) -> AppResult<()> {
    if !dir.is_absolute() {
        return Err(AppError::Config(format!(
            "Storage directory path must be absolute: {}",
            dir.display()
        )));
    }

    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| {
            AppError::Io(io::Error::new(
                e.kind(),
                format!("Failed to create storage directory: {}", e),
            ))
        })?;
        debug!("Created storage directory");
    }
    Ok(())
}

/// Checks that `source` is a JPEG and returns the extension to store it under.
///
/// The check is case-insensitive and `.jpeg` is stored as `.jpg`.
///
/// # Errors
///
/// Returns `AppError::UnsupportedMediaType` for any other extension.
///
/// # Examples
///
/// ```
/// use dayly::entry_io::photo_extension;
/// use std::path::Path;
///
/// assert_eq!(photo_extension(Path::new("IMG_0001.JPEG")).unwrap(), ".jpg");
/// assert!(photo_extension(Path::new("scan.png")).is_err());
/// ```
pub fn photo_extension(source: &Path) -> AppResult<&'static str> {
    let extension = source
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => Ok(PHOTO_FILE_EXTENSION),
        _ => Err(AppError::UnsupportedMediaType {
            path: source.to_path_buf(),
        }),
    }
}

/// Copies a photo into `photos_dir` under a fresh `{id}_{entry_id}.jpg` name.
///
/// In dry-run mode the copy is only reported to `out`. Returns the basename
/// of the stored photo.
///
/// # Errors
///
/// - `AppError::UnsupportedMediaType` if `source` is not a JPEG
/// - `AppError::Io` if `source` does not exist or the copy fails
pub fn attach_media(
    source: &Path,
    photos_dir: &Path,
    entry_id: &str,
    dry_run: bool,
    out: &mut dyn Write,
) -> AppResult<String> {
    attach_media_with(source, photos_dir, entry_id, dry_run, out, new_id)
}

/// `attach_media` with a caller-supplied identifier source.
pub fn attach_media_with<F>(
    source: &Path,
    photos_dir: &Path,
    entry_id: &str,
    dry_run: bool,
    out: &mut dyn Write,
    mut next_id: F,
) -> AppResult<String>
where
    F: FnMut() -> String,
{
    let extension = photo_extension(source)?;

    if !source.is_file() {
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Photo not found: {}", source.display()),
        )));
    }

    // Not atomic: another process may claim the same name after this check
    let target = loop {
        let candidate = photos_dir.join(format!("{}_{}{}", next_id(), entry_id, extension));
        if !candidate.exists() {
            break candidate;
        }
        debug!("Generated photo name already taken; retrying");
    };

    if dry_run {
        writeln!(out, "----- copy {} to {}", source.display(), target.display())?;
    } else {
        fs::copy(source, &target)?;
        debug!("Copied photo into media store");
    }

    target
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| AppError::InvalidInput(format!("Invalid photo name: {}", target.display())))
}

/// Writes the rendered entry as `{id}.entry` inside `entries_dir`.
///
/// The text goes to a temporary file first and is renamed into place, so
/// the entry file either appears complete or not at all. An existing file
/// of the same name is never replaced.
///
/// # Errors
///
/// Returns `AppError::Io` if the file cannot be written.
pub fn write_entry(entries_dir: &Path, entry: &Entry) -> AppResult<PathBuf> {
    let path = entries_dir.join(entry.filename());

    let mut staged = NamedTempFile::new_in(entries_dir)?;
    staged.write_all(serialize(entry).as_bytes())?;
    staged.as_file().sync_all()?;
    staged.persist_noclobber(&path).map_err(|e| AppError::Io(e.error))?;

    debug!("Wrote entry file");
    Ok(path)
}

/// Writes the dry-run report of an entry: its filename, then each rendered
/// line prefixed with `| `.
pub fn report_entry(entry: &Entry, out: &mut dyn Write) -> AppResult<()> {
    writeln!(out, "{}", entry.filename())?;
    for line in serialize(entry).lines() {
        writeln!(out, "| {}", line)?;
    }
    Ok(())
}
