/*!
# Dayly

Dayly posts a single journal entry into a synced Dayly repository. The entry
text comes from the user, optionally prefixed with directive lines; location,
weather and a photo can be attached.

## Core Features

- Inline `!datetime` and `@location` directives
- Location lookup from an alias, an address or a coordinate pair
- Current weather for entries written within the last three hours
- JPEG photo import under collision-free names
- Deterministic rendering to the Dayly entry format

## Architecture

- `cli`: Command-line interface handling using clap
- `config`: Settings file loading and validation
- `errors`: Error handling infrastructure
- `entry_core`: Pure entry logic (identifiers, directives, the `Entry` record, rendering)
- `providers`: Geocoding and weather collaborators
- `resolve`: Location and weather resolution with their fallback rules
- `entry_io`: Photo import and entry file storage
- `ops`: The post pipeline tying everything together

## Usage Example

```rust
use dayly::entry_core::{extract_metadata, serialize, EntryBuilder, new_id};

let meta = extract_metadata("!20240101T120000\nNew year, new diary.");
let entry = EntryBuilder::new(new_id(), meta.body).build()?;

assert!(serialize(&entry).contains("<content>New year, new diary.</content>"));
# Ok::<(), dayly::AppError>(())
```
*/

/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// Pure entry logic
pub mod entry_core;
/// Entry and media storage
pub mod entry_io;
/// Error types and utilities for error handling
pub mod errors;
/// High-level operations
pub mod ops;
/// External geocoding and weather services
pub mod providers;
/// Location and weather resolution
pub mod resolve;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use entry_core::{Entry, EntryBuilder};
pub use errors::{AppError, AppResult};
