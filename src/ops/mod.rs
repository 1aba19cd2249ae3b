//! High-level operations for posting Dayly entries.
//!
//! This module provides the user-facing operation that orchestrates the core
//! functionality: metadata extraction, location and weather resolution, media
//! import and entry storage.

pub mod post;

// Re-export commonly used items
pub use post::{post_entry, PostOutcome, PostRequest, Services};
