//! Random identifiers for entries and stored media.

use crate::constants::ID_BYTES;
use rand::Rng;
use std::fmt::Write;

/// Returns a new identifier: `ID_BYTES` random bytes as upper-case hex.
///
/// Every byte contributes two digits, so the result is always exactly
/// `2 * ID_BYTES` characters, leading zeros included.
///
/// # Examples
///
/// ```
/// use dayly::entry_core::new_id;
///
/// let id = new_id();
/// assert_eq!(id.len(), 40);
/// assert!(id.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
/// ```
pub fn new_id() -> String {
    let bytes: [u8; ID_BYTES] = rand::thread_rng().gen();
    let mut id = String::with_capacity(ID_BYTES * 2);
    for byte in bytes {
        // Writing into a String cannot fail
        let _ = write!(id, "{:02X}", byte);
    }
    id
}
