//! Leading directive lines of an entry's text.
//!
//! Only the first two lines are inspected. A line starting with `!` carries a
//! date/time override and a line starting with `@` carries a location
//! override; matched lines are dropped from the body.

/// Number of leading lines scanned for directives.
const DIRECTIVE_LINES: usize = 2;

/// Overrides and body extracted from raw entry text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Metadata {
    /// Date/time override from a `!` line.
    pub timespec: Option<String>,
    /// Location override from an `@` line.
    pub location: Option<String>,
    /// Text with the directive lines removed.
    pub body: String,
}

/// Splits directive lines off the start of `raw`.
///
/// Blank lines are preserved and the remaining lines are re-joined with `\n`.
/// A later directive of the same kind replaces an earlier one.
///
/// # Examples
///
/// ```
/// use dayly::entry_core::extract_metadata;
///
/// let meta = extract_metadata("!20240101T120000\n@Tokyo\nHello");
/// assert_eq!(meta.timespec.as_deref(), Some("20240101T120000"));
/// assert_eq!(meta.location.as_deref(), Some("Tokyo"));
/// assert_eq!(meta.body, "Hello");
/// ```
pub fn extract_metadata(raw: &str) -> Metadata {
    let mut meta = Metadata::default();
    let mut body = Vec::new();

    for (index, line) in raw.split('\n').enumerate() {
        if index < DIRECTIVE_LINES {
            if let Some(rest) = line.strip_prefix('!') {
                meta.timespec = Some(rest.trim().to_string());
                continue;
            }
            if let Some(rest) = line.strip_prefix('@') {
                meta.location = Some(rest.trim().to_string());
                continue;
            }
        }
        body.push(line);
    }

    meta.body = body.join("\n");
    meta
}
