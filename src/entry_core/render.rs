//! Rendering entries into the Dayly markup format.
//!
//! The output is a tree of `<tag>value</tag>` lines indented two spaces per
//! level. Field order is fixed and absent values render as `nan`.

use crate::constants::{
    ENTRY_FLAGS, ENTRY_FORMAT_VERSION, ENTRY_STATUS, MISSING_VALUE, RENDER_INDENT,
    TIMESTAMP_SENTINEL,
};
use crate::entry_core::entry::Entry;
use chrono::{DateTime, Utc};
use std::fmt::Display;

/// Escapes `&`, `<` and `>` as HTML entities.
///
/// # Examples
///
/// ```
/// use dayly::entry_core::sanitize;
///
/// assert_eq!(sanitize("fish & <chips>"), "fish &amp; &lt;chips&gt;");
/// ```
pub fn sanitize(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Returns the first value that is present.
pub fn first_present<T: Copy>(candidates: &[Option<T>]) -> Option<T> {
    candidates.iter().find_map(|candidate| *candidate)
}

struct Writer {
    lines: Vec<String>,
}

impl Writer {
    fn open(&mut self, depth: usize, tag: &str) {
        self.lines
            .push(format!("{}<{}>", RENDER_INDENT.repeat(depth), tag));
    }

    fn close(&mut self, depth: usize, tag: &str) {
        self.lines
            .push(format!("{}</{}>", RENDER_INDENT.repeat(depth), tag));
    }

    fn field<V: Display>(&mut self, depth: usize, tag: &str, value: Option<V>) {
        let value = match value {
            Some(value) => value.to_string(),
            None => MISSING_VALUE.to_string(),
        };
        self.lines.push(format!(
            "{indent}<{tag}>{value}</{tag}>",
            indent = RENDER_INDENT.repeat(depth),
            tag = tag,
            value = value
        ));
    }

    // `{:?}` keeps the fraction of whole numbers: `68.0`, not `68`
    fn float(&mut self, depth: usize, tag: &str, value: Option<f64>) {
        self.field(depth, tag, value.map(|value| format!("{:?}", value)));
    }

    fn text(&mut self, depth: usize, tag: &str, value: Option<&str>) {
        self.field(depth, tag, value.map(sanitize));
    }
}

fn seconds(at: Option<DateTime<Utc>>) -> Option<i64> {
    at.map(|at| at.timestamp())
}

/// Renders `entry` as Dayly markup. Pure and deterministic.
pub fn serialize(entry: &Entry) -> String {
    let mut w = Writer { lines: Vec::new() };

    w.open(0, "entry");
    w.field(1, "version", Some(ENTRY_FORMAT_VERSION));
    w.field(
        1,
        "generated",
        seconds(first_present(&[entry.generated(), entry.occurred_at()])),
    );
    w.field(1, "id", Some(entry.id()));
    w.text(1, "content", Some(entry.content()));
    w.field(
        1,
        "datetime",
        seconds(first_present(&[entry.occurred_at(), entry.generated()])),
    );
    w.field(
        1,
        "timestamp",
        first_present(&[entry.timestamp(), Some(TIMESTAMP_SENTINEL)]),
    );
    w.field(1, "flags", Some(ENTRY_FLAGS));
    w.field(1, "status", Some(ENTRY_STATUS));

    if let Some(location) = entry.location() {
        w.open(1, "location");
        w.text(2, "address", location.address.as_deref());
        w.float(2, "latitude", location.latitude);
        w.float(2, "longitude", location.longitude);
        w.float(2, "altitude", location.altitude);
        w.close(1, "location");
    }

    if !entry.media().is_empty() {
        w.open(1, "media");
        for item in entry.media() {
            w.open(2, "item");
            w.text(3, "type", Some(item.kind.as_str()));
            w.text(3, "file", Some(item.filename.as_str()));
            w.text(3, "description", Some(item.description.as_str()));
            w.close(2, "item");
        }
        w.close(1, "media");
    }

    if let Some(weather) = entry.weather() {
        w.open(1, "weather");
        w.float(2, "humidity", weather.humidity);
        w.float(2, "temperature", weather.temperature);
        w.text(2, "skyline", weather.skyline.as_deref());
        w.text(2, "weather", weather.weather.as_deref());
        w.close(1, "weather");
    }

    w.close(0, "entry");
    w.lines.join("\n")
}
