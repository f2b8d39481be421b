//! Timestamp normalization into a single comparable UTC instant.
//!
//! Zone-less inputs are taken as UTC. Every function here returns `None`
//! on failure and never panics.

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

use crate::config::SyslogYear;

// Python's asctime writes milliseconds after a comma: 10:30:45,123
static RE_COMMA_FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2}:\d{2}:\d{2}),(\d+)").unwrap());

/// Attempted in order: ISO-8601 (`T` separator), then space-separated.
/// Each accepts an optional fraction and an optional zone offset.
const ZONED_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

const APACHE_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";
const SYSLOG_FORMAT: &str = "%Y %b %e %H:%M:%S";

/// Parse a free-text timestamp.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let text = normalize_fraction(text);

    if let Ok(dt) = DateTime::parse_from_rfc3339(&text) {
        return Some(dt.with_timezone(&Utc));
    }
    for (zoned, naive) in ZONED_FORMATS.iter().zip(NAIVE_FORMATS.iter()) {
        if let Ok(dt) = DateTime::parse_from_str(&text, zoned) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(ndt) = NaiveDateTime::parse_from_str(&text, naive) {
            return Some(ndt.and_utc());
        }
    }
    None
}

/// Parse an access-log timestamp: `15/Jan/2024:10:30:45 +0000`.
pub fn parse_apache_timestamp(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(text.trim(), APACHE_FORMAT)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse a syslog timestamp (`Jan 15 10:30:45`, `Jan  5 10:30:45`), completing
/// the missing year per `policy`.
pub fn parse_syslog_timestamp(text: &str, policy: SyslogYear) -> Option<DateTime<Utc>> {
    let year = policy.resolve()?;
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    NaiveDateTime::parse_from_str(&format!("{year} {collapsed}"), SYSLOG_FORMAT)
        .ok()
        .map(|ndt| ndt.and_utc())
}

fn normalize_fraction(text: &str) -> Cow<'_, str> {
    if text.contains(',') {
        RE_COMMA_FRACTION.replace(text, "$1.$2")
    } else {
        Cow::Borrowed(text)
    }
}
