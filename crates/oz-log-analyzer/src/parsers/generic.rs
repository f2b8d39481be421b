//! Generic `YYYY-MM-DD HH:MM:SS LEVEL message` parser.

use crate::timestamp::parse_timestamp;
use crate::types::{LogFormat, LogLevel, LogRecord};

/// Parse a generic line: date, time, level, remainder.
///
/// A line whose leading tokens are not a timestamp degrades to a raw-only
/// record. A third token that is not a level stays part of the message.
pub fn parse(line: &str) -> LogRecord {
    let Some((timestamp, rest)) = leading_timestamp(line) else {
        return LogRecord::degraded(line, LogFormat::Generic);
    };

    let (level, message) = match next_token(rest) {
        Some((token, remainder)) => match LogLevel::parse(token) {
            Some(level) => (Some(level), remainder.trim()),
            None => (None, rest.trim()),
        },
        None => (None, ""),
    };

    let mut record = LogRecord::structured(line, message, LogFormat::Generic);
    record.timestamp = Some(timestamp);
    record.level = level;
    record
}

/// Timestamp from `date time` tokens, or from a single ISO-8601 token.
fn leading_timestamp(line: &str) -> Option<(chrono::DateTime<chrono::Utc>, &str)> {
    let (first, after_first) = next_token(line)?;
    if first.contains('T')
        && let Some(ts) = parse_timestamp(first)
    {
        return Some((ts, after_first));
    }
    let (second, after_second) = next_token(after_first)?;
    let ts = parse_timestamp(&format!("{first} {second}"))?;
    Some((ts, after_second))
}

/// Split off the next whitespace-delimited token, keeping the remainder's
/// internal spacing intact.
fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    Some((&s[..end], &s[end..]))
}
