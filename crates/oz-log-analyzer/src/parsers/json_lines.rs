//! Newline-delimited JSON (NDJSON) log parser.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::timestamp::parse_timestamp;
use crate::types::{LogFormat, LogLevel, LogRecord};

const MESSAGE_KEYS: [&str; 2] = ["message", "msg"];
const LEVEL_KEYS: [&str; 2] = ["level", "severity"];
const TIMESTAMP_KEYS: [&str; 3] = ["timestamp", "time", "@timestamp"];

/// Parse a JSON object line. Anything that is not an object degrades.
pub fn parse(line: &str) -> LogRecord {
    let Ok(Value::Object(mut map)) = serde_json::from_str::<Value>(line) else {
        return LogRecord::degraded(line, LogFormat::Json);
    };

    let message = take_parsed(&mut map, &MESSAGE_KEYS, |v| Some(value_text(v.clone())))
        .unwrap_or_else(|| line.to_string());
    let level = take_parsed(&mut map, &LEVEL_KEYS, |v| {
        v.as_str().and_then(|s| LogLevel::parse(s.trim()))
    });
    let timestamp = take_parsed(&mut map, &TIMESTAMP_KEYS, json_timestamp);

    let mut record = LogRecord::structured(line, message, LogFormat::Json);
    record.level = level;
    record.timestamp = timestamp;
    record.fields = map.into_iter().map(|(k, v)| (k, value_text(v))).collect();
    record
}

/// Check if a line is a single JSON object.
pub fn looks_like_json(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('{')
        && trimmed.ends_with('}')
        && serde_json::from_str::<Map<String, Value>>(trimmed).is_ok()
}

/// Convert the first present key's value, removing the key only when the
/// conversion succeeds. Unrecognized values stay in the extension map.
fn take_parsed<T>(
    map: &mut Map<String, Value>,
    keys: &[&str],
    convert: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    let key = keys.iter().find(|key| map.contains_key(**key))?;
    let parsed = map.get(*key).and_then(convert)?;
    map.remove(*key);
    Some(parsed)
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn json_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp(s),
        // Epoch seconds
        Value::Number(n) => n.as_f64().and_then(|secs| {
            let whole = secs.floor();
            let nanos = ((secs - whole) * 1e9) as u32;
            DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
        }),
        _ => None,
    }
}
