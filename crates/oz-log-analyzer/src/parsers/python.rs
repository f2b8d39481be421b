//! Python `logging` parser: `LEVEL:logger:message`.
//!
//! The default `logging.basicConfig` format has no timestamp. A common
//! variant puts `%(asctime)s - ` in front of the message; when the text
//! before the first ` - ` is a timestamp it is lifted out.

use regex::Regex;
use std::sync::LazyLock;

use crate::timestamp::parse_timestamp;
use crate::types::{LogFormat, LogLevel, LogRecord};

static RE_PYTHON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<level>DEBUG|INFO|WARNING|WARN|ERROR|CRITICAL):(?P<logger>[^:]*):(?P<rest>.*)$")
        .unwrap()
});

/// Parse a Python logging line.
pub fn parse(line: &str) -> LogRecord {
    let Some(caps) = RE_PYTHON.captures(line.trim_end()) else {
        return LogRecord::degraded(line, LogFormat::Python);
    };

    let rest = &caps["rest"];
    let (timestamp, message) = match rest.split_once(" - ") {
        Some((head, tail)) => match parse_timestamp(head) {
            Some(ts) => (Some(ts), tail.trim()),
            None => (None, rest.trim()),
        },
        None => (None, rest.trim()),
    };

    let mut record = LogRecord::structured(line, message, LogFormat::Python);
    record.level = LogLevel::parse(&caps["level"]);
    record.timestamp = timestamp;
    record
        .fields
        .insert("logger".into(), caps["logger"].to_string());
    record
}

/// Check if a line starts with an upper-case level and a logger name.
pub fn looks_like_python(line: &str) -> bool {
    RE_PYTHON.is_match(line.trim_end())
}
