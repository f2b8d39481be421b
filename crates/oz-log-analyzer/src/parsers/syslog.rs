//! BSD syslog parser: `[<PRI>]Mmm dd HH:MM:SS HOSTNAME TAG[PID]: MSG`.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::SyslogYear;
use crate::timestamp::parse_syslog_timestamp;
use crate::types::{LogFormat, LogLevel, LogRecord};

static RE_SYSLOG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:<(?P<pri>\d{1,3})>)?(?P<ts>(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+\d{1,2}\s+\d{2}:\d{2}:\d{2})\s+(?P<host>\S+)\s+(?P<tag>[^\s\[:]+)(?:\[(?P<pid>[^\]]*)\])?:\s?(?P<msg>.*)$",
    )
    .unwrap()
});

// Level words inside the message body, most severe first
static LEVEL_PATTERNS: LazyLock<Vec<(Regex, LogLevel)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"(?i)\bCRITICAL\b").unwrap(), LogLevel::Critical),
        (Regex::new(r"(?i)\bERROR\b").unwrap(), LogLevel::Error),
        (Regex::new(r"(?i)\bWARN(?:ING)?\b").unwrap(), LogLevel::Warning),
        (Regex::new(r"(?i)\bINFO\b").unwrap(), LogLevel::Info),
        (Regex::new(r"(?i)\bDEBUG\b").unwrap(), LogLevel::Debug),
    ]
});

/// Parse a syslog line, completing the timestamp's year per `year`.
///
/// The level comes from the `<PRI>` prefix when present, otherwise from a
/// level word in the message body, otherwise it is absent.
pub fn parse(line: &str, year: SyslogYear) -> LogRecord {
    let Some(caps) = RE_SYSLOG.captures(line) else {
        return LogRecord::degraded(line, LogFormat::Syslog);
    };

    let message = caps["msg"].trim_end();
    let mut record = LogRecord::structured(line, message, LogFormat::Syslog);
    record.timestamp = parse_syslog_timestamp(&caps["ts"], year);

    let pri_level = caps
        .name("pri")
        .and_then(|p| p.as_str().parse::<u8>().ok())
        .map(level_from_priority);
    record.level = pri_level.or_else(|| level_in_text(message));

    record
        .fields
        .insert("syslog_timestamp".into(), caps["ts"].to_string());
    record.fields.insert("host".into(), caps["host"].to_string());
    record.fields.insert("process".into(), caps["tag"].to_string());
    if let Some(pid) = caps.name("pid") {
        record.fields.insert("pid".into(), pid.as_str().to_string());
    }
    if let Some(pri) = caps.name("pri") {
        record.fields.insert("priority".into(), pri.as_str().to_string());
    }
    record
}

/// Check if a line looks like BSD syslog.
pub fn looks_like_syslog(line: &str) -> bool {
    RE_SYSLOG.is_match(line)
}

/// Map the severity bits of a syslog priority onto the canonical levels.
fn level_from_priority(pri: u8) -> LogLevel {
    match pri & 0x07 {
        0..=2 => LogLevel::Critical, // Emergency, Alert, Critical
        3 => LogLevel::Error,
        4 => LogLevel::Warning,
        5 | 6 => LogLevel::Info, // Notice, Informational
        _ => LogLevel::Debug,
    }
}

/// Find a level word anywhere in free text, most severe first.
pub(crate) fn level_in_text(text: &str) -> Option<LogLevel> {
    LEVEL_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(text))
        .map(|(_, level)| *level)
}
