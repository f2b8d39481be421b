//! Format detection and per-format line parsing.
//!
//! Supports generic `date time LEVEL message` lines, newline-delimited JSON,
//! BSD syslog, Apache access logs and Python `logging` output. Detection is a
//! best-effort heuristic; parsing never fails and degrades to raw-only records.

pub mod apache;
pub mod generic;
pub mod json_lines;
pub mod python;
pub mod syslog;

use crate::config::SyslogYear;
use crate::types::{LogFormat, LogRecord};

/// Number of leading non-empty lines sampled when no size is configured.
pub const DEFAULT_DETECTION_SAMPLE: usize = 5;

/// Parse a single line with the given format, assuming the current year
/// for syslog timestamps.
pub fn parse_line(line: &str, format: LogFormat) -> LogRecord {
    parse_line_with(line, format, SyslogYear::default())
}

/// Parse a single line with the given format and syslog year policy.
pub fn parse_line_with(line: &str, format: LogFormat, syslog_year: SyslogYear) -> LogRecord {
    match format {
        LogFormat::Generic => generic::parse(line),
        LogFormat::Json => json_lines::parse(line),
        LogFormat::Syslog => syslog::parse(line, syslog_year),
        LogFormat::Apache => apache::parse(line),
        LogFormat::Python => python::parse(line),
    }
}

/// Parse all lines with one format. Whitespace-only lines produce no record;
/// line numbers are 1-based positions in `lines`.
pub fn parse_lines<S: AsRef<str>>(
    lines: &[S],
    format: LogFormat,
    syslog_year: SyslogYear,
) -> Vec<LogRecord> {
    lines
        .iter()
        .map(AsRef::as_ref)
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, line)| {
            let mut record = parse_line_with(line, format, syslog_year);
            record.line_number = i + 1;
            record
        })
        .collect()
}

/// Classify one line by structural predicates in fixed priority order.
pub fn classify_line(line: &str) -> LogFormat {
    if json_lines::looks_like_json(line) {
        LogFormat::Json
    } else if apache::looks_like_apache(line) {
        LogFormat::Apache
    } else if syslog::looks_like_syslog(line) {
        LogFormat::Syslog
    } else if python::looks_like_python(line) {
        LogFormat::Python
    } else {
        LogFormat::Generic
    }
}

/// Detect the dominant format from the first few non-empty lines.
pub fn detect_format<S: AsRef<str>>(lines: &[S]) -> LogFormat {
    detect_format_sampled(lines, DEFAULT_DETECTION_SAMPLE)
}

/// Detect the dominant format from up to `sample_size` non-empty lines.
///
/// Each sampled line votes for its classification; the most voted format
/// wins and ties go to the format seen first in the sample.
pub fn detect_format_sampled<S: AsRef<str>>(lines: &[S], sample_size: usize) -> LogFormat {
    let mut votes: Vec<(LogFormat, usize)> = Vec::new();
    for line in lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|l| !l.trim().is_empty())
        .take(sample_size.max(1))
    {
        let format = classify_line(line);
        match votes.iter_mut().find(|(f, _)| *f == format) {
            Some((_, count)) => *count += 1,
            None => votes.push((format, 1)),
        }
    }

    let mut best: Option<(LogFormat, usize)> = None;
    for (format, count) in votes {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((format, count));
        }
    }
    best.map(|(f, _)| f).unwrap_or(LogFormat::Generic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LogLevel;

    const GENERIC: &str = "2024-01-15 10:30:45 INFO Starting application";
    const JSON: &str = r#"{"timestamp": "2024-01-15T10:30:45", "level": "INFO", "message": "test"}"#;
    const SYSLOG: &str = "Jan 15 10:30:45 hostname app[123]: Test message";
    const APACHE: &str =
        r#"127.0.0.1 - - [15/Jan/2024:10:30:45 +0000] "GET / HTTP/1.1" 200 1234"#;
    const PYTHON: &str = "INFO:root:2024-01-15 10:30:45,123 - Test message";

    #[test]
    fn detect_each_format_from_single_line() {
        assert_eq!(detect_format(&[GENERIC]), LogFormat::Generic);
        assert_eq!(detect_format(&[JSON]), LogFormat::Json);
        assert_eq!(detect_format(&[SYSLOG]), LogFormat::Syslog);
        assert_eq!(detect_format(&[APACHE]), LogFormat::Apache);
        assert_eq!(detect_format(&[PYTHON]), LogFormat::Python);
        assert_eq!(detect_format(&["INFO:root:Test message"]), LogFormat::Python);
    }

    #[test]
    fn detect_minimal_json() {
        assert_eq!(
            detect_format(&[r#"{"level":"INFO","message":"x"}"#]),
            LogFormat::Json
        );
    }

    #[test]
    fn detect_unrecognized_is_generic() {
        assert_eq!(detect_format(&["Just a plain log line"]), LogFormat::Generic);
        assert_eq!(detect_format::<&str>(&[]), LogFormat::Generic);
        assert_eq!(detect_format(&["", "   "]), LogFormat::Generic);
    }

    #[test]
    fn detect_skips_leading_blank_lines() {
        assert_eq!(detect_format(&["", "  ", JSON]), LogFormat::Json);
    }

    #[test]
    fn detect_majority_vote() {
        let lines = [SYSLOG, JSON, JSON, GENERIC, JSON];
        assert_eq!(detect_format(&lines), LogFormat::Json);
    }

    #[test]
    fn detect_tie_goes_to_first_seen() {
        let lines = [GENERIC, JSON, SYSLOG, GENERIC, JSON];
        assert_eq!(detect_format(&lines), LogFormat::Generic);
    }

    #[test]
    fn detect_respects_sample_size() {
        let lines = [SYSLOG, JSON, JSON, JSON];
        assert_eq!(detect_format_sampled(&lines, 1), LogFormat::Syslog);
        assert_eq!(detect_format_sampled(&lines, 4), LogFormat::Json);
    }

    #[test]
    fn json_braces_without_object_are_not_json() {
        assert_eq!(classify_line("{not json}"), LogFormat::Generic);
    }

    #[test]
    fn parse_lines_skips_blank_and_numbers_lines() {
        let lines = vec![
            "2024-01-15 10:30:45 INFO a".to_string(),
            "".to_string(),
            "   ".to_string(),
            "2024-01-15 10:30:46 ERROR b".to_string(),
        ];
        let records = parse_lines(&lines, LogFormat::Generic, SyslogYear::Current);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line_number, 1);
        assert_eq!(records[1].line_number, 4);
        assert_eq!(records[1].level, Some(LogLevel::Error));
    }

    #[test]
    fn mismatched_lines_degrade_but_keep_raw() {
        let lines = [GENERIC, JSON, SYSLOG];
        let records = parse_lines(&lines, LogFormat::Generic, SyslogYear::Current);
        assert_eq!(records.len(), 3);
        assert!(!records[0].is_degraded());
        assert!(records[1].is_degraded());
        assert!(records[2].is_degraded());
        assert_eq!(records[2].raw, SYSLOG);
        assert_eq!(records[2].message, SYSLOG);
    }

    #[test]
    fn raw_never_empty_for_non_empty_input() {
        for format in LogFormat::ALL {
            for line in [GENERIC, JSON, SYSLOG, APACHE, PYTHON, "x", "{}", "::"] {
                let record = parse_line(line, format);
                assert!(!record.raw.is_empty(), "{format} / {line}");
                assert_eq!(record.format, format);
            }
        }
    }
}
