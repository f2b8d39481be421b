//! Analyzer configuration, passed explicitly into sessions and tools.

use chrono::{Datelike, Utc};
use serde::Deserialize;

use crate::error::{LogError, LogResult};

/// How to complete syslog timestamps, which carry no year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "RawSyslogYear")]
pub enum SyslogYear {
    /// Assume the current UTC year at parse time.
    #[default]
    Current,
    /// Assume a fixed year (useful for archived logs).
    Fixed(i32),
    /// Leave the timestamp absent; the text is kept in the `syslog_timestamp` field.
    Omit,
}

impl SyslogYear {
    /// The year to apply, or None to leave syslog timestamps unset.
    pub fn resolve(&self) -> Option<i32> {
        match self {
            Self::Current => Some(Utc::now().year()),
            Self::Fixed(year) => Some(*year),
            Self::Omit => None,
        }
    }
}

// `syslog_year = "current" | "none"` or `syslog_year = 2023`
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSyslogYear {
    Year(i32),
    Keyword(String),
}

impl TryFrom<RawSyslogYear> for SyslogYear {
    type Error = String;

    fn try_from(raw: RawSyslogYear) -> Result<Self, Self::Error> {
        match raw {
            RawSyslogYear::Year(year) => Ok(Self::Fixed(year)),
            RawSyslogYear::Keyword(k) => match k.to_ascii_lowercase().as_str() {
                "current" => Ok(Self::Current),
                "none" | "omit" => Ok(Self::Omit),
                other => Err(format!("unknown syslog_year policy: {other}")),
            },
        }
    }
}

/// Tunables for detection, aggregation and export.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Number of leading non-empty lines sampled for format detection.
    pub detection_sample_size: usize,
    /// Number of most frequent messages reported by `analyze`.
    pub top_messages: usize,
    /// Year policy for syslog timestamps.
    pub syslog_year: SyslogYear,
    /// Add `raw` as a fourth CSV column on export.
    pub csv_include_raw: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            detection_sample_size: 5,
            top_messages: 10,
            syslog_year: SyslogYear::Current,
            csv_include_raw: false,
        }
    }
}

impl AnalyzerConfig {
    pub fn validate(&self) -> LogResult<()> {
        if self.detection_sample_size == 0 {
            return Err(LogError::Config(
                "detection_sample_size must be at least 1".into(),
            ));
        }
        if self.top_messages == 0 {
            return Err(LogError::Config("top_messages must be at least 1".into()));
        }
        Ok(())
    }
}
