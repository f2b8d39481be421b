//! Core log analysis types and the LogTool trait.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::{LogError, LogResult};

// ── Log Level ─────────────────────────────────────────────────

/// Canonical log level, ordered from least to most severe.
///
/// Variant declaration order matters: `#[derive(Ord)]` uses it,
/// so Debug < Info < Warning < Error < Critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// Normalize a level token. Case-insensitive; `WARN` is accepted as
    /// `WARNING`. Anything else is not a level.
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "DEBUG" => Some(Self::Debug),
            "INFO" => Some(Self::Info),
            "WARN" | "WARNING" => Some(Self::Warning),
            "ERROR" => Some(Self::Error),
            "CRITICAL" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    fn from_str(s: &str) -> LogResult<Self> {
        Self::parse(s).ok_or_else(|| LogError::InvalidArgument(format!("unknown log level: {s}")))
    }
}

// ── Log Format ────────────────────────────────────────────────

/// Supported line grammars. Exactly one applies per loaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// `YYYY-MM-DD HH:MM:SS LEVEL message`, also the fallback.
    Generic,
    /// One JSON object per line.
    Json,
    /// BSD syslog without priority: `Mon DD HH:MM:SS host process[pid]: message`.
    Syslog,
    /// Apache/NCSA common or combined access log.
    Apache,
    /// Python `logging` default: `LEVEL:logger:message`.
    Python,
}

impl LogFormat {
    pub const ALL: [LogFormat; 5] = [
        Self::Generic,
        Self::Json,
        Self::Syslog,
        Self::Apache,
        Self::Python,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Json => "json",
            Self::Syslog => "syslog",
            Self::Apache => "apache",
            Self::Python => "python",
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = LogError;

    fn from_str(s: &str) -> LogResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "generic" => Ok(Self::Generic),
            "json" | "json_lines" => Ok(Self::Json),
            "syslog" => Ok(Self::Syslog),
            "apache" | "apache_common" => Ok(Self::Apache),
            "python" => Ok(Self::Python),
            other => Err(LogError::Format(format!("unknown format: {other}"))),
        }
    }
}

// ── Log Record ────────────────────────────────────────────────

/// Whether a line matched its grammar or fell back to a raw-only record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseQuality {
    Structured,
    Degraded,
}

/// A parsed log line, normalized from any supported format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Parsed timestamp (None if absent or unparseable).
    pub timestamp: Option<DateTime<Utc>>,
    /// Canonical level (None if the line carries none).
    pub level: Option<LogLevel>,
    /// Payload after structural fields are stripped.
    pub message: String,
    /// Original line, unmodified.
    pub raw: String,
    /// 1-based line number in the source (0 outside a load).
    pub line_number: usize,
    /// Format this record was parsed with.
    pub format: LogFormat,
    pub quality: ParseQuality,
    /// Format-specific extension fields (client address, logger name, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
}

impl LogRecord {
    /// A structured record with no timestamp or level yet.
    pub fn structured(raw: &str, message: impl Into<String>, format: LogFormat) -> Self {
        Self {
            timestamp: None,
            level: None,
            message: message.into(),
            raw: raw.to_string(),
            line_number: 0,
            format,
            quality: ParseQuality::Structured,
            fields: BTreeMap::new(),
        }
    }

    /// A raw-only record for a line that did not match `format`.
    pub fn degraded(raw: &str, format: LogFormat) -> Self {
        Self {
            quality: ParseQuality::Degraded,
            ..Self::structured(raw, raw.trim(), format)
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.quality == ParseQuality::Degraded
    }

    /// Text the pattern filter runs against: the message, or raw when empty.
    pub fn search_text(&self) -> &str {
        if self.message.is_empty() {
            &self.raw
        } else {
            &self.message
        }
    }

    /// `timestamp level message`, skipping absent parts.
    pub fn reconstruct(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(3);
        if let Some(ts) = self.timestamp {
            parts.push(ts.to_rfc3339_opts(SecondsFormat::AutoSi, true));
        }
        if let Some(level) = self.level {
            parts.push(level.as_str().to_string());
        }
        parts.push(self.message.clone());
        parts.join(" ")
    }
}

// ── Tool Result ───────────────────────────────────────────────

/// Result of executing a log analysis tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool name that produced this result.
    pub tool_name: String,
    /// Whether the tool execution succeeded.
    pub success: bool,
    /// Structured result data (JSON).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Human-readable summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Error message if success is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success(
        tool_name: impl Into<String>,
        data: serde_json::Value,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            data: Some(data),
            summary: Some(summary.into()),
            error: None,
        }
    }

    pub fn failure(tool_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            data: None,
            summary: None,
            error: Some(error.into()),
        }
    }
}

// ── LogTool Trait ─────────────────────────────────────────────

/// A named analyzer operation driven by JSON arguments.
///
/// Each tool loads its own session from the given source, so tools never
/// share a store.
#[async_trait]
pub trait LogTool: Send + Sync {
    /// Tool name (e.g., "filter_logs").
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// JSON Schema describing accepted arguments.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with JSON arguments against a log source.
    async fn execute(
        &self,
        args: serde_json::Value,
        source: &dyn crate::source::LogSource,
    ) -> LogResult<ToolResult>;
}
