//! Log analysis tools: named, JSON-argument operations over a log source.
//!
//! - analyze_logs: statistics for one file
//! - filter_logs: level / pattern / time-window filtering
//! - tail_logs: last N records
//! - export_logs: filtered export to JSON, CSV or text

pub mod analyze_logs;
pub mod export_logs;
pub mod filter_logs;
pub mod registry;
pub mod tail_logs;

use serde_json::{Value, json};

use crate::config::AnalyzerConfig;
use crate::error::{LogError, LogResult};
use crate::filter::FilterCriteria;
use crate::types::{LogRecord, LogTool};

pub use analyze_logs::AnalyzeLogs;
pub use export_logs::ExportLogs;
pub use filter_logs::FilterLogs;
pub use registry::{ToolInfo, ToolRegistry};
pub use tail_logs::TailLogs;

/// Every tool, configured with `config`.
pub fn all_tools(config: &AnalyzerConfig) -> Vec<Box<dyn LogTool>> {
    vec![
        Box::new(AnalyzeLogs::new(config.clone())),
        Box::new(FilterLogs::new(config.clone())),
        Box::new(TailLogs::new(config.clone())),
        Box::new(ExportLogs::new(config.clone())),
    ]
}

/// A required string argument.
pub(crate) fn required_str<'a>(args: &'a Value, key: &str) -> LogResult<&'a str> {
    args[key]
        .as_str()
        .ok_or_else(|| LogError::InvalidArgument(format!("missing '{key}' argument")))
}

/// An optional string argument; present-but-not-a-string is an error.
pub(crate) fn optional_str(args: &Value, key: &str) -> LogResult<Option<String>> {
    match &args[key] {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        other => Err(LogError::InvalidArgument(format!(
            "'{key}' must be a string, got {other}"
        ))),
    }
}

/// An optional non-negative integer argument.
pub(crate) fn optional_usize(args: &Value, key: &str) -> LogResult<Option<usize>> {
    match &args[key] {
        Value::Null => Ok(None),
        v => v.as_u64().map(|n| Some(n as usize)).ok_or_else(|| {
            LogError::InvalidArgument(format!("'{key}' must be a non-negative integer, got {v}"))
        }),
    }
}

/// Shared filter arguments: `level`, `pattern`, `start_time`, `end_time`.
pub(crate) fn filter_criteria(args: &Value) -> LogResult<FilterCriteria> {
    Ok(FilterCriteria {
        level: optional_str(args, "level")?,
        pattern: optional_str(args, "pattern")?,
        start_time: optional_str(args, "start_time")?,
        end_time: optional_str(args, "end_time")?,
    })
}

/// JSON Schema properties for the shared filter arguments.
pub(crate) fn filter_schema_properties() -> serde_json::Map<String, Value> {
    let props = json!({
        "level": {
            "type": "string",
            "enum": ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"],
            "description": "Minimum level to include (case-insensitive)"
        },
        "pattern": {
            "type": "string",
            "description": "Case-insensitive regex matched against the message"
        },
        "start_time": {
            "type": "string",
            "description": "Inclusive lower time bound (ISO-8601 or 'YYYY-MM-DD HH:MM:SS')"
        },
        "end_time": {
            "type": "string",
            "description": "Inclusive upper time bound"
        }
    });
    match props {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}

/// Compact JSON view of a record for tool output.
pub(crate) fn record_json(record: &LogRecord) -> Value {
    let mut value = json!({
        "line": record.line_number,
        "timestamp": record.timestamp,
        "level": record.level,
        "message": record.message,
        "raw": record.raw,
    });
    if record.is_degraded() {
        value["degraded"] = Value::Bool(true);
    }
    if !record.fields.is_empty() {
        value["fields"] = json!(record.fields);
    }
    value
}
