//! Exporter: write records to JSON, CSV or plain text.
//!
//! Output is written to a temporary file next to the destination and renamed
//! over it once complete, so a failed export never leaves a partial file.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{LogError, LogResult};
use crate::types::{LogLevel, LogRecord};

/// Output encodings supported by [`export_records`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    Text,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "text",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = LogError;

    fn from_str(s: &str) -> LogResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "text" | "txt" => Ok(Self::Text),
            other => Err(LogError::Format(format!("unknown export format: {other}"))),
        }
    }
}

/// Shape of one record in JSON exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedRecord {
    pub line_number: usize,
    pub timestamp: Option<DateTime<Utc>>,
    pub level: Option<LogLevel>,
    pub message: String,
    pub raw: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
}

impl From<&LogRecord> for ExportedRecord {
    fn from(record: &LogRecord) -> Self {
        Self {
            line_number: record.line_number,
            timestamp: record.timestamp,
            level: record.level,
            message: record.message.clone(),
            raw: record.raw.clone(),
            fields: record.fields.clone(),
        }
    }
}

/// Export options that do not change between calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Append `raw` as a fourth CSV column.
    pub csv_include_raw: bool,
}

/// Write `records` to `destination` and return how many were written.
pub fn export_records(
    records: &[LogRecord],
    destination: &Path,
    format: ExportFormat,
    options: ExportOptions,
) -> LogResult<usize> {
    let dest = destination.display().to_string();
    let export_err = |message: String| LogError::Export {
        path: dest.clone(),
        message,
    };

    let dir = match destination.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| export_err(e.to_string()))?;

    {
        let mut out = BufWriter::new(tmp.as_file_mut());
        let written = match format {
            ExportFormat::Json => write_json(&mut out, records),
            ExportFormat::Csv => write_csv(&mut out, records, options.csv_include_raw),
            ExportFormat::Text => write_text(&mut out, records),
        };
        if let Err(e) = written.and_then(|_| out.flush()) {
            warn!(destination = %dest, error = %e, "export failed");
            return Err(export_err(e.to_string()));
        }
    }

    tmp.persist(destination).map_err(|e| {
        warn!(destination = %dest, error = %e.error, "export rename failed");
        export_err(e.error.to_string())
    })?;

    debug!(destination = %dest, %format, count = records.len(), "exported records");
    Ok(records.len())
}

fn write_json<W: Write>(out: &mut W, records: &[LogRecord]) -> std::io::Result<()> {
    let exported: Vec<ExportedRecord> = records.iter().map(ExportedRecord::from).collect();
    serde_json::to_writer_pretty(&mut *out, &exported)?;
    out.write_all(b"\n")
}

fn write_csv<W: Write>(out: &mut W, records: &[LogRecord], include_raw: bool) -> std::io::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);
    if include_raw {
        wtr.write_record(["level", "timestamp", "message", "raw"])?;
    } else {
        wtr.write_record(["level", "timestamp", "message"])?;
    }
    for record in records {
        let level = record.level.map(|l| l.as_str()).unwrap_or("");
        let timestamp = record
            .timestamp
            .map(|ts| ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            .unwrap_or_default();
        if include_raw {
            wtr.write_record([
                level,
                timestamp.as_str(),
                record.message.as_str(),
                record.raw.as_str(),
            ])?;
        } else {
            wtr.write_record([level, timestamp.as_str(), record.message.as_str()])?;
        }
    }
    wtr.flush()
}

fn write_text<W: Write>(out: &mut W, records: &[LogRecord]) -> std::io::Result<()> {
    for record in records {
        if record.raw.is_empty() {
            writeln!(out, "{}", record.reconstruct())?;
        } else {
            writeln!(out, "{}", record.raw)?;
        }
    }
    Ok(())
}
