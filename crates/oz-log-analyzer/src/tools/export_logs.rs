//! export_logs: write (optionally filtered) records to a JSON, CSV or text file.
//!
//! A write that fails is reported as a failed `ToolResult`; bad arguments and
//! unreadable sources are errors.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::path::Path;

use crate::config::AnalyzerConfig;
use crate::error::LogResult;
use crate::export::ExportFormat;
use crate::session::AnalyzerSession;
use crate::source::LogSource;
use crate::types::{LogTool, ToolResult};

use super::{filter_criteria, filter_schema_properties, required_str};

pub struct ExportLogs {
    config: AnalyzerConfig,
}

impl ExportLogs {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl LogTool for ExportLogs {
    fn name(&self) -> &str {
        "export_logs"
    }

    fn description(&self) -> &str {
        "Export log records, optionally filtered, to JSON, CSV or plain text"
    }

    fn parameters_schema(&self) -> Value {
        let mut properties = filter_schema_properties();
        properties.insert(
            "path".into(),
            json!({"type": "string", "description": "Path to the log file"}),
        );
        properties.insert(
            "destination".into(),
            json!({"type": "string", "description": "Output file path"}),
        );
        properties.insert(
            "format".into(),
            json!({
                "type": "string",
                "enum": ["json", "csv", "text"],
                "description": "Output format"
            }),
        );
        json!({
            "type": "object",
            "properties": properties,
            "required": ["path", "destination", "format"]
        })
    }

    async fn execute(&self, args: Value, source: &dyn LogSource) -> LogResult<ToolResult> {
        let path = required_str(&args, "path")?;
        let destination = required_str(&args, "destination")?;
        let format: ExportFormat = required_str(&args, "format")?.parse()?;
        let compiled = filter_criteria(&args)?.compile()?;

        let session = AnalyzerSession::open(self.config.clone(), source, path)?;
        let selected = compiled.apply(session.records());
        let exported = match session.export(&selected, Path::new(destination), format) {
            Ok(n) => n,
            Err(e) => return Ok(ToolResult::failure(self.name(), e.to_string())),
        };

        let data = json!({
            "path": path,
            "destination": destination,
            "format": format,
            "exported": exported,
        });

        Ok(ToolResult::success(
            "export_logs",
            data,
            format!("Exported {exported} records from {path} to {destination} ({format})"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LogError;
    use crate::mock::MockLogSource;

    fn tool() -> ExportLogs {
        ExportLogs::new(AnalyzerConfig::default())
    }

    #[tokio::test]
    async fn export_filtered_csv() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("errors.csv");
        let source = MockLogSource::with_generic_sample();
        let result = tool()
            .execute(
                json!({
                    "path": "/var/log/app.log",
                    "destination": dest.to_str().unwrap(),
                    "format": "csv",
                    "level": "ERROR"
                }),
                &source,
            )
            .await
            .unwrap();
        assert_eq!(result.data.unwrap()["exported"], 2);

        let content = std::fs::read_to_string(&dest).unwrap();
        let rows: Vec<_> = content.lines().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], "level,timestamp,message");
        assert!(rows[1].starts_with("ERROR,"));
        assert!(rows[2].starts_with("CRITICAL,"));
    }

    #[tokio::test]
    async fn export_json_everything() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("all.json");
        let source = MockLogSource::with_json_sample();
        let result = tool()
            .execute(
                json!({
                    "path": "/var/log/app.json",
                    "destination": dest.to_str().unwrap(),
                    "format": "json"
                }),
                &source,
            )
            .await
            .unwrap();
        assert_eq!(result.data.as_ref().unwrap()["format"], "json");

        let exported: Value =
            serde_json::from_str(&std::fs::read_to_string(&dest).unwrap()).unwrap();
        let items = exported.as_array().unwrap();
        assert_eq!(items.len(), 6);
        assert_eq!(items[1]["fields"]["service"], "database");
    }

    #[tokio::test]
    async fn export_unknown_format() {
        let source = MockLogSource::with_generic_sample();
        let err = tool()
            .execute(
                json!({"path": "/var/log/app.log", "destination": "/tmp/x", "format": "xml"}),
                &source,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, LogError::Format(_)));
    }

    #[tokio::test]
    async fn export_requires_destination() {
        let source = MockLogSource::with_generic_sample();
        let err = tool()
            .execute(json!({"path": "/var/log/app.log", "format": "csv"}), &source)
            .await
            .unwrap_err();
        assert!(matches!(err, LogError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn export_to_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("missing/out.txt");
        let source = MockLogSource::with_generic_sample();
        let result = tool()
            .execute(
                json!({
                    "path": "/var/log/app.log",
                    "destination": dest.to_str().unwrap(),
                    "format": "text"
                }),
                &source,
            )
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.data.is_none());
        assert!(result.error.unwrap().starts_with("export to "));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn export_missing_source_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.txt");
        let err = tool()
            .execute(
                json!({
                    "path": "/var/log/none.log",
                    "destination": dest.to_str().unwrap(),
                    "format": "text"
                }),
                &MockLogSource::new(),
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
