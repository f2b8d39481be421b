//! analyze_logs: level counts, time range and most common messages for one file.

use async_trait::async_trait;
use serde_json::json;

use crate::config::AnalyzerConfig;
use crate::error::LogResult;
use crate::session::AnalyzerSession;
use crate::source::LogSource;
use crate::types::{LogTool, ToolResult};

use super::required_str;

pub struct AnalyzeLogs {
    config: AnalyzerConfig,
}

impl AnalyzeLogs {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl LogTool for AnalyzeLogs {
    fn name(&self) -> &str {
        "analyze_logs"
    }

    fn description(&self) -> &str {
        "Compute log statistics: level counts, time range, most common messages"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Path to the log file"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        source: &dyn LogSource,
    ) -> LogResult<ToolResult> {
        let path = required_str(&args, "path")?;
        let session = AnalyzerSession::open(self.config.clone(), source, path)?;
        let stats = session.analyze();

        let common: Vec<_> = stats
            .common_messages
            .iter()
            .map(|m| json!({"message": m.message, "count": m.count}))
            .collect();
        let data = json!({
            "path": path,
            "format": session.format(),
            "total_entries": stats.total_entries,
            "level_counts": stats.level_counts,
            "unleveled_entries": stats.unleveled_entries,
            "degraded_entries": stats.degraded_entries,
            "time_range": stats.time_range,
            "common_messages": common,
        });

        let level_summary = stats
            .level_counts
            .iter()
            .map(|(level, count)| format!("{level}={count}"))
            .collect::<Vec<_>>()
            .join(", ");
        let summary = if level_summary.is_empty() {
            format!("{path}: {} entries", stats.total_entries)
        } else {
            format!("{path}: {} entries ({level_summary})", stats.total_entries)
        };

        Ok(ToolResult::success("analyze_logs", data, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LogError;
    use crate::mock::MockLogSource;

    fn tool() -> AnalyzeLogs {
        AnalyzeLogs::new(AnalyzerConfig::default())
    }

    #[tokio::test]
    async fn analyze_generic_sample() {
        let source = MockLogSource::with_generic_sample();
        let result = tool()
            .execute(json!({"path": "/var/log/app.log"}), &source)
            .await
            .unwrap();
        assert!(result.success);
        let data = result.data.as_ref().unwrap();
        assert_eq!(data["format"], "generic");
        assert_eq!(data["total_entries"], 6);
        assert_eq!(data["level_counts"]["INFO"], 2);
        assert_eq!(data["level_counts"]["CRITICAL"], 1);
        assert_eq!(data["time_range"]["start"], "2024-01-15T10:30:45Z");
        assert_eq!(data["time_range"]["end"], "2024-01-15T10:30:50Z");
        assert!(result.summary.unwrap().contains("6 entries"));
    }

    #[tokio::test]
    async fn analyze_json_counts_repeated_messages() {
        let source = MockLogSource::with_json_sample();
        let result = tool()
            .execute(json!({"path": "/var/log/app.json"}), &source)
            .await
            .unwrap();
        let data = result.data.unwrap();
        assert_eq!(data["format"], "json");
        assert_eq!(data["common_messages"][0]["message"], "Connection timeout");
        assert_eq!(data["common_messages"][0]["count"], 2);
    }

    #[tokio::test]
    async fn analyze_apache_has_no_levels() {
        let source = MockLogSource::with_apache_sample();
        let result = tool()
            .execute(json!({"path": "/var/log/apache/access.log"}), &source)
            .await
            .unwrap();
        let data = result.data.unwrap();
        assert_eq!(data["format"], "apache");
        assert_eq!(data["unleveled_entries"], 4);
        assert!(data["level_counts"].as_object().unwrap().is_empty());
    }

    #[tokio::test]
    async fn analyze_empty_file() {
        let mut source = MockLogSource::new();
        source.add_file("/empty.log", vec![]);
        let result = tool()
            .execute(json!({"path": "/empty.log"}), &source)
            .await
            .unwrap();
        let data = result.data.unwrap();
        assert_eq!(data["total_entries"], 0);
        assert!(data["time_range"].is_null());
    }

    #[tokio::test]
    async fn analyze_missing_file() {
        let source = MockLogSource::new();
        let err = tool()
            .execute(json!({"path": "/nonexistent"}), &source)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn analyze_requires_path() {
        let source = MockLogSource::new();
        let err = tool().execute(json!({}), &source).await.unwrap_err();
        assert!(matches!(err, LogError::InvalidArgument(_)));
    }
}
