//! filter_logs: select records by minimum level, pattern and time window.

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::config::AnalyzerConfig;
use crate::error::LogResult;
use crate::session::AnalyzerSession;
use crate::source::LogSource;
use crate::types::{LogTool, ToolResult};

use super::{filter_criteria, filter_schema_properties, optional_usize, record_json, required_str};

pub struct FilterLogs {
    config: AnalyzerConfig,
}

impl FilterLogs {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl LogTool for FilterLogs {
    fn name(&self) -> &str {
        "filter_logs"
    }

    fn description(&self) -> &str {
        "Filter log records by minimum level, regex pattern and time window"
    }

    fn parameters_schema(&self) -> Value {
        let mut properties = filter_schema_properties();
        properties.insert(
            "path".into(),
            json!({"type": "string", "description": "Path to the log file"}),
        );
        properties.insert(
            "limit".into(),
            json!({
                "type": "integer",
                "description": "Maximum number of records returned (all matches if omitted)"
            }),
        );
        json!({
            "type": "object",
            "properties": properties,
            "required": ["path"]
        })
    }

    async fn execute(&self, args: Value, source: &dyn LogSource) -> LogResult<ToolResult> {
        let path = required_str(&args, "path")?;
        let criteria = filter_criteria(&args)?;
        let limit = optional_usize(&args, "limit")?;
        // Reject bad criteria before touching the file
        let compiled = criteria.compile()?;

        let session = AnalyzerSession::open(self.config.clone(), source, path)?;
        let matched = compiled.apply(session.records());
        let match_count = matched.len();

        let records: Vec<Value> = matched
            .iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(record_json)
            .collect();
        let data = json!({
            "path": path,
            "format": session.format(),
            "total_entries": session.len(),
            "match_count": match_count,
            "shown": records.len(),
            "records": records,
        });

        Ok(ToolResult::success(
            "filter_logs",
            data,
            format!(
                "{match_count} of {} records in {path} match",
                session.len()
            ),
        ))
    }
}
