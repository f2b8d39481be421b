//! tail_logs: show the last N parsed records of a log file.

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::config::AnalyzerConfig;
use crate::error::LogResult;
use crate::session::AnalyzerSession;
use crate::source::LogSource;
use crate::types::{LogTool, ToolResult};

use super::{optional_usize, record_json, required_str};

const DEFAULT_LINES: usize = 10;

pub struct TailLogs {
    config: AnalyzerConfig,
}

impl TailLogs {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl LogTool for TailLogs {
    fn name(&self) -> &str {
        "tail_logs"
    }

    fn description(&self) -> &str {
        "Show the last N parsed log records"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Path to the log file"
                },
                "lines": {
                    "type": "integer",
                    "description": "Number of records to show (default: 10)",
                    "default": DEFAULT_LINES
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, args: Value, source: &dyn LogSource) -> LogResult<ToolResult> {
        let path = required_str(&args, "path")?;
        let lines = optional_usize(&args, "lines")?.unwrap_or(DEFAULT_LINES);

        let session = AnalyzerSession::open(self.config.clone(), source, path)?;
        let records: Vec<Value> = session.tail(lines).iter().map(record_json).collect();
        let shown = records.len();

        let data = json!({
            "path": path,
            "format": session.format(),
            "total_entries": session.len(),
            "shown": shown,
            "records": records,
        });

        Ok(ToolResult::success(
            "tail_logs",
            data,
            format!("Last {shown} of {} records from {path}", session.len()),
        ))
    }
}
