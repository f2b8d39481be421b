//! Analyzer session: owns the log store for one loaded file.

use std::path::Path;
use tracing::{debug, warn};

use crate::config::AnalyzerConfig;
use crate::error::LogResult;
use crate::export::{ExportFormat, ExportOptions, export_records};
use crate::filter::{CompiledFilter, FilterCriteria};
use crate::parsers;
use crate::source::LogSource;
use crate::stats::{self, LogStatistics};
use crate::types::{LogFormat, LogRecord};

/// One loaded file's parsed records and detected format.
///
/// Created empty, populated by [`load`](Self::load). Loading again replaces
/// the store and format wholesale; a failed load leaves the session empty.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerSession {
    config: AnalyzerConfig,
    path: Option<String>,
    format: Option<LogFormat>,
    records: Vec<LogRecord>,
}

impl AnalyzerSession {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            path: None,
            format: None,
            records: Vec::new(),
        }
    }

    /// Read, detect and parse `path`, returning the number of records stored.
    pub fn load(&mut self, source: &dyn LogSource, path: &str) -> LogResult<usize> {
        self.clear();

        let lines = match source.read_lines(path) {
            Ok(lines) => lines,
            Err(e) => {
                warn!(path, error = %e, "load failed");
                return Err(e);
            }
        };

        let format = parsers::detect_format_sampled(&lines, self.config.detection_sample_size);
        self.records = parsers::parse_lines(&lines, format, self.config.syslog_year);
        self.format = Some(format);
        self.path = Some(path.to_string());

        debug!(
            path,
            %format,
            lines = lines.len(),
            records = self.records.len(),
            "loaded log file"
        );
        Ok(self.records.len())
    }

    /// Load a file with a fresh session.
    pub fn open(config: AnalyzerConfig, source: &dyn LogSource, path: &str) -> LogResult<Self> {
        let mut session = Self::new(config);
        session.load(source, path)?;
        Ok(session)
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// Detected format of the loaded file; None before a successful load.
    pub fn format(&self) -> Option<LogFormat> {
        self.format
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records matching `criteria`, in store order.
    pub fn filter(&self, criteria: &FilterCriteria) -> LogResult<Vec<LogRecord>> {
        let compiled = CompiledFilter::compile(criteria)?;
        let matched = compiled.apply(&self.records);
        debug!(
            total = self.records.len(),
            matched = matched.len(),
            "filtered records"
        );
        Ok(matched)
    }

    /// Statistics over the whole store, tagged with the detected format.
    pub fn analyze(&self) -> LogStatistics {
        let mut statistics = stats::analyze(&self.records, self.config.top_messages);
        statistics.format = self.format;
        statistics
    }

    /// The last `n` records.
    pub fn tail(&self, n: usize) -> &[LogRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    /// Export `records` (usually a filter result) using this session's options.
    pub fn export(
        &self,
        records: &[LogRecord],
        destination: &Path,
        format: ExportFormat,
    ) -> LogResult<usize> {
        let options = ExportOptions {
            csv_include_raw: self.config.csv_include_raw,
        };
        export_records(records, destination, format, options)
    }

    fn clear(&mut self) {
        self.records.clear();
        self.format = None;
        self.path = None;
    }
}
