//! Follow mode: read a growing file incrementally and hand back only new records.
//!
//! The follower is driven by the caller (the CLI polls it on an interval); it
//! holds no timers or threads of its own. It tracks a byte offset that always
//! sits on a line boundary, so a line caught mid-write is held back until its
//! terminator arrives.

use tracing::debug;

use crate::config::AnalyzerConfig;
use crate::error::LogResult;
use crate::parsers;
use crate::source::{LogSource, decode_line};
use crate::types::{LogFormat, LogRecord};

pub struct TailFollower {
    config: AnalyzerConfig,
    path: String,
    format: Option<LogFormat>,
    /// Bytes consumed so far, always just past a `\n`.
    offset: u64,
    /// Physical lines consumed so far, for line numbering.
    lines_read: usize,
    /// First line of the file as read, used to notice a replaced file.
    head: Vec<u8>,
}

impl TailFollower {
    pub fn new(config: AnalyzerConfig, path: impl Into<String>) -> Self {
        Self {
            config,
            path: path.into(),
            format: None,
            offset: 0,
            lines_read: 0,
            head: Vec::new(),
        }
    }

    /// Read the file from the top and return its last `lines` records.
    pub fn start(&mut self, source: &dyn LogSource, lines: usize) -> LogResult<Vec<LogRecord>> {
        self.reset();
        let mut records = self.read_new(source)?;
        let skip = records.len().saturating_sub(lines);
        Ok(records.split_off(skip))
    }

    /// Records completed since the previous call.
    ///
    /// A file that shrank or whose first line changed (truncated, or rotated
    /// and recreated) is read again from the top.
    pub fn poll(&mut self, source: &dyn LogSource) -> LogResult<Vec<LogRecord>> {
        if self.replaced(source)? {
            debug!(path = %self.path, "log file truncated or replaced, reading from the top");
            self.reset();
        }
        self.read_new(source)
    }

    pub fn format(&self) -> Option<LogFormat> {
        self.format
    }

    fn reset(&mut self) {
        self.format = None;
        self.offset = 0;
        self.lines_read = 0;
        self.head.clear();
    }

    fn replaced(&self, source: &dyn LogSource) -> LogResult<bool> {
        if source.size(&self.path)? < self.offset {
            return Ok(true);
        }
        if self.head.is_empty() {
            return Ok(false);
        }
        let head = source.read_range(&self.path, 0, self.head.len() as u64)?;
        Ok(head != self.head)
    }

    fn read_new(&mut self, source: &dyn LogSource) -> LogResult<Vec<LogRecord>> {
        let size = source.size(&self.path)?;
        if size <= self.offset {
            return Ok(Vec::new());
        }
        let chunk = source.read_range(&self.path, self.offset, size - self.offset)?;
        let Some(end) = chunk.iter().rposition(|&b| b == b'\n') else {
            return Ok(Vec::new());
        };
        let complete = &chunk[..=end];

        if self.offset == 0 {
            let first_end = complete.iter().position(|&b| b == b'\n').unwrap_or(end);
            self.head = complete[..=first_end].to_vec();
        }
        self.offset += complete.len() as u64;

        let lines: Vec<String> = complete
            .split_inclusive(|&b| b == b'\n')
            .map(decode_line)
            .collect();
        let sample_size = self.config.detection_sample_size;
        let format = *self
            .format
            .get_or_insert_with(|| parsers::detect_format_sampled(&lines, sample_size));

        let mut records = parsers::parse_lines(&lines, format, self.config.syslog_year);
        for record in &mut records {
            record.line_number += self.lines_read;
        }
        self.lines_read += lines.len();
        Ok(records)
    }
}
