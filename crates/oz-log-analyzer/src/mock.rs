//! Mock log source for testing. Serves pre-loaded log content.

use std::collections::HashMap;

use crate::error::{LogError, LogResult};
use crate::source::{LogSource, decode_line};

/// A mock log source that serves pre-loaded content by path.
///
/// Files are kept as raw text so tests can simulate writes caught mid-line.
pub struct MockLogSource {
    files: HashMap<String, String>,
}

impl MockLogSource {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
        }
    }

    /// Add (or replace) a file with the given newline-terminated lines.
    pub fn add_file(&mut self, path: impl Into<String>, lines: Vec<String>) {
        let mut content = String::new();
        push_lines(&mut content, &lines);
        self.files.insert(path.into(), content);
    }

    /// Append lines to a file, creating it if needed.
    pub fn append_lines(&mut self, path: &str, lines: Vec<String>) {
        push_lines(self.files.entry(path.to_string()).or_default(), &lines);
    }

    /// Append raw text with no implied line terminator.
    pub fn append_text(&mut self, path: &str, text: &str) {
        self.files.entry(path.to_string()).or_default().push_str(text);
    }

    fn content(&self, path: &str) -> LogResult<&str> {
        self.files
            .get(path)
            .map(String::as_str)
            .ok_or_else(|| LogError::NotFound(path.to_string()))
    }

    /// Create a mock with a sample generic log at `/var/log/app.log`.
    pub fn with_generic_sample() -> Self {
        let mut m = Self::new();
        m.add_file(
            "/var/log/app.log",
            vec![
                "2024-01-15 10:30:45 INFO Starting application".into(),
                "2024-01-15 10:30:46 DEBUG Loading configuration".into(),
                "2024-01-15 10:30:47 WARNING Configuration file not found, using defaults".into(),
                "2024-01-15 10:30:48 ERROR Failed to connect to database".into(),
                "2024-01-15 10:30:49 CRITICAL System shutdown initiated".into(),
                "2024-01-15 10:30:50 INFO Application terminated".into(),
            ],
        );
        m
    }

    /// Create a mock with a sample JSON lines file at `/var/log/app.json`.
    pub fn with_json_sample() -> Self {
        let mut m = Self::new();
        m.add_file(
            "/var/log/app.json",
            vec![
                r#"{"timestamp":"2024-01-15T12:00:01Z","level":"INFO","message":"Service started","service":"api"}"#.into(),
                r#"{"timestamp":"2024-01-15T12:00:05Z","level":"ERROR","message":"Connection timeout","service":"database","retry":3}"#.into(),
                r#"{"timestamp":"2024-01-15T12:00:10Z","level":"WARNING","message":"Memory usage high: 82%","service":"monitor"}"#.into(),
                r#"{"timestamp":"2024-01-15T12:00:15Z","level":"INFO","message":"Request handled","service":"api"}"#.into(),
                r#"{"timestamp":"2024-01-15T12:00:20Z","level":"ERROR","message":"Connection timeout","service":"database","retry":4}"#.into(),
                r#"{"timestamp":"2024-01-15T12:00:25Z","level":"DEBUG","message":"Heartbeat sent","service":"api"}"#.into(),
            ],
        );
        m
    }

    /// Create a mock with a sample BSD syslog file at `/var/log/syslog`.
    pub fn with_syslog_sample() -> Self {
        let mut m = Self::new();
        m.add_file(
            "/var/log/syslog",
            vec![
                "Jan 15 12:00:01 web1 nginx[812]: Service started successfully".into(),
                "Jan 15 12:00:05 web1 app[1234]: ERROR Failed to connect to database: connection refused".into(),
                "Jan 15 12:00:10 web1 kernel: eth0: link up".into(),
                "Jan 15 12:00:15 web1 app[1234]: WARNING disk usage at 91%".into(),
                "Jan 15 12:00:20 web1 CRON[5678]: (root) CMD (/usr/bin/backup)".into(),
                "Jan 15 12:00:25 web1 systemd[1]: Started Daily Cleanup".into(),
            ],
        );
        m
    }

    /// Create a mock with a sample access log at `/var/log/apache/access.log`.
    pub fn with_apache_sample() -> Self {
        let mut m = Self::new();
        m.add_file(
            "/var/log/apache/access.log",
            vec![
                r#"127.0.0.1 - - [15/Jan/2024:10:30:45 +0000] "GET /index.html HTTP/1.1" 200 1234"#.into(),
                r#"192.168.1.1 - - [15/Jan/2024:10:30:46 +0000] "POST /api/data HTTP/1.1" 201 567"#.into(),
                r#"10.0.0.1 - admin [15/Jan/2024:10:30:47 +0000] "GET /admin HTTP/1.1" 403 89"#.into(),
                r#"127.0.0.1 - - [15/Jan/2024:10:30:48 +0000] "GET /index.html HTTP/1.1" 200 1234"#.into(),
            ],
        );
        m
    }

    /// Create a mock with a sample Python logging file at `/var/log/worker.log`.
    pub fn with_python_sample() -> Self {
        let mut m = Self::new();
        m.add_file(
            "/var/log/worker.log",
            vec![
                "INFO:root:Worker started".into(),
                "DEBUG:worker.queue:Polling queue".into(),
                "WARNING:worker.queue:2024-01-15 10:30:47,120 - Queue depth above 1000".into(),
                "ERROR:worker.db:2024-01-15 10:30:48,500 - Lost connection to database".into(),
            ],
        );
        m
    }
}

impl Default for MockLogSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSource for MockLogSource {
    fn read_lines(&self, path: &str) -> LogResult<Vec<String>> {
        Ok(self
            .content(path)?
            .as_bytes()
            .split_inclusive(|&b| b == b'\n')
            .map(decode_line)
            .collect())
    }

    fn size(&self, path: &str) -> LogResult<u64> {
        Ok(self.content(path)?.len() as u64)
    }

    fn read_range(&self, path: &str, offset: u64, len: u64) -> LogResult<Vec<u8>> {
        let bytes = self.content(path)?.as_bytes();
        let start = usize::try_from(offset).unwrap_or(usize::MAX).min(bytes.len());
        let end = start.saturating_add(usize::try_from(len).unwrap_or(usize::MAX)).min(bytes.len());
        Ok(bytes[start..end].to_vec())
    }
}

fn push_lines(content: &mut String, lines: &[String]) {
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
}
