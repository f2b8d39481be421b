//! Shared test harness for E2E tests.
//!
//! Writes real log files into a scratch directory and drives them through the
//! filesystem source, the tool registry and the CLI runner.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use clap::Parser;
use serde_json::Value;
use tempfile::TempDir;

use oz_cli::cli::Cli;
use oz_cli::config::CliConfig;
use oz_log_analyzer::{AnalyzerConfig, FileLogSource, LogResult, ToolRegistry, ToolResult};

pub const GENERIC_LINES: [&str; 6] = [
    "2024-01-15 10:30:45 INFO Starting application",
    "2024-01-15 10:30:46 DEBUG Loading configuration",
    "2024-01-15 10:30:47 WARNING Configuration file not found, using defaults",
    "2024-01-15 10:30:48 ERROR Failed to connect to database",
    "2024-01-15 10:30:49 CRITICAL System shutdown initiated",
    "2024-01-15 10:30:50 INFO Application terminated",
];

pub const JSON_LINES: [&str; 3] = [
    r#"{"timestamp": "2024-01-15T10:30:45", "level": "INFO", "message": "Service started", "service": "api"}"#,
    r#"{"timestamp": "2024-01-15T10:30:46", "level": "ERROR", "message": "Connection timeout", "service": "database"}"#,
    r#"{"timestamp": "2024-01-15T10:30:47", "level": "WARNING", "message": "High memory usage", "service": "monitor"}"#,
];

pub const SYSLOG_LINES: [&str; 3] = [
    "Jan 15 10:30:45 web1 app[123]: Service started",
    "Jan 15 10:30:46 web1 app[123]: ERROR Connection refused",
    "Jan 15 10:30:47 web1 kernel: eth0: link up",
];

pub const APACHE_LINES: [&str; 3] = [
    r#"127.0.0.1 - - [15/Jan/2024:10:30:45 +0000] "GET /index.html HTTP/1.1" 200 1234"#,
    r#"192.168.1.1 - - [15/Jan/2024:10:30:46 +0000] "POST /api/data HTTP/1.1" 201 567"#,
    r#"10.0.0.1 - - [15/Jan/2024:10:30:47 +0000] "GET /missing HTTP/1.1" 404 0"#,
];

pub const PYTHON_LINES: [&str; 3] = [
    "INFO:root:Test message",
    "WARNING:app.cache:2024-01-15 10:30:46,500 - Cache miss rate high",
    "ERROR:app.db:2024-01-15 10:30:47,000 - Lost connection",
];

/// Scratch directory for log files and export destinations.
pub struct LogDir {
    dir: TempDir,
}

impl LogDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `lines` newline-terminated and return the path as a string.
    pub fn write_lines(&self, name: &str, lines: &[&str]) -> String {
        let mut content = lines.join("\n");
        if !lines.is_empty() {
            content.push('\n');
        }
        self.write_raw(name, content.as_bytes())
    }

    pub fn write_raw(&self, name: &str, bytes: &[u8]) -> String {
        let path = self.path(name);
        std::fs::write(&path, bytes).expect("write log file");
        path_str(&path)
    }
}

pub fn path_str(path: &Path) -> String {
    path.to_str().expect("utf-8 temp path").to_string()
}

/// Call a tool against the real filesystem.
pub async fn call_tool(name: &str, args: Value) -> LogResult<ToolResult> {
    let registry = ToolRegistry::with_defaults(&AnalyzerConfig::default());
    registry.execute(name, args, &FileLogSource).await
}

/// Run `oz-logs` with the given arguments, capturing stdout.
pub async fn run_cli(args: &[&str]) -> (anyhow::Result<()>, String) {
    let cli = Cli::try_parse_from(std::iter::once("oz-logs").chain(args.iter().copied()))
        .expect("valid arguments");
    let config = CliConfig::load(cli.config.as_deref()).expect("valid config");
    let mut out = Vec::new();
    let result = oz_cli::run(&cli, &config, &FileLogSource, &mut out).await;
    (result, String::from_utf8(out).expect("utf-8 output"))
}
