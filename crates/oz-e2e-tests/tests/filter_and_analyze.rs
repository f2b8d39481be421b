//! E2E tests for filtering and statistics over real files, through sessions and tools.

mod helpers;

use serde_json::json;

use helpers::{GENERIC_LINES, JSON_LINES, LogDir, call_tool};
use oz_log_analyzer::{
    AnalyzerConfig, AnalyzerSession, FileLogSource, FilterCriteria, LogError, LogLevel,
};

fn generic_session(dir: &LogDir) -> AnalyzerSession {
    let path = dir.write_lines("app.log", &GENERIC_LINES);
    AnalyzerSession::open(AnalyzerConfig::default(), &FileLogSource, &path).unwrap()
}

/// Six generic lines: total and per-level counts.
#[test]
fn e2e_analyze_level_counts() {
    let dir = LogDir::new();
    let stats = generic_session(&dir).analyze();
    assert_eq!(stats.total_entries, 6);
    assert_eq!(stats.count(LogLevel::Info), 2);
    assert_eq!(stats.count(LogLevel::Debug), 1);
    assert_eq!(stats.count(LogLevel::Warning), 1);
    assert_eq!(stats.count(LogLevel::Error), 1);
    assert_eq!(stats.count(LogLevel::Critical), 1);
    assert_eq!(stats.unleveled_entries, 0);
}

/// Level ERROR selects ERROR and CRITICAL in file order.
#[test]
fn e2e_filter_error_and_above() {
    let dir = LogDir::new();
    let session = generic_session(&dir);
    let out = session
        .filter(&FilterCriteria {
            level: Some("ERROR".into()),
            ..Default::default()
        })
        .unwrap();
    let levels: Vec<_> = out.iter().map(|r| r.level).collect();
    assert_eq!(levels, vec![Some(LogLevel::Error), Some(LogLevel::Critical)]);
    assert!(out[0].line_number < out[1].line_number);
}

/// Pattern search is case-insensitive.
#[test]
fn e2e_filter_pattern_any_case() {
    let dir = LogDir::new();
    let session = generic_session(&dir);
    for pattern in ["database", "DATABASE", "DataBase"] {
        let out = session
            .filter(&FilterCriteria {
                pattern: Some(pattern.into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(out.len(), 1, "{pattern}");
        assert!(out[0].message.to_lowercase().contains("database"));
    }
}

/// Raising the level threshold never adds records.
#[test]
fn e2e_level_filter_monotonic() {
    let dir = LogDir::new();
    let session = generic_session(&dir);
    let counts: Vec<usize> = LogLevel::ALL
        .iter()
        .map(|level| {
            session
                .filter(&FilterCriteria {
                    level: Some(level.to_string()),
                    ..Default::default()
                })
                .unwrap()
                .len()
        })
        .collect();
    assert_eq!(counts, vec![6, 5, 3, 2, 1]);
}

/// Filters never modify the store, even when they fail.
#[test]
fn e2e_filter_is_non_destructive() {
    let dir = LogDir::new();
    let session = generic_session(&dir);
    let before = session.records().to_vec();

    session
        .filter(&FilterCriteria {
            level: Some("CRITICAL".into()),
            pattern: Some("shutdown".into()),
            ..Default::default()
        })
        .unwrap();
    let err = session
        .filter(&FilterCriteria {
            start_time: Some("not a time".into()),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, LogError::InvalidFilter(_)));
    assert_eq!(session.records(), before.as_slice());
}

/// filter_logs over a JSON file, combining level and time window.
#[tokio::test]
async fn e2e_filter_tool_json_file() {
    let dir = LogDir::new();
    let path = dir.write_lines("app.json", &JSON_LINES);
    let result = call_tool(
        "filter_logs",
        json!({
            "path": path,
            "level": "warning",
            "start_time": "2024-01-15T10:30:46",
            "end_time": "2024-01-15T10:30:47"
        }),
    )
    .await
    .unwrap();
    let data = result.data.unwrap();
    assert_eq!(data["format"], "json");
    assert_eq!(data["total_entries"], 3);
    assert_eq!(data["match_count"], 2);
    assert_eq!(data["records"][0]["fields"]["service"], "database");
}

/// analyze_logs over a real file reports format and time range.
#[tokio::test]
async fn e2e_analyze_tool() {
    let dir = LogDir::new();
    let path = dir.write_lines("app.log", &GENERIC_LINES);
    let result = call_tool("analyze_logs", json!({"path": path})).await.unwrap();
    assert!(result.success);
    let data = result.data.unwrap();
    assert_eq!(data["format"], "generic");
    assert_eq!(data["total_entries"], 6);
    assert_eq!(data["level_counts"]["INFO"], 2);
    assert_eq!(data["time_range"]["start"], "2024-01-15T10:30:45Z");
    assert_eq!(data["time_range"]["end"], "2024-01-15T10:30:50Z");
}

/// tail_logs returns the last records of a real file.
#[tokio::test]
async fn e2e_tail_tool() {
    let dir = LogDir::new();
    let path = dir.write_lines("app.log", &GENERIC_LINES);
    let result = call_tool("tail_logs", json!({"path": path, "lines": 2}))
        .await
        .unwrap();
    let data = result.data.unwrap();
    assert_eq!(data["shown"], 2);
    assert_eq!(data["records"][1]["raw"], GENERIC_LINES[5]);
}

/// A missing file fails the tool call instead of returning empty data.
#[tokio::test]
async fn e2e_tool_missing_file() {
    let dir = LogDir::new();
    let path = helpers::path_str(&dir.path("missing.log"));
    let err = call_tool("analyze_logs", json!({"path": path}))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}
