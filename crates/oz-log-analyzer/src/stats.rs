//! Aggregate statistics over a sequence of records.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::types::{LogFormat, LogLevel, LogRecord};

/// Summary of one record sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogStatistics {
    pub total_entries: usize,
    /// Per-level counts; only levels that occur are present.
    pub level_counts: BTreeMap<LogLevel, usize>,
    /// Records with no level.
    pub unleveled_entries: usize,
    /// Records whose line did not match the detected grammar.
    pub degraded_entries: usize,
    pub time_range: Option<TimeRange>,
    /// Most frequent messages, highest count first.
    pub common_messages: Vec<MessageCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<LogFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageCount {
    pub message: String,
    pub count: usize,
}

impl LogStatistics {
    pub fn count(&self, level: LogLevel) -> usize {
        self.level_counts.get(&level).copied().unwrap_or(0)
    }
}

/// Compute statistics, keeping the `top_n` most frequent messages.
///
/// Message ties are ordered by first occurrence. Empty input yields zeros,
/// no time range, and no messages.
pub fn analyze(records: &[LogRecord], top_n: usize) -> LogStatistics {
    let mut level_counts: BTreeMap<LogLevel, usize> = BTreeMap::new();
    let mut unleveled_entries = 0;
    let mut degraded_entries = 0;
    let mut time_range: Option<TimeRange> = None;

    // (message, count) in first-seen order, plus an index into it
    let mut messages: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        match record.level {
            Some(level) => *level_counts.entry(level).or_default() += 1,
            None => unleveled_entries += 1,
        }
        if record.is_degraded() {
            degraded_entries += 1;
        }
        if let Some(ts) = record.timestamp {
            time_range = Some(match time_range {
                Some(range) => TimeRange {
                    start: range.start.min(ts),
                    end: range.end.max(ts),
                },
                None => TimeRange { start: ts, end: ts },
            });
        }

        let message = record.message.as_str();
        match index.get(message).copied() {
            Some(i) => messages[i].1 += 1,
            None => {
                index.insert(message, messages.len());
                messages.push((message, 1));
            }
        }
    }

    // Stable sort keeps first-occurrence order among equal counts
    messages.sort_by(|a, b| b.1.cmp(&a.1));
    let common_messages = messages
        .into_iter()
        .take(top_n)
        .map(|(message, count)| MessageCount {
            message: message.to_string(),
            count,
        })
        .collect();

    LogStatistics {
        total_entries: records.len(),
        level_counts,
        unleveled_entries,
        degraded_entries,
        time_range,
        common_messages,
        format: None,
    }
}
