//! Filter engine: level threshold, case-insensitive pattern, inclusive time window.
//!
//! Criteria arrive as text (from tool arguments or CLI flags) and are compiled
//! once. Compilation rejects bad input before any record is looked at, so a
//! failed filter never observes or touches the store.

use chrono::{DateTime, Utc};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::error::{LogError, LogResult};
use crate::timestamp::parse_timestamp;
use crate::types::{LogLevel, LogRecord};

/// Uncompiled filter criteria. Every field is optional; absent fields do not
/// constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FilterCriteria {
    /// Minimum level; records at this level or more severe match.
    pub level: Option<String>,
    /// Regular expression searched (case-insensitively) in the message.
    pub pattern: Option<String>,
    /// Inclusive lower time bound.
    pub start_time: Option<String>,
    /// Inclusive upper time bound.
    pub end_time: Option<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.level.is_none()
            && self.pattern.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
    }

    pub fn compile(&self) -> LogResult<CompiledFilter> {
        CompiledFilter::compile(self)
    }
}

/// Validated criteria, ready to match records.
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    min_level: Option<LogLevel>,
    pattern: Option<Regex>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl CompiledFilter {
    pub fn compile(criteria: &FilterCriteria) -> LogResult<Self> {
        let min_level = criteria
            .level
            .as_deref()
            .map(|token| {
                LogLevel::parse(token.trim())
                    .ok_or_else(|| LogError::InvalidFilter(format!("unknown level: {token}")))
            })
            .transpose()?;

        let pattern = criteria
            .pattern
            .as_deref()
            .map(|p| {
                RegexBuilder::new(p)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| LogError::InvalidFilter(format!("bad pattern '{p}': {e}")))
            })
            .transpose()?;

        let start = criteria.start_time.as_deref().map(time_bound).transpose()?;
        let end = criteria.end_time.as_deref().map(time_bound).transpose()?;
        if let (Some(s), Some(e)) = (start, end)
            && s > e
        {
            return Err(LogError::InvalidFilter(format!(
                "start time {s} is after end time {e}"
            )));
        }

        Ok(Self {
            min_level,
            pattern,
            start,
            end,
        })
    }

    /// True if the record satisfies every supplied predicate.
    pub fn matches(&self, record: &LogRecord) -> bool {
        if let Some(min) = self.min_level
            && record.level.is_none_or(|level| level < min)
        {
            return false;
        }
        if let Some(re) = &self.pattern
            && !re.is_match(record.search_text())
        {
            return false;
        }
        if self.start.is_some() || self.end.is_some() {
            let Some(ts) = record.timestamp else {
                return false;
            };
            if self.start.is_some_and(|s| ts < s) || self.end.is_some_and(|e| ts > e) {
                return false;
            }
        }
        true
    }

    /// Matching records in store order. The input is never modified.
    pub fn apply(&self, records: &[LogRecord]) -> Vec<LogRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

/// Compile `criteria` and apply it to `records`.
pub fn filter_records(records: &[LogRecord], criteria: &FilterCriteria) -> LogResult<Vec<LogRecord>> {
    Ok(CompiledFilter::compile(criteria)?.apply(records))
}

fn time_bound(text: &str) -> LogResult<DateTime<Utc>> {
    parse_timestamp(text).ok_or_else(|| LogError::InvalidFilter(format!("bad time bound: {text}")))
}
