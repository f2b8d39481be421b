//! Log analysis engine for OpsZen.
//!
//! Detects the format of a log file (generic, JSON lines, BSD syslog, Apache
//! access, Python logging), parses every line into a normalized [`LogRecord`],
//! and filters, aggregates, exports or follows the result. A `LogSource`
//! abstraction keeps the core testable, and four JSON-argument tools
//! (analyze_logs, filter_logs, tail_logs, export_logs) wrap it for dispatch.

pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod follow;
pub mod mock;
pub mod parsers;
pub mod session;
pub mod source;
pub mod stats;
pub mod timestamp;
pub mod tools;
pub mod types;

// Re-export key types for convenience
pub use config::{AnalyzerConfig, SyslogYear};
pub use error::{LogError, LogResult};
pub use export::{ExportFormat, ExportOptions, ExportedRecord, export_records};
pub use filter::{CompiledFilter, FilterCriteria, filter_records};
pub use follow::TailFollower;
pub use mock::MockLogSource;
pub use parsers::{detect_format, parse_line};
pub use session::AnalyzerSession;
pub use source::{FileLogSource, LogSource};
pub use stats::{LogStatistics, MessageCount, TimeRange, analyze};
pub use timestamp::parse_timestamp;
pub use tools::{ToolInfo, ToolRegistry};
pub use types::{LogFormat, LogLevel, LogRecord, LogTool, ParseQuality, ToolResult};
