//! Log analyzer error types.

use thiserror::Error;

/// Errors that can occur during log analysis operations.
///
/// Unparseable lines are deliberately absent: a line that does not match its
/// grammar degrades to a raw-only record instead of failing the load.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("log file not found: {0}")]
    NotFound(String),

    #[error("cannot read {path}: {message}")]
    Unreadable { path: String, message: String },

    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid log format: {0}")]
    Format(String),

    #[error("export to {path} failed: {message}")]
    Export { path: String, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl LogError {
    /// Map an I/O error from opening or reading `path`, keeping not-found distinct.
    pub fn from_io(path: &str, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path.to_string())
        } else {
            Self::Unreadable {
                path: path.to_string(),
                message: err.to_string(),
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Convenience alias for log analysis results.
pub type LogResult<T> = Result<T, LogError>;
