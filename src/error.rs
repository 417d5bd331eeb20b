//! Error types for read-guard
//!
//! None of these ever decide the exit code on their own: the dispatcher turns
//! every `GuardError` into a diagnostic line and exit status 0.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while evaluating a single hook invocation
#[derive(Debug, Error)]
pub enum GuardError {
    /// Reading the hook payload from stdin failed
    #[error("stdin error: {0}")]
    Stdin(#[source] std::io::Error),

    /// The hook payload was not valid JSON or had an unusable shape
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file was not valid JSON
    #[error("failed to parse config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The log directory could not be created
    #[error("failed to create log directory {}: {source}", .path.display())]
    LogDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A log entry could not be encoded
    #[error("failed to encode log entry: {0}")]
    LogEncode(#[source] serde_json::Error),

    /// Appending to the log file failed
    #[error("failed to append to {}: {source}", .path.display())]
    LogAppend {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The evaluation task stopped without producing an outcome
    #[error("evaluation aborted: {0}")]
    Aborted(String),
}

impl GuardError {
    /// Whether this error came from the best-effort logging step
    pub fn is_logging(&self) -> bool {
        matches!(
            self,
            GuardError::LogDir { .. } | GuardError::LogEncode(_) | GuardError::LogAppend { .. }
        )
    }
}
