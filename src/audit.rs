//! JSONL decision logging for read-guard
//!
//! Records warn and block decisions to `logs/tools/Read.jsonl` under the
//! project root for later threshold tuning. Each record is one line written
//! with a single append, so concurrent hook processes interleave whole lines.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::error::GuardError;
use crate::input::{ReadRequest, READ_TOOL};
use crate::output::{Decision, EnforcementLevel};

/// Environment variable holding the project root
pub const PROJECT_DIR_ENV: &str = "CLAUDE_PROJECT_DIR";

/// Log directory, relative to the project root
pub const LOG_DIR: &str = "logs/tools";

/// Log file name inside [`LOG_DIR`]
pub const LOG_FILE: &str = "Read.jsonl";

const UNKNOWN: &str = "unknown";

/// A logged enforcement event
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    /// When the decision was made
    #[serde(serialize_with = "iso_millis")]
    pub timestamp: DateTime<Utc>,

    pub tool: String,
    pub limit: i64,
    pub offset: i64,
    pub end_line: i64,
    pub enforcement_level: EnforcementLevel,
    pub exit_code: i32,
    pub file_path: String,
    pub session_id: String,
    pub message: String,
}

fn iso_millis<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl AuditEntry {
    /// Create a new audit entry from a request and its decision
    pub fn new(request: &ReadRequest, decision: &Decision) -> Self {
        Self {
            timestamp: Utc::now(),
            tool: READ_TOOL.to_string(),
            limit: request.limit,
            offset: request.offset,
            end_line: request.end_line(),
            enforcement_level: decision.level(),
            exit_code: decision.exit_code(),
            file_path: request.file_path.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            session_id: request.session_id.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            message: decision.message().to_string(),
        }
    }

    /// Encode as one JSONL line, newline included
    pub fn to_line(&self) -> Result<String, GuardError> {
        let mut line = serde_json::to_string(self).map_err(GuardError::LogEncode)?;
        line.push('\n');
        Ok(line)
    }
}

/// Append-only decision logger
#[derive(Debug, Clone, Default)]
pub struct AuditLogger {
    path: Option<PathBuf>,
}

impl AuditLogger {
    /// Create a logger writing to `path`, or a disabled one for `None`
    pub fn new(path: Option<&Path>) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
        }
    }

    /// Logger for `<root>/logs/tools/Read.jsonl`
    pub fn for_project(root: &Path) -> Self {
        Self::new(Some(&root.join(LOG_DIR).join(LOG_FILE)))
    }

    /// Logger rooted at `$CLAUDE_PROJECT_DIR`, or the current directory
    pub fn from_env() -> Self {
        let root = std::env::var_os(PROJECT_DIR_ENV)
            .map(PathBuf::from)
            .or_else(|| std::env::current_dir().ok());

        match root {
            Some(root) => Self::for_project(&root),
            None => {
                tracing::debug!("no project root available, decision log disabled");
                Self::default()
            }
        }
    }

    /// Log file path, if logging is enabled
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Check if logging is enabled
    pub fn is_enabled(&self) -> bool {
        self.path.is_some()
    }

    /// Append an audit entry
    pub async fn log(&self, entry: &AuditEntry) -> Result<(), GuardError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|source| GuardError::LogDir {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }

        let line = entry.to_line()?;
        let append_error = |source| GuardError::LogAppend {
            path: path.to_path_buf(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(append_error)?;
        file.write_all(line.as_bytes()).await.map_err(append_error)?;
        file.flush().await.map_err(append_error)?;

        tracing::debug!(path = %path.display(), level = entry.enforcement_level.as_str(), "logged decision");
        Ok(())
    }

    /// Log a decision
    pub async fn log_decision(
        &self,
        request: &ReadRequest,
        decision: &Decision,
    ) -> Result<(), GuardError> {
        self.log(&AuditEntry::new(request, decision)).await
    }
}
