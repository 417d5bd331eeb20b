//! Configuration loading for read-guard
//!
//! Reads the `read_validator` section of `hooks-config.json` and shallow-merges
//! it over embedded defaults. Loading never fails from the caller's point of
//! view: anything unusable falls back to [`Config::default`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::GuardError;

/// File name looked up next to the installed executable
pub const CONFIG_FILE_NAME: &str = "hooks-config.json";

/// Top-level key holding this hook's settings
pub const CONFIG_SECTION: &str = "read_validator";

const DEFAULT_MAX_READ_LINES: i64 = 400;
const DEFAULT_TOLERANCE_LINES: i64 = 200;

const DEFAULT_BLOCK_MESSAGE: &str = "Read operation blocked: exceeds maximum allowed lines.\nSuggestion: Split into smaller reads or use Grep.";
const DEFAULT_WARN_MESSAGE: &str =
    "Large read detected. Read size logged for analysis - consider optimization if pattern repeats.";

/// Exit code and message attached to one enforcement level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threshold {
    /// Process exit code used when this level is reached
    pub exit_code: i32,

    /// Suggestion text appended to the stderr message and logged
    pub message: String,
}

/// Per-level thresholds. Always loaded as a whole so exit codes and messages
/// never come from different sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub block: Threshold,
    pub warn: Threshold,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            block: Threshold {
                exit_code: 2,
                message: DEFAULT_BLOCK_MESSAGE.to_string(),
            },
            warn: Threshold {
                exit_code: 1,
                message: DEFAULT_WARN_MESSAGE.to_string(),
            },
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Largest read that passes silently
    pub max_read_lines: i64,

    /// Extra lines above `max_read_lines` that only warn. Negative values
    /// leave the warn band empty.
    pub tolerance_lines: i64,

    pub thresholds: Thresholds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_read_lines: DEFAULT_MAX_READ_LINES,
            tolerance_lines: DEFAULT_TOLERANCE_LINES,
            thresholds: Thresholds::default(),
        }
    }
}

impl Config {
    /// Load from `hooks-config.json` next to the executable, or use defaults
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            tracing::debug!("could not resolve executable directory, using defaults");
            return Config::default();
        };

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!(error = %e, "config unavailable, using defaults");
                Config::default()
            }
        }
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self, GuardError> {
        let content = std::fs::read_to_string(path).map_err(|source| GuardError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let document: Value =
            serde_json::from_str(&content).map_err(|source| GuardError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(Self::from_document(&document))
    }

    /// Build a configuration from a whole `hooks-config.json` document
    pub fn from_document(document: &Value) -> Self {
        match document.get(CONFIG_SECTION) {
            Some(section) => Config::default().merge(section),
            None => Config::default(),
        }
    }

    /// Shallow-merge a `read_validator` section over this configuration.
    ///
    /// Keys with the wrong type are ignored. `thresholds` replaces the current
    /// thresholds only when both `block` and `warn` are complete.
    pub fn merge(self, section: &Value) -> Self {
        let Some(overrides) = section.as_object() else {
            return self;
        };

        let max_read_lines = overrides
            .get("max_read_lines")
            .and_then(Value::as_i64)
            .unwrap_or(self.max_read_lines);
        let tolerance_lines = overrides
            .get("tolerance_lines")
            .and_then(Value::as_i64)
            .unwrap_or(self.tolerance_lines);
        let thresholds = match overrides.get("thresholds") {
            Some(value) => match Thresholds::deserialize(value) {
                Ok(thresholds) => thresholds,
                Err(e) => {
                    tracing::debug!(error = %e, "incomplete thresholds, keeping defaults");
                    self.thresholds
                }
            },
            None => self.thresholds,
        };

        Config {
            max_read_lines,
            tolerance_lines,
            thresholds,
        }
    }

    /// Upper bound of the tolerance band
    pub fn max_with_tolerance(&self) -> i64 {
        self.max_read_lines.saturating_add(self.tolerance_lines)
    }

    /// `hooks-config.json` in the directory holding the running executable
    pub fn default_path() -> Option<PathBuf> {
        let exe = std::env::current_exe().ok()?;
        exe.parent().map(|dir| dir.join(CONFIG_FILE_NAME))
    }

    /// Expand ~ in path strings
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }
}

/// Embedded default configuration, in the on-disk format
pub const DEFAULT_CONFIG_JSON: &str = r#"{
  "read_validator": {
    "max_read_lines": 400,
    "tolerance_lines": 200,
    "thresholds": {
      "block": {
        "exit_code": 2,
        "message": "Read operation blocked: exceeds maximum allowed lines.\nSuggestion: Split into smaller reads or use Grep."
      },
      "warn": {
        "exit_code": 1,
        "message": "Large read detected. Read size logged for analysis - consider optimization if pattern repeats."
      }
    }
  }
}"#;
