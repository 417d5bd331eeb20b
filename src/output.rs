//! Decisions and the hook's observable output
//!
//! A hook invocation produces nothing on stdout: the outcome is the exit code
//! plus any lines written to stderr, which Claude Code shows to the model.

use serde::Serialize;

use crate::config::{Config, Threshold};
use crate::input::ReadRequest;

/// Prefix for diagnostics that are not policy messages
pub const DIAGNOSTIC_PREFIX: &str = "[read-guard]";

/// Enforcement level for a read request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnforcementLevel {
    /// Within `max_read_lines`
    Allow,

    /// Inside the tolerance band
    Warn,

    /// Beyond `max_read_lines + tolerance_lines`
    Block,
}

impl EnforcementLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnforcementLevel::Allow => "allow",
            EnforcementLevel::Warn => "warn",
            EnforcementLevel::Block => "block",
        }
    }
}

/// Decision result from the read guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Allow the read silently
    Allow,

    /// Allow-with-notice or halt, depending on the configured exit code
    Warn { threshold: Threshold },

    /// Halt the read
    Block { threshold: Threshold },
}

impl Decision {
    /// Create a warn decision
    pub fn warn(threshold: &Threshold) -> Self {
        Decision::Warn {
            threshold: threshold.clone(),
        }
    }

    /// Create a block decision
    pub fn block(threshold: &Threshold) -> Self {
        Decision::Block {
            threshold: threshold.clone(),
        }
    }

    pub fn level(&self) -> EnforcementLevel {
        match self {
            Decision::Allow => EnforcementLevel::Allow,
            Decision::Warn { .. } => EnforcementLevel::Warn,
            Decision::Block { .. } => EnforcementLevel::Block,
        }
    }

    /// Check if this is an allow decision
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Check if this is a block decision
    pub fn is_block(&self) -> bool {
        matches!(self, Decision::Block { .. })
    }

    /// Threshold that produced this decision, if any
    pub fn threshold(&self) -> Option<&Threshold> {
        match self {
            Decision::Allow => None,
            Decision::Warn { threshold } | Decision::Block { threshold } => Some(threshold),
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.threshold().map_or(0, |t| t.exit_code)
    }

    /// Configured suggestion text
    pub fn message(&self) -> &str {
        self.threshold().map_or("Allowed", |t| t.message.as_str())
    }
}

/// Exit code plus stderr lines for one invocation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HookOutput {
    pub exit_code: i32,
    pub messages: Vec<String>,
}

impl HookOutput {
    /// Silent allow
    pub fn allow() -> Self {
        HookOutput::default()
    }

    /// Fail-open allow carrying a diagnostic
    pub fn diagnostic(message: impl std::fmt::Display) -> Self {
        HookOutput {
            exit_code: 0,
            messages: vec![format_diagnostic(message)],
        }
    }

    /// Create output from a Decision
    pub fn from_decision(decision: &Decision, request: &ReadRequest, config: &Config) -> Self {
        let message = match decision {
            Decision::Allow => return HookOutput::allow(),
            Decision::Warn { threshold } => warn_message(request, threshold),
            Decision::Block { threshold } => block_message(request, config, threshold),
        };

        HookOutput {
            exit_code: decision.exit_code(),
            messages: vec![message],
        }
    }

    /// Add a diagnostic without touching the exit code
    pub fn push_diagnostic(&mut self, message: impl std::fmt::Display) {
        self.messages.push(format_diagnostic(message));
    }

    /// Write all messages to stderr
    pub fn emit(&self) {
        for message in &self.messages {
            eprintln!("{}", message);
        }
    }
}

fn format_diagnostic(message: impl std::fmt::Display) -> String {
    format!("{} {}", DIAGNOSTIC_PREFIX, message)
}

fn block_message(request: &ReadRequest, config: &Config, threshold: &Threshold) -> String {
    format!(
        "Read operation blocked: requested {} lines ({}-{}).\n\
         Maximum: {} + tolerance: {} = {} lines.\n\n\
         {}",
        request.limit,
        request.offset,
        request.end_line(),
        config.max_read_lines,
        config.tolerance_lines,
        config.max_with_tolerance(),
        threshold.message
    )
}

fn warn_message(request: &ReadRequest, threshold: &Threshold) -> String {
    format!(
        "[WARN] Large read: {} lines ({}-{}).\n{}",
        request.limit,
        request.offset,
        request.end_line(),
        threshold.message
    )
}
