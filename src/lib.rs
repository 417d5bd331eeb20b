//! read-guard - keep Claude Code Read calls to a sensible size
//!
//! A PreToolUse hook that inspects the line range of a `Read` request and
//! allows, warns about, or blocks it based on configurable thresholds, so the
//! model reaches for Grep or a narrower read instead of pulling whole files.
//!
//! # Features
//!
//! - **Three enforcement levels**: allow, warn (tolerance band), block
//! - **JSON configuration**: `hooks-config.json` shallow-merged over defaults
//! - **Decision log**: JSONL record of every warn/block for threshold tuning
//! - **Fail-open**: malformed input or internal errors never block a read
//!
//! # Example
//!
//! ```
//! use read_guard::{Config, HookInput, ReadGuard};
//!
//! let guard = ReadGuard::new(Config::default());
//!
//! let input = r#"{"tool_name":"Read","tool_input":{"limit":700}}"#;
//! let request = HookInput::from_json(input).unwrap().read_request().unwrap();
//!
//! let decision = guard.check(&request);
//! assert!(decision.is_block());
//! assert_eq!(decision.exit_code(), 2);
//! ```

pub mod audit;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod input;
pub mod output;

// Re-exports for convenience
pub use audit::{AuditEntry, AuditLogger};
pub use config::{Config, Threshold, Thresholds};
pub use engine::ReadGuard;
pub use error::GuardError;
pub use input::{HookInput, ReadRequest, ToolInput};
pub use output::{Decision, EnforcementLevel, HookOutput};
