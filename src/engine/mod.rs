//! Read guard engine
//!
//! Applies the configured line-range thresholds to Read requests, with the
//! operator overrides (disabled, warn-only) layered on top.

pub mod range;

use crate::config::Config;
use crate::input::ReadRequest;
use crate::output::Decision;

use std::env;

/// Skip all checks when set
pub const DISABLED_ENV: &str = "READ_GUARD_DISABLED";

/// Downgrade blocks to warnings when set
pub const WARN_ONLY_ENV: &str = "READ_GUARD_WARN_ONLY";

/// The main read guard
#[derive(Debug, Clone)]
pub struct ReadGuard {
    config: Config,
    disabled: bool,
    warn_only: bool,
}

impl ReadGuard {
    /// Create a guard with the given configuration and no overrides
    pub fn new(config: Config) -> Self {
        Self {
            config,
            disabled: false,
            warn_only: false,
        }
    }

    /// Create a guard, picking up overrides from the environment
    pub fn from_env(config: Config) -> Self {
        Self::new(config)
            .with_disabled(env::var_os(DISABLED_ENV).is_some())
            .with_warn_only(env::var_os(WARN_ONLY_ENV).is_some())
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_warn_only(mut self, warn_only: bool) -> Self {
        self.warn_only = warn_only;
        self
    }

    /// Check if the guard is disabled
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Check if warn-only mode is enabled
    pub fn is_warn_only(&self) -> bool {
        self.warn_only
    }

    /// Main entry point: check a read request and return a decision
    pub fn check(&self, request: &ReadRequest) -> Decision {
        if self.disabled {
            tracing::debug!("disabled via {}", DISABLED_ENV);
            return Decision::Allow;
        }

        let decision = range::evaluate(request.limit, &self.config);
        tracing::debug!(
            limit = request.limit,
            offset = request.offset,
            level = decision.level().as_str(),
            "evaluated read request"
        );

        // If warn-only mode, convert blocks to warnings
        if self.warn_only && decision.is_block() {
            return Decision::warn(&self.config.thresholds.warn);
        }

        decision
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
