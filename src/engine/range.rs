//! Line-range threshold checks
//!
//! Two breakpoints split requested line counts into three bands. Comparisons
//! are strictly greater-than, so a limit sitting exactly on a breakpoint lands
//! in the lower band.

use crate::config::Config;
use crate::output::{Decision, EnforcementLevel};

/// Classify a requested line count against the configured thresholds
pub fn classify(limit: i64, config: &Config) -> EnforcementLevel {
    if limit > config.max_with_tolerance() {
        EnforcementLevel::Block
    } else if limit > config.max_read_lines {
        EnforcementLevel::Warn
    } else {
        EnforcementLevel::Allow
    }
}

/// Classify a limit and attach the matching threshold
pub fn evaluate(limit: i64, config: &Config) -> Decision {
    match classify(limit, config) {
        EnforcementLevel::Block => Decision::block(&config.thresholds.block),
        EnforcementLevel::Warn => Decision::warn(&config.thresholds.warn),
        EnforcementLevel::Allow => Decision::Allow,
    }
}
