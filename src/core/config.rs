//! # Global poller defaults.
//!
//! Provides [`PollerConfig`], the defaults merged into every
//! [`PollOptions`](crate::PollOptions) before strategy-specific defaults.
//!
//! Config is used in two ways:
//! 1. **Implicitly** by [`PollOptions::build`](crate::PollOptions::build) (`PollerConfig::default()`)
//! 2. **Explicitly** by [`PollOptions::build_with`](crate::PollOptions::build_with)
//!
//! ## Sentinel values
//! - `retries = 0` → a budget of one attempt (see [`PollerConfig::retry_budget`])

use crate::policies::Strategy;

/// Defaults applied to options the caller left unset.
///
/// ## Field semantics
/// - `strategy`: strategy used when the caller names none (or an empty name)
/// - `retries`: failed-attempt budget when the caller passes none (or `0`)
#[derive(Clone, Debug)]
pub struct PollerConfig {
    /// Default backoff strategy.
    pub strategy: Strategy,

    /// Default number of attempts before giving up.
    pub retries: u32,
}

impl PollerConfig {
    /// Returns the default budget clamped to a minimum of one attempt.
    #[inline]
    pub fn retry_budget(&self) -> u32 {
        self.retries.max(1)
    }
}

impl Default for PollerConfig {
    /// Default configuration:
    ///
    /// - `strategy = fixed-interval`
    /// - `retries = 5`
    fn default() -> Self {
        Self {
            strategy: Strategy::FixedInterval,
            retries: 5,
        }
    }
}
