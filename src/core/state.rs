//! # Per-run retry counters.

/// Mutable counters owned by one run.
///
/// `attempts_made` is derived from the budget, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RunState {
    retries: u32,
    retries_remaining: u32,
}

impl RunState {
    /// Starts a run with the full budget. A zero budget is treated as one.
    pub(crate) fn new(retries: u32) -> Self {
        let retries = retries.max(1);
        Self {
            retries,
            retries_remaining: retries,
        }
    }

    /// Records one failed attempt and returns the updated remaining count.
    pub(crate) fn record_failure(&mut self) -> u32 {
        self.retries_remaining = self.retries_remaining.saturating_sub(1);
        self.retries_remaining
    }

    /// Number of failed attempts so far (the strategy's `count`).
    pub(crate) fn attempts_made(&self) -> u32 {
        self.retries - self.retries_remaining
    }

    /// Whether the budget is spent.
    pub(crate) fn is_exhausted(&self) -> bool {
        self.retries_remaining == 0
    }
}
