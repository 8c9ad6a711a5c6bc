//! # Default poller names.
//!
//! A [`NameSeq`] hands out `Poller-<n>` labels from a monotonically increasing
//! atomic counter. Names are unique within one sequence only; they are meant
//! for diagnostics and carry no behavior.

use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide sequence used when options do not supply one.
static PROCESS_NAMES: NameSeq = NameSeq::new();

/// Monotonic source of default poller names.
#[derive(Debug, Default)]
pub struct NameSeq {
    next: AtomicU64,
}

impl NameSeq {
    /// Creates a sequence starting at `Poller-0`.
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    /// Returns the process-wide sequence.
    pub fn process() -> &'static NameSeq {
        &PROCESS_NAMES
    }

    /// Allocates the next name.
    pub fn next_name(&self) -> String {
        format!("Poller-{}", self.next.fetch_add(1, Ordering::Relaxed))
    }
}
