//! # Resolved poll specification.
//!
//! Defines [`PollSpec`], the immutable, fully-populated configuration of one
//! run: the task, its [`Backoff`], the retry budget, a name and an optional
//! progress listener. Specs are produced by
//! [`PollOptions::resolve`](crate::PollOptions::resolve) and consumed by
//! [`Poller`](crate::Poller).

use std::fmt;
use std::sync::Arc;

use crate::{policies::Backoff, policies::Strategy, progress::ProgressRef, tasks::TaskRef};

/// Specification for one poll run.
pub struct PollSpec<T, E> {
    pub(crate) task: TaskRef<T, E>,
    pub(crate) backoff: Backoff,
    pub(crate) retries: u32,
    pub(crate) name: Arc<str>,
    pub(crate) progress: Option<ProgressRef<E>>,
}

impl<T, E> PollSpec<T, E> {
    /// Returns reference to the task.
    pub fn task(&self) -> &TaskRef<T, E> {
        &self.task
    }

    /// Returns the resolved backoff parameters.
    pub fn backoff(&self) -> Backoff {
        self.backoff
    }

    /// Convenience: returns the strategy of the resolved backoff.
    pub fn strategy(&self) -> Strategy {
        self.backoff.strategy()
    }

    /// Returns the failed-attempt budget (always at least 1).
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Returns the poller name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if a progress listener is attached.
    pub fn has_progress(&self) -> bool {
        self.progress.is_some()
    }
}

impl<T, E> fmt::Debug for PollSpec<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollSpec")
            .field("name", &self.name)
            .field("retries", &self.retries)
            .field("backoff", &self.backoff)
            .field("progress", &self.progress.is_some())
            .finish_non_exhaustive()
    }
}
