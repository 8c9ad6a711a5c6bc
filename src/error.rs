//! Error types used by pollvisor.
//!
//! - [`ConfigError`] invalid options, raised by [`PollOptions::build`](crate::PollOptions::build)
//!   before any attempt runs. Never retried.
//! - [`PollError`] outcome of a cancellable run: the task's own failure or cancellation.
//!
//! A plain [`Poller::run`](crate::Poller::run) does not wrap anything: the task's
//! last error is returned verbatim.

use thiserror::Error;

/// # Errors produced while resolving poller options.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No task was supplied.
    #[error("no task function specified in options")]
    MissingTask,

    /// The strategy name is not one of the built-in strategies.
    #[error("invalid strategy \"{name}\"; valid strategies are {valid}")]
    UnknownStrategy {
        /// The rejected name.
        name: String,
        /// Comma-separated list of valid names.
        valid: String,
    },
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use pollvisor::ConfigError;
    ///
    /// assert_eq!(ConfigError::MissingTask.as_label(), "config_missing_task");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::MissingTask => "config_missing_task",
            ConfigError::UnknownStrategy { .. } => "config_unknown_strategy",
        }
    }
}

/// # Outcome of a cancellable run that did not succeed.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum PollError<E> {
    /// The retry budget ran out; carries the last task failure.
    #[error("retries exhausted: {0:?}")]
    Task(E),

    /// The run was cancelled before it settled.
    #[error("poll cancelled")]
    Canceled,
}

impl<E> PollError<E> {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            PollError::Task(_) => "poll_exhausted",
            PollError::Canceled => "poll_canceled",
        }
    }

    /// Returns the task failure, or `None` if the run was cancelled.
    pub fn into_task(self) -> Option<E> {
        match self {
            PollError::Task(e) => Some(e),
            PollError::Canceled => None,
        }
    }

    /// Returns `true` if the run was cancelled.
    pub fn is_canceled(&self) -> bool {
        matches!(self, PollError::Canceled)
    }
}
