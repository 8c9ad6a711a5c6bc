//! # Pollable task abstraction.
//!
//! This module defines the [`PollTask`] trait: one async attempt that either
//! produces a value or fails. The common handle type is [`TaskRef`], an
//! `Arc<dyn PollTask>` suitable for sharing across runs.
//!
//! The poller makes no assumptions about what happens inside an attempt and
//! never interprets the error it returns.

use std::sync::Arc;

use async_trait::async_trait;

/// # Shared handle to a task object.
pub type TaskRef<T, E> = Arc<dyn PollTask<Output = T, Error = E>>;

/// # One asynchronous attempt at reaching a condition.
///
/// Each call to [`poll`](PollTask::poll) is an independent attempt. The
/// poller calls it sequentially, never concurrently for the same run.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use pollvisor::PollTask;
///
/// struct Ready;
///
/// #[async_trait]
/// impl PollTask for Ready {
///     type Output = &'static str;
///     type Error = String;
///
///     async fn poll(&self) -> Result<Self::Output, Self::Error> {
///         Ok("ready")
///     }
/// }
/// ```
#[async_trait]
pub trait PollTask: Send + Sync + 'static {
    /// Value produced by a successful attempt.
    type Output: Send + 'static;
    /// Failure value of an unsuccessful attempt.
    type Error: Send + 'static;

    /// Performs one attempt.
    async fn poll(&self) -> Result<Self::Output, Self::Error>;
}
