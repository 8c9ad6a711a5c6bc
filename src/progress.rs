//! # Progress listener
//!
//! [`Progress`] is notified synchronously after every failed attempt, before
//! the backoff delay, with the number of retries left and the failure value.
//! The final, terminal failure is reported too (with `0` remaining).
//!
//! Any `Fn(u32, &E)` closure that is `Send + Sync` is a listener.
//!
//! A panic inside a listener is not caught: it unwinds out of the run future
//! and the run never settles.
//!
//! ## Example
//! ```rust
//! use pollvisor::Progress;
//!
//! struct Stderr;
//!
//! impl Progress<String> for Stderr {
//!     fn on_progress(&self, retries_remaining: u32, error: &String) {
//!         eprintln!("{retries_remaining} left after: {error}");
//!     }
//! }
//! ```

use std::sync::Arc;

/// Shared handle to a progress listener.
pub type ProgressRef<E> = Arc<dyn Progress<E>>;

/// Observer of failed attempts.
pub trait Progress<E>: Send + Sync + 'static {
    /// Called once per failed attempt with the updated remaining budget.
    fn on_progress(&self, retries_remaining: u32, error: &E);
}

impl<E, F> Progress<E> for F
where
    F: Fn(u32, &E) + Send + Sync + 'static,
{
    fn on_progress(&self, retries_remaining: u32, error: &E) {
        self(retries_remaining, error)
    }
}
