//! # pollvisor
//!
//! **Pollvisor** is a small async polling primitive for Rust.
//!
//! Give it an async task; it calls the task until it succeeds or a retry
//! budget runs out, waiting between attempts according to a backoff
//! strategy. Use it to wait for an eventually-consistent condition
//! ("is the resource ready yet?") without blocking a thread.
//!
//! ## Architecture
//! ```text
//!   PollOptions (caller)
//!        │  task, strategy, retries, name, progress, interval/start/increment/min/max
//!        ▼
//!   resolve ──► 1. PollerConfig defaults (strategy, retries) + Poller-<n> name
//!        │      2. strategy name validated          ──► ConfigError
//!        │      3. strategy defaults for unset params
//!        ▼
//!   PollSpec ──► Poller::run()
//!                  loop {
//!                    task.poll() ── Ok ──► settle Ok
//!                        │
//!                       Err ──► progress(retries_remaining, &err)
//!                                ├─ budget spent ──► settle Err(last error)
//!                                └─ sleep(backoff.next(attempts_made))
//!                  }
//! ```
//!
//! ## Features
//! | Area           | Description                                              | Key types / traits                      |
//! |----------------|----------------------------------------------------------|-----------------------------------------|
//! | **Tasks**      | Define the polled operation as a closure or a trait impl.| [`PollTask`], [`TaskFn`], [`TaskRef`]   |
//! | **Options**    | Configure strategy, budget, name and listener.           | [`PollOptions`], [`PollSpec`]           |
//! | **Policies**   | Fixed, linear and exponential (jittered) backoff.        | [`Strategy`], [`Backoff`]               |
//! | **Progress**   | Observe every failed attempt.                            | [`Progress`]                            |
//! | **Errors**     | Configuration and cancellation errors.                   | [`ConfigError`], [`PollError`]          |
//! | **Configuration** | Global defaults and name sequence.                    | [`PollerConfig`], [`NameSeq`]           |
//!
//! Diagnostics are emitted through [`tracing`] at `debug` level; nothing
//! depends on a subscriber being installed.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let calls = Arc::new(AtomicU32::new(0));
//!     let counter = calls.clone();
//!
//!     let ready = pollvisor::poll(
//!         pollvisor::PollOptions::new()
//!             .with_task_fn(move || {
//!                 let counter = counter.clone();
//!                 async move {
//!                     match counter.fetch_add(1, Ordering::SeqCst) {
//!                         0 | 1 => Err("not ready"),
//!                         _ => Ok("ready"),
//!                     }
//!                 }
//!             })
//!             .with_strategy("linear-backoff")
//!             .with_start(10)
//!             .with_increment(10)
//!             .with_progress_fn(|left, err: &&str| println!("{err}; {left} retries left")),
//!     )?
//!     .await?;
//!
//!     assert_eq!(ready, "ready");
//!     assert_eq!(calls.load(Ordering::SeqCst), 3);
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod policies;
mod progress;
mod tasks;

use std::future::Future;

// ---- Public re-exports ----

pub use self::core::{NameSeq, Poller, PollerConfig};
pub use error::{ConfigError, PollError};
pub use policies::{Backoff, BackoffParams, Strategy};
pub use progress::{Progress, ProgressRef};
pub use tasks::{PollOptions, PollSpec, PollTask, TaskFn, TaskRef};

/// Resolves `options` and returns the run as a future.
///
/// Configuration errors are returned immediately, before any attempt; the
/// future itself only ever yields the task's success or its last failure.
pub fn poll<T, E>(
    options: PollOptions<T, E>,
) -> Result<impl Future<Output = Result<T, E>> + Send, ConfigError>
where
    T: Send + 'static,
    E: Send + 'static,
{
    let poller = options.build()?;
    Ok(poller.run())
}
