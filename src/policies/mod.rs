//! Backoff policies.
//!
//! This module groups the knobs that control **how long** a poller waits
//! between a failed attempt and the next one.
//!
//! ## Contents
//! - [`Strategy`]      the closed set of strategy names and their defaults
//! - [`BackoffParams`] caller overrides (absent or `0` → default)
//! - [`Backoff`]       resolved parameters; `next_delay_ms(count)` per retry
//!
//! ## Quick wiring
//! ```text
//! PollOptions { strategy, params }
//!      └─► Backoff::resolve(strategy, &params)
//!           └─► core::poller uses backoff.next_delay_ms(attempts_made)
//! ```

mod backoff;
mod jitter;
mod strategy;

pub use backoff::{Backoff, BackoffParams};
pub use strategy::Strategy;
