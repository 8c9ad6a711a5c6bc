//! Runtime core: the poll loop and its configuration.
//!
//! Public API from this module: [`Poller`], [`PollerConfig`], [`NameSeq`].
//!
//! Internal modules:
//! - [`runner`]: executes one attempt and traces its outcome;
//! - [`poller`]: drives attempts, backoff sleeps and settlement;
//! - [`state`]: per-run retry counters;
//! - [`names`]: default `Poller-<n>` names;
//! - [`config`]: global defaults.

mod config;
mod names;
mod poller;
mod runner;
mod state;

pub use config::PollerConfig;
pub use names::NameSeq;
pub use poller::Poller;
