//! # Poller options and their resolution.
//!
//! [`PollOptions`] collects what the caller sets; everything is optional
//! except the task. Resolution runs in three steps:
//!
//! ```text
//! 1. global defaults  (PollerConfig: strategy, retries) + default name
//! 2. strategy name    validated against the built-in set
//! 3. strategy defaults filled into absent parameters
//! ```
//!
//! ## Zero means unset
//! Numeric options equal to `0` and empty strings are treated exactly like
//! absent ones and replaced by the default. `with_interval(0)` therefore gives
//! the default interval, and `with_retries(0)` the default budget.
//!
//! ## Example
//! ```rust
//! use pollvisor::{PollOptions, Strategy};
//!
//! let poller = PollOptions::new()
//!     .with_task_fn(|| async { Ok::<_, String>("ready") })
//!     .with_strategy("linear-backoff")
//!     .with_retries(3)
//!     .with_increment(500)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(poller.spec().strategy(), Strategy::LinearBackoff);
//! assert_eq!(poller.spec().retries(), 3);
//! ```

use std::future::Future;
use std::sync::Arc;

use tracing::debug;

use crate::{
    core::{NameSeq, Poller, PollerConfig},
    error::ConfigError,
    policies::{Backoff, BackoffParams, Strategy},
    progress::{Progress, ProgressRef},
    tasks::{PollSpec, TaskFn, TaskRef},
};

/// Caller-supplied poller configuration.
pub struct PollOptions<T, E> {
    task: Option<TaskRef<T, E>>,
    strategy: Option<String>,
    retries: Option<u32>,
    name: Option<String>,
    progress: Option<ProgressRef<E>>,
    params: BackoffParams,
}

impl<T, E> Default for PollOptions<T, E> {
    fn default() -> Self {
        Self {
            task: None,
            strategy: None,
            retries: None,
            name: None,
            progress: None,
            params: BackoffParams::default(),
        }
    }
}

impl<T, E> PollOptions<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Creates empty options. A task must be set before building.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the task from an existing handle.
    pub fn with_task(mut self, task: TaskRef<T, E>) -> Self {
        self.task = Some(task);
        self
    }

    /// Sets the task from a closure producing one future per attempt.
    pub fn with_task_fn<F, Fut>(self, f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        self.with_task(TaskFn::arc(f))
    }

    /// Selects a strategy by name (`fixed-interval`, `linear-backoff`, `exponential-backoff`).
    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }

    /// Sets the failed-attempt budget.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    /// Sets the diagnostic name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attaches a progress listener.
    pub fn with_progress(mut self, progress: impl Progress<E>) -> Self {
        self.progress = Some(Arc::new(progress));
        self
    }

    /// Attaches a closure as progress listener.
    pub fn with_progress_fn<F>(self, f: F) -> Self
    where
        F: Fn(u32, &E) + Send + Sync + 'static,
    {
        self.with_progress(f)
    }

    /// Replaces all strategy parameters at once.
    pub fn with_params(mut self, params: BackoffParams) -> Self {
        self.params = params;
        self
    }

    /// `fixed-interval`: delay in ms.
    pub fn with_interval(mut self, ms: u64) -> Self {
        self.params.interval = Some(ms);
        self
    }

    /// `linear-backoff`: first delay in ms.
    pub fn with_start(mut self, ms: u64) -> Self {
        self.params.start = Some(ms);
        self
    }

    /// `linear-backoff`: growth per failed attempt in ms.
    pub fn with_increment(mut self, ms: u64) -> Self {
        self.params.increment = Some(ms);
        self
    }

    /// `exponential-backoff`: amount subtracted from the exponential ceiling, ms.
    pub fn with_min(mut self, ms: u64) -> Self {
        self.params.min = Some(ms);
        self
    }

    /// `exponential-backoff`: cap on a single delay, ms.
    pub fn with_max(mut self, ms: u64) -> Self {
        self.params.max = Some(ms);
        self
    }

    /// Resolves against the default config and the process-wide name sequence.
    pub fn resolve(self) -> Result<PollSpec<T, E>, ConfigError> {
        self.resolve_with(&PollerConfig::default(), NameSeq::process())
    }

    /// Resolves against an explicit config and name sequence.
    pub fn resolve_with(
        self,
        cfg: &PollerConfig,
        names: &NameSeq,
    ) -> Result<PollSpec<T, E>, ConfigError> {
        let task = self.task.ok_or(ConfigError::MissingTask)?;

        let retries = self
            .retries
            .filter(|r| *r != 0)
            .unwrap_or(cfg.retry_budget());
        let strategy = self.strategy.filter(|s| !s.is_empty());
        let name = match self.name.filter(|n| !n.is_empty()) {
            Some(name) => name,
            None => names.next_name(),
        };
        debug!(poller = %name, retries, "creating poller");

        let strategy = match strategy {
            Some(s) => s.parse::<Strategy>()?,
            None => cfg.strategy,
        };
        debug!(poller = %name, %strategy, "using strategy");

        let backoff = Backoff::resolve(strategy, &self.params);
        debug!(
            poller = %name,
            retries,
            ?backoff,
            progress = self.progress.is_some(),
            "resolved options"
        );

        Ok(PollSpec {
            task,
            backoff,
            retries,
            name: name.into(),
            progress: self.progress,
        })
    }

    /// Resolves the options into a ready-to-run [`Poller`].
    pub fn build(self) -> Result<Poller<T, E>, ConfigError> {
        self.resolve().map(Poller::new)
    }

    /// Same as [`PollOptions::build`] with an explicit config and name sequence.
    pub fn build_with(
        self,
        cfg: &PollerConfig,
        names: &NameSeq,
    ) -> Result<Poller<T, E>, ConfigError> {
        self.resolve_with(cfg, names).map(Poller::new)
    }
}
