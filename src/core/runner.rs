//! # Run a single attempt of a pollable task.
//!
//! Executes one attempt and reports the outcome to the diagnostic trace.
//! The result is returned untouched: success values and failures are never
//! wrapped, formatted or interpreted here.

use tracing::{debug, trace};

use crate::tasks::PollTask;

/// Executes attempt number `attempt` (1-based) of `task` for poller `name`.
pub(crate) async fn run_once<T, E>(
    task: &dyn PollTask<Output = T, Error = E>,
    name: &str,
    attempt: u32,
) -> Result<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    trace!(poller = name, attempt, "attempt starting");
    let res = task.poll().await;
    match &res {
        Ok(_) => debug!(poller = name, attempt, "poll succeeded"),
        Err(_) => debug!(poller = name, attempt, "poll failed"),
    }
    res
}
