//! # Poller: the attempt loop.
//!
//! Drives one [`PollSpec`] to a single settlement.
//!
//! ## Architecture
//! ```text
//! PollOptions ──► resolve ──► PollSpec ──► Poller::run()
//!
//! loop {
//!   ├─► (cancellable run) token cancelled? ─► Canceled
//!   ├─► run_once(task) ─────► task.poll()
//!   │       │
//!   │       ├─ Ok(v)  ──► settle Ok(v)
//!   │       │
//!   │       └─ Err(e) ──► retries_remaining -= 1
//!   │                    ├─► progress.on_progress(retries_remaining, &e)
//!   │                    ├─ remaining == 0 ─► settle Err(e)
//!   │                    └─ otherwise:
//!   │                         ├─ delay = backoff.next(attempts_made)
//!   │                         └─ sleep(delay) (cancellable)
//! }
//! ```
//!
//! ## Rules
//! - Attempts run **sequentially**, never in parallel
//! - The run settles **exactly once**: with the first success or the last failure
//! - The last failure is returned verbatim; no attempt is made after it
//! - `retries = 1` means one attempt, no delay, no strategy call

use std::convert;
use std::fmt;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{
    core::{runner::run_once, state::RunState},
    error::PollError,
    tasks::PollSpec,
};

/// Runs a task until it succeeds or its retry budget is spent.
///
/// Built by [`PollOptions::build`](crate::PollOptions::build).
///
/// # Example
/// ```rust
/// use pollvisor::PollOptions;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let poller = PollOptions::new()
///         .with_task_fn(|| async { Ok::<_, String>(42) })
///         .with_interval(10)
///         .build()
///         .unwrap();
///
///     assert_eq!(poller.run().await, Ok(42));
/// }
/// ```
pub struct Poller<T, E> {
    spec: PollSpec<T, E>,
}

impl<T, E> fmt::Debug for Poller<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poller").field("spec", &self.spec).finish()
    }
}

impl<T, E> Poller<T, E> {
    /// Creates a poller from a resolved spec.
    pub fn new(spec: PollSpec<T, E>) -> Self {
        Self { spec }
    }

    /// Returns the resolved spec.
    pub fn spec(&self) -> &PollSpec<T, E> {
        &self.spec
    }
}

/// Early stop for a run: the token to watch and the outcome it settles with.
type Halt<'a, R> = Option<(&'a CancellationToken, fn() -> R)>;

impl<T, E> Poller<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Runs to completion.
    ///
    /// Resolves with the task's first success, or fails with the task's last
    /// failure once the budget is spent.
    pub async fn run(self) -> Result<T, E> {
        self.drive::<E>(None, convert::identity).await
    }

    /// Runs until completion or until `token` is cancelled.
    ///
    /// The token is checked before each attempt and raced against every
    /// backoff sleep. An attempt already in flight is not interrupted.
    pub async fn run_until_cancelled(self, token: CancellationToken) -> Result<T, PollError<E>> {
        let canceled: fn() -> PollError<E> = || PollError::Canceled;
        self.drive(Some((&token, canceled)), PollError::Task).await
    }

    /// The attempt loop. Task failures are mapped through `fail`; `halt`
    /// supplies the outcome of a cancelled run.
    async fn drive<R>(self, halt: Halt<'_, R>, fail: fn(E) -> R) -> Result<T, R> {
        let PollSpec {
            task,
            backoff,
            retries,
            name,
            progress,
        } = self.spec;
        let mut state = RunState::new(retries);

        loop {
            if let Some((_, canceled)) = halt.filter(|(token, _)| token.is_cancelled()) {
                debug!(poller = %name, "cancelled before attempt");
                return Err(canceled());
            }

            let attempt = state.attempts_made() + 1;
            let error = match run_once(task.as_ref(), &name, attempt).await {
                Ok(value) => {
                    debug!(poller = %name, attempt, "resolving");
                    return Ok(value);
                }
                Err(e) => e,
            };

            let remaining = state.record_failure();
            if let Some(listener) = &progress {
                listener.on_progress(remaining, &error);
            }

            if state.is_exhausted() {
                warn!(poller = %name, attempts = attempt, "maximum retries reached");
                return Err(fail(error));
            }
            debug!(poller = %name, remaining, "retries remaining");

            let delay = backoff.next(state.attempts_made());
            debug!(poller = %name, ?delay, "waiting before next attempt");

            let sleep = time::sleep(delay);
            match halt {
                Some((token, canceled)) => {
                    select! {
                        biased;
                        _ = token.cancelled() => {
                            debug!(poller = %name, "cancelled during backoff");
                            return Err(canceled());
                        }
                        _ = sleep => {}
                    }
                }
                None => sleep.await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConfigError, PollOptions};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::time::Instant;

    /// Task failing the first `failures` calls with `"fail #n"`, then succeeding
    /// with the call number.
    fn flaky(failures: u32, calls: Arc<AtomicU32>) -> PollOptions<u32, String> {
        PollOptions::new().with_task_fn(move || {
            let calls = calls.clone();
            async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if n <= failures {
                    Err(format!("fail #{n}"))
                } else {
                    Ok(n)
                }
            }
        })
    }

    /// Paused clock: allow for millisecond rounding of timer deadlines.
    fn assert_elapsed(started: Instant, ms: u64) {
        let elapsed = started.elapsed();
        assert!(
            elapsed >= Duration::from_millis(ms) && elapsed < Duration::from_millis(ms + 10),
            "expected ~{ms}ms, got {elapsed:?}"
        );
    }

    type Seen = Arc<Mutex<Vec<(u32, String)>>>;

    fn recorder() -> (Seen, impl Fn(u32, &String) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |left: u32, err: &String| {
            sink.lock().unwrap().push((left, err.clone()))
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_fails_twice_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let (seen, listener) = recorder();
        let poller = flaky(2, calls.clone())
            .with_retries(5)
            .with_strategy("fixed-interval")
            .with_interval(100)
            .with_progress_fn(listener)
            .build()
            .unwrap();

        let started = Instant::now();
        let res = poller.run().await;

        assert_eq!(res, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_elapsed(started, 200);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![(4, "fail #1".to_string()), (3, "fail #2".to_string())]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_fails_returns_last_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let (seen, listener) = recorder();
        let poller = flaky(u32::MAX, calls.clone())
            .with_retries(3)
            .with_interval(50)
            .with_progress_fn(listener)
            .build()
            .unwrap();

        let started = Instant::now();
        let res = poller.run().await;

        assert_eq!(res, Err("fail #3".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // Two delays; none after the terminal failure.
        assert_elapsed(started, 100);
        let remaining: Vec<u32> = seen.lock().unwrap().iter().map(|(n, _)| *n).collect();
        assert_eq!(remaining, vec![2, 1, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_retry_fails_without_delay() {
        let calls = Arc::new(AtomicU32::new(0));
        let (seen, listener) = recorder();
        let poller = flaky(u32::MAX, calls.clone())
            .with_retries(1)
            .with_interval(10_000)
            .with_progress_fn(listener)
            .build()
            .unwrap();

        let started = Instant::now();
        assert_eq!(poller.run().await, Err("fail #1".to_string()));
        assert!(started.elapsed() < Duration::from_millis(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*seen.lock().unwrap(), vec![(0, "fail #1".to_string())]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_listener_runs_before_each_delay() {
        let calls = Arc::new(AtomicU32::new(0));
        let started = Instant::now();
        let stamps = Arc::new(Mutex::new(Vec::new()));
        let sink = stamps.clone();
        let poller = flaky(u32::MAX, calls.clone())
            .with_retries(3)
            .with_interval(100)
            .with_progress_fn(move |left, _: &String| {
                sink.lock().unwrap().push((left, started.elapsed()))
            })
            .build()
            .unwrap();

        assert_eq!(poller.run().await, Err("fail #3".to_string()));

        let stamps = stamps.lock().unwrap();
        let left: Vec<u32> = stamps.iter().map(|(n, _)| *n).collect();
        assert_eq!(left, vec![2, 1, 0]);
        // Each listener call lands before its delay, and each delay is one interval.
        for ((_, at), expected) in stamps.iter().zip([0u64, 100, 200]) {
            let window = Duration::from_millis(expected)..Duration::from_millis(expected + 10);
            assert!(window.contains(at), "expected listener at ~{expected}ms, got {at:?}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_on_first_attempt() {
        let calls = Arc::new(AtomicU32::new(0));
        let (seen, listener) = recorder();
        let poller = flaky(0, calls.clone())
            .with_progress_fn(listener)
            .build()
            .unwrap();

        assert_eq!(poller.run().await, Ok(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_linear_backoff_delays() {
        let calls = Arc::new(AtomicU32::new(0));
        let poller = flaky(3, calls.clone())
            .with_strategy("linear-backoff")
            .with_start(1000)
            .with_increment(500)
            .build()
            .unwrap();

        let started = Instant::now();
        assert_eq!(poller.run().await, Ok(4));
        // 1000 + 1500 + 2000
        assert_elapsed(started, 4500);
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_interval_used_when_zero() {
        let calls = Arc::new(AtomicU32::new(0));
        let poller = flaky(1, calls.clone()).with_interval(0).build().unwrap();

        let started = Instant::now();
        assert_eq!(poller.run().await, Ok(2));
        assert_elapsed(started, 1000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exponential_backoff_stays_under_max() {
        let calls = Arc::new(AtomicU32::new(0));
        let poller = flaky(4, calls.clone())
            .with_strategy("exponential-backoff")
            .with_max(2000)
            .build()
            .unwrap();

        let started = Instant::now();
        assert_eq!(poller.run().await, Ok(5));
        assert!(started.elapsed() < Duration::from_millis(4 * 2000 + 10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_before_first_attempt() {
        let calls = Arc::new(AtomicU32::new(0));
        let poller = flaky(0, calls.clone()).build().unwrap();

        let token = CancellationToken::new();
        token.cancel();
        let res = poller.run_until_cancelled(token).await;

        assert!(matches!(res, Err(PollError::Canceled)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_during_backoff() {
        let calls = Arc::new(AtomicU32::new(0));
        let poller = flaky(u32::MAX, calls.clone())
            .with_interval(60_000)
            .build()
            .unwrap();

        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let started = Instant::now();
        let res = poller.run_until_cancelled(token).await;

        assert!(matches!(res, Err(PollError::Canceled)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(started.elapsed() < Duration::from_millis(60_000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellable_run_reports_task_failure() {
        let calls = Arc::new(AtomicU32::new(0));
        let poller = flaky(u32::MAX, calls.clone())
            .with_retries(2)
            .with_interval(1)
            .build()
            .unwrap();

        let res = poller.run_until_cancelled(CancellationToken::new()).await;
        match res {
            Err(PollError::Task(e)) => assert_eq!(e, "fail #2"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_entry_point() {
        let calls = Arc::new(AtomicU32::new(0));
        let run = crate::poll(flaky(1, calls.clone()).with_interval(5)).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0, "no attempt before the future is polled");
        assert_eq!(run.await, Ok(2));
    }

    #[test]
    fn test_poll_entry_point_rejects_bad_strategy_synchronously() {
        let calls = Arc::new(AtomicU32::new(0));
        let res = crate::poll(flaky(0, calls.clone()).with_strategy("nope"));
        assert!(matches!(res, Err(ConfigError::UnknownStrategy { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_task_reported_before_any_attempt() {
        let res = PollOptions::<(), String>::new().with_retries(3).build();
        assert!(matches!(res, Err(ConfigError::MissingTask)));
    }

    #[tokio::test]
    #[should_panic(expected = "listener exploded")]
    async fn test_listener_panic_propagates() {
        let calls = Arc::new(AtomicU32::new(0));
        let poller = flaky(1, calls)
            .with_interval(1)
            .with_progress_fn(|_, _| panic!("listener exploded"))
            .build()
            .unwrap();
        let _ = poller.run().await;
    }
}
