//! # Function-backed task (`TaskFn`)
//!
//! [`TaskFn`] wraps a closure `F: Fn() -> Fut`, producing a fresh future per
//! attempt. Nothing is shared between attempts unless the closure captures it;
//! use `Arc<...>` explicitly inside the closure for shared state.
//!
//! ## Example
//! ```rust
//! use pollvisor::{TaskFn, TaskRef};
//!
//! let t: TaskRef<u32, String> = TaskFn::arc(|| async { Ok::<_, String>(7) });
//! # let _ = t;
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::tasks::task::PollTask;

/// Function-backed task implementation.
///
/// Wraps a closure that *creates* a new future per attempt.
#[derive(Debug, Clone)]
pub struct TaskFn<F> {
    f: F,
}

impl<F> TaskFn<F> {
    /// Creates a new function-backed task.
    ///
    /// Prefer [`TaskFn::arc`] when you immediately need a [`TaskRef`](crate::TaskRef).
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the task and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F, Fut, T, E> PollTask for TaskFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    type Output = T;
    type Error = E;

    async fn poll(&self) -> Result<T, E> {
        (self.f)().await
    }
}
