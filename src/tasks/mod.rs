//! # Task abstractions, options and specifications.
//!
//! This module provides the task-related types:
//! - [`PollTask`] - trait for one async attempt
//! - [`TaskFn`] - function-based task implementation
//! - [`TaskRef`] - shared reference to a task (`Arc<dyn PollTask>`)
//! - [`PollOptions`] - caller configuration and its resolution
//! - [`PollSpec`] - resolved configuration of one run

mod options;
mod spec;
mod task;
mod task_fn;

pub use options::PollOptions;
pub use spec::PollSpec;
pub use task::{PollTask, TaskRef};
pub use task_fn::TaskFn;
