//! Reporting surface for the `instrument` middleware.
//!
//! - [`Report`] - trait receiving one callback per completed task run
//! - [`LogReporter`] - built-in reporter emitting `tracing` events
//!   _(feature `logging`, demo/reference only)_

#[cfg(feature = "logging")]
mod log;

#[cfg(feature = "logging")]
pub use log::LogReporter;

use std::time::Duration;

use crate::error::TaskError;

/// Receives the outcome of every instrumented task run.
///
/// Called synchronously from the task's own execution context after each run,
/// success or failure. Implementations should be quick and must not panic;
/// they cannot alter the task's result.
///
/// Any matching closure works through the blanket impl:
///
/// ```
/// use std::time::Duration;
/// use taskgroup::{Report, TaskError};
///
/// fn takes_reporter(_r: impl Report) {}
///
/// takes_reporter(|name: &str, elapsed: Duration, error: Option<&TaskError>| {
///     eprintln!("{name}: {elapsed:?} ({error:?})");
/// });
/// ```
pub trait Report: Send + Sync + 'static {
    /// Reports one completed run: the task's bound name (empty outside a
    /// worker), the wall-clock duration, and the error if the run failed.
    fn report(&self, name: &str, elapsed: Duration, error: Option<&TaskError>);
}

impl<F> Report for F
where
    F: Fn(&str, Duration, Option<&TaskError>) + Send + Sync + 'static,
{
    fn report(&self, name: &str, elapsed: Duration, error: Option<&TaskError>) {
        self(name, elapsed, error)
    }
}
