//! Execution instrumentation.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::time;

use crate::error::TaskError;
use crate::report::Report;
use crate::scope::Scope;
use crate::tasks::{Task, TaskRef};

/// Measures the wrapped task and reports each completed run.
///
/// See [`instrument`].
pub struct Instrument {
    task: TaskRef,
    reporter: Arc<dyn Report>,
}

impl Instrument {
    /// Creates an instrumented task.
    pub fn new(task: TaskRef, reporter: impl Report) -> Self {
        Self {
            task,
            reporter: Arc::new(reporter),
        }
    }

    /// Returns the task as a shared handle.
    pub fn arc(self) -> TaskRef {
        Arc::new(self)
    }
}

#[async_trait]
impl Task for Instrument {
    async fn run(&self, scope: Scope) -> Result<(), TaskError> {
        let start = time::Instant::now();
        let res = self.task.run(scope.clone()).await;
        self.reporter
            .report(scope.task_name(), start.elapsed(), res.as_ref().err());
        res
    }
}

/// Reports the name, wall-clock duration, and outcome of every run of `task`.
///
/// The reporter is invoked synchronously after each completion, success or
/// failure, with the task name bound by the worker (empty if the task runs
/// outside a worker). The original result is returned unchanged; the reporter
/// never alters control flow.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use taskgroup::{instrument, Scope, TaskError, TaskFn};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let task = instrument(
///     TaskFn::arc(|_scope| async { Ok(()) }),
///     |name: &str, elapsed: Duration, error: Option<&TaskError>| {
///         println!("task {name} finished in {elapsed:?}, error: {error:?}");
///     },
/// );
/// assert_eq!(task.run(Scope::root()).await, Ok(()));
/// # }
/// ```
pub fn instrument(task: TaskRef, reporter: impl Report) -> TaskRef {
    Instrument::new(task, reporter).arc()
}
