//! Per-run deadline enforcement.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time;

use crate::error::TaskError;
use crate::scope::Scope;
use crate::tasks::{Task, TaskRef};

/// Bounds each run of the wrapped task by a deadline.
///
/// See [`timeout`].
pub struct Timeout {
    task: TaskRef,
    limit: Duration,
}

impl Timeout {
    /// Creates a deadline-bounded task.
    pub fn new(task: TaskRef, limit: Duration) -> Self {
        Self { task, limit }
    }

    /// Returns the task as a shared handle.
    pub fn arc(self) -> TaskRef {
        Arc::new(self)
    }
}

#[async_trait]
impl Task for Timeout {
    async fn run(&self, scope: Scope) -> Result<(), TaskError> {
        // the wrapped task runs under its own child, so expiry cancels it
        // without touching the parent or sibling tasks
        let child = scope.child();
        match time::timeout(self.limit, self.task.run(child.clone())).await {
            Ok(res) => res,
            Err(_elapsed) => {
                child.cancel();
                Err(TaskError::Timeout { timeout: self.limit })
            }
        }
    }
}

/// Fails `task` with [`TaskError::Timeout`] if a run exceeds `limit`.
///
/// On expiry the task's child scope is canceled so it can wind down
/// cooperatively; the parent scope is unaffected.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use taskgroup::{timeout, Scope, TaskError, TaskFn};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let slow = TaskFn::arc(|_scope| async {
///     tokio::time::sleep(Duration::from_secs(60)).await;
///     Ok(())
/// });
/// let task = timeout(slow, Duration::from_millis(10));
///
/// assert_eq!(
///     task.run(Scope::root()).await,
///     Err(TaskError::Timeout { timeout: Duration::from_millis(10) }),
/// );
/// # }
/// ```
pub fn timeout(task: TaskRef, limit: Duration) -> TaskRef {
    Timeout::new(task, limit).arc()
}
