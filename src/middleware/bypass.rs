//! Selective error suppression.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TaskError;
use crate::scope::Scope;
use crate::tasks::{Task, TaskRef};

/// Suppresses errors matching an ignore set.
///
/// See [`bypass`].
pub struct Bypass {
    task: TaskRef,
    ignore: Vec<TaskError>,
}

impl Bypass {
    /// Creates a task that ignores the given errors.
    pub fn new(task: TaskRef, ignore: impl IntoIterator<Item = TaskError>) -> Self {
        Self {
            task,
            ignore: ignore.into_iter().collect(),
        }
    }

    /// Returns the task as a shared handle.
    pub fn arc(self) -> TaskRef {
        Arc::new(self)
    }
}

#[async_trait]
impl Task for Bypass {
    async fn run(&self, scope: Scope) -> Result<(), TaskError> {
        match self.task.run(scope).await {
            Err(err) if self.ignore.iter().any(|target| err.is(target)) => Ok(()),
            res => res,
        }
    }
}

/// Ignores certain errors from `task`.
///
/// Matching is chain-aware via [`TaskError::is`]: a wrapped instance of an
/// ignorable error is still suppressed. Any other error propagates unchanged.
///
/// # Example
/// ```
/// use taskgroup::{bypass, Scope, TaskError, TaskFn};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let task = bypass(
///     TaskFn::arc(|scope: Scope| async move {
///         scope.cancelled().await;
///         Err(TaskError::Canceled) // will be ignored
///     }),
///     [TaskError::Canceled],
/// );
///
/// let scope = Scope::root();
/// scope.cancel();
/// assert_eq!(task.run(scope).await, Ok(()));
/// # }
/// ```
pub fn bypass(task: TaskRef, ignore: impl IntoIterator<Item = TaskError>) -> TaskRef {
    Bypass::new(task, ignore).arc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::TaskFn;

    fn failing_with(err: TaskError) -> TaskRef {
        TaskFn::arc(move |_scope| {
            let err = err.clone();
            async move { Err(err) }
        })
    }

    #[tokio::test]
    async fn suppresses_matching_errors() {
        let task = bypass(failing_with(TaskError::Canceled), [TaskError::Canceled]);
        assert_eq!(task.run(Scope::root()).await, Ok(()));
    }

    #[tokio::test]
    async fn suppresses_wrapped_instances() {
        let root = TaskError::fail("connection reset");
        let task = bypass(
            failing_with(root.clone().wrap("read frame")),
            [root],
        );
        assert_eq!(task.run(Scope::root()).await, Ok(()));
    }

    #[tokio::test]
    async fn propagates_other_errors_unchanged() {
        let task = bypass(
            failing_with(TaskError::fail("boom")),
            [TaskError::Canceled],
        );
        assert_eq!(
            task.run(Scope::root()).await,
            Err(TaskError::fail("boom"))
        );
    }

    #[tokio::test]
    async fn success_passes_through() {
        let task = bypass(
            TaskFn::arc(|_scope| async { Ok(()) }),
            [TaskError::Canceled],
        );
        assert_eq!(task.run(Scope::root()).await, Ok(()));
    }
}
