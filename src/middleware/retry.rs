//! Retry with constant backoff.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time;
use tracing::debug;

use crate::error::TaskError;
use crate::scope::Scope;
use crate::tasks::{Task, TaskRef};

/// Re-invokes the wrapped task on failure until the retry budget runs out.
///
/// See [`retry`].
pub struct Retry {
    task: TaskRef,
    retries: Option<u32>,
    backoff: Duration,
}

impl Retry {
    /// Creates a retrying task; `retries` counts re-invocations after the
    /// first attempt, `None` meaning no limit.
    pub fn new(task: TaskRef, retries: Option<u32>, backoff: Duration) -> Self {
        Self { task, retries, backoff }
    }

    /// Returns the task as a shared handle.
    pub fn arc(self) -> TaskRef {
        Arc::new(self)
    }
}

#[async_trait]
impl Task for Retry {
    async fn run(&self, scope: Scope) -> Result<(), TaskError> {
        let mut remaining = self.retries;
        loop {
            let err = match self.task.run(scope.clone()).await {
                Ok(()) => return Ok(()),
                Err(err) => err,
            };

            match remaining.as_mut() {
                Some(0) => return Err(err),
                Some(n) => *n -= 1,
                None => {}
            }

            debug!(
                task = scope.task_name(),
                error = %err,
                backoff = ?self.backoff,
                "retry scheduled"
            );
            tokio::select! {
                // cancellation ends the retry loop cleanly, without an error
                _ = scope.cancelled() => return Ok(()),
                _ = time::sleep(self.backoff) => {}
            }
        }
    }
}

/// Retries `task` on failure, waiting `backoff` between attempts.
///
/// - `Some(n)`: up to `n` retries after the first attempt, `n + 1`
///   invocations total. `Some(0)` means a single attempt.
/// - `None`: retry until the task succeeds or the scope is canceled.
///
/// The backoff is constant — no growth, no jitter. When the budget is
/// exhausted the last underlying error is returned as is; cancellation during
/// backoff stops the loop with `Ok(())`.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use taskgroup::{retry, Scope, TaskError, TaskFn};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let flaky = TaskFn::arc(|_scope| async { Err(TaskError::fail("boom")) });
/// let task = retry(flaky, Some(2), Duration::from_millis(1));
///
/// // 1 attempt + 2 retries, then the failure surfaces
/// assert_eq!(task.run(Scope::root()).await, Err(TaskError::fail("boom")));
/// # }
/// ```
pub fn retry(task: TaskRef, retries: Option<u32>, backoff: Duration) -> TaskRef {
    Retry::new(task, retries, backoff).arc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::TaskFn;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn failing_task(calls: &Arc<AtomicU32>) -> TaskRef {
        let calls = Arc::clone(calls);
        TaskFn::arc(move |_scope| {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::Relaxed);
                Err(TaskError::fail("boom"))
            }
        })
    }

    #[tokio::test(start_paused = true)]
    async fn invokes_one_plus_n_times() {
        let calls = Arc::new(AtomicU32::new(0));
        let task = retry(failing_task(&calls), Some(3), Duration::from_millis(1));

        assert_eq!(task.run(Scope::root()).await, Err(TaskError::fail("boom")));
        assert_eq!(calls.load(Ordering::Relaxed), 4);
    }

    #[tokio::test]
    async fn zero_retries_means_single_attempt() {
        let calls = Arc::new(AtomicU32::new(0));
        let task = retry(failing_task(&calls), Some(0), Duration::from_millis(1));

        assert_eq!(task.run(Scope::root()).await, Err(TaskError::fail("boom")));
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn success_returns_immediately() {
        let calls = Arc::new(AtomicU32::new(0));
        let counted = Arc::clone(&calls);
        let succeeds_third = TaskFn::arc(move |_scope| {
            let counted = Arc::clone(&counted);
            async move {
                if counted.fetch_add(1, Ordering::Relaxed) + 1 < 3 {
                    Err(TaskError::fail("not yet"))
                } else {
                    Ok(())
                }
            }
        });
        let task = retry(succeeds_third, Some(10), Duration::from_millis(1));

        assert_eq!(task.run(Scope::root()).await, Ok(()));
        assert_eq!(calls.load(Ordering::Relaxed), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn unbounded_retry_stops_cleanly_on_cancellation() {
        let calls = Arc::new(AtomicU32::new(0));
        let scope = Scope::root();

        let counted = Arc::clone(&calls);
        let canceling = {
            let scope = scope.clone();
            TaskFn::arc(move |_scope| {
                let scope = scope.clone();
                let counted = Arc::clone(&counted);
                async move {
                    if counted.fetch_add(1, Ordering::Relaxed) + 1 == 10 {
                        scope.cancel();
                    }
                    Err(TaskError::fail("boom"))
                }
            })
        };
        let task = retry(canceling, None, Duration::from_millis(1));

        assert_eq!(task.run(scope).await, Ok(()));
        assert_eq!(calls.load(Ordering::Relaxed), 10);
    }
}
