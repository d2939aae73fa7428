//! Periodic re-invocation of a task on a fixed-interval ticker.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time;

use crate::error::TaskError;
use crate::scope::Scope;
use crate::tasks::{Task, TaskRef};

/// What a periodic task returns when its scope is canceled between ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CancelPolicy {
    /// Treat cancellation as a clean stop and return `Ok(())`, so a canceled
    /// parent never shows up as a group failure.
    #[default]
    Swallow,
    /// Surface [`TaskError::Canceled`] to the worker.
    Surface,
}

/// Runs the wrapped task once per `interval` until it first fails.
///
/// See [`every`].
pub struct Every {
    task: TaskRef,
    interval: Duration,
    on_cancel: CancelPolicy,
}

impl Every {
    /// Creates a periodic task with the default [`CancelPolicy::Swallow`].
    pub fn new(task: TaskRef, interval: Duration) -> Self {
        Self {
            task,
            interval,
            on_cancel: CancelPolicy::default(),
        }
    }

    /// Overrides what happens when the scope is canceled between ticks.
    pub fn with_cancel_policy(mut self, on_cancel: CancelPolicy) -> Self {
        self.on_cancel = on_cancel;
        self
    }

    /// Returns the task as a shared handle.
    pub fn arc(self) -> TaskRef {
        Arc::new(self)
    }
}

#[async_trait]
impl Task for Every {
    async fn run(&self, scope: Scope) -> Result<(), TaskError> {
        let mut ticker = time::interval_at(time::Instant::now() + self.interval, self.interval);
        // a run that overshoots its interval skips missed ticks instead of bursting
        ticker.set_missed_tick_behavior(time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = scope.cancelled() => {
                    return match self.on_cancel {
                        CancelPolicy::Swallow => Ok(()),
                        CancelPolicy::Surface => Err(TaskError::Canceled),
                    };
                }
                _ = ticker.tick() => {}
            }
            self.task.run(scope.clone()).await?;
        }
    }
}

/// Applies `task` periodically every `interval` until the first failure.
///
/// The first invocation happens after one full interval, not immediately.
/// Cancellation between ticks stops the loop cleanly; use
/// [`Every::with_cancel_policy`] to surface it instead.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use taskgroup::{every, Scope, TaskFn, Worker};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let root = Scope::root();
/// let w = Worker::new(&root);
/// w.go("heartbeat", every(
///     TaskFn::arc(|_scope| async {
///         println!("tick");
///         Ok(())
///     }),
///     Duration::from_millis(10),
/// ));
/// root.cancel();
/// assert!(w.wait().await.is_ok());
/// # }
/// ```
pub fn every(task: TaskRef, interval: Duration) -> TaskRef {
    Every::new(task, interval).arc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counting_task(calls: &Arc<AtomicU32>, fail_at: Option<u32>) -> TaskRef {
        let calls = Arc::clone(calls);
        crate::tasks::TaskFn::arc(move |_scope| {
            let calls = Arc::clone(&calls);
            async move {
                let n = calls.fetch_add(1, Ordering::Relaxed) + 1;
                match fail_at {
                    Some(limit) if n >= limit => Err(TaskError::fail("tick failed")),
                    _ => Ok(()),
                }
            }
        })
    }

    #[tokio::test(start_paused = true)]
    async fn stops_at_the_first_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let task = every(counting_task(&calls, Some(1)), Duration::from_millis(10));

        assert_eq!(
            task.run(Scope::root()).await,
            Err(TaskError::fail("tick failed"))
        );
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn worker_reports_the_tick_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let w = crate::Worker::new(&Scope::root());

        w.go(
            "repeat",
            every(counting_task(&calls, Some(1)), Duration::from_millis(1)),
        );
        assert_eq!(w.wait().await, Err(TaskError::fail("tick failed")));
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn first_invocation_waits_one_interval() {
        let calls = Arc::new(AtomicU32::new(0));
        let task = every(counting_task(&calls, None), Duration::from_millis(100));

        let scope = Scope::root();
        let handle = tokio::spawn({
            let scope = scope.clone();
            async move { task.run(scope).await }
        });

        time::sleep(Duration::from_millis(50)).await;
        assert_eq!(calls.load(Ordering::Relaxed), 0);

        time::sleep(Duration::from_millis(60)).await;
        assert_eq!(calls.load(Ordering::Relaxed), 1);

        scope.cancel();
        assert_eq!(handle.await.expect("join"), Ok(()));
    }

    #[tokio::test(start_paused = true)]
    async fn keeps_ticking_until_canceled() {
        let calls = Arc::new(AtomicU32::new(0));
        let task = every(counting_task(&calls, None), Duration::from_millis(10));

        let scope = Scope::root();
        let handle = tokio::spawn({
            let scope = scope.clone();
            async move { task.run(scope).await }
        });

        time::sleep(Duration::from_millis(105)).await;
        scope.cancel();
        assert_eq!(handle.await.expect("join"), Ok(()));
        assert_eq!(calls.load(Ordering::Relaxed), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn surface_policy_reports_cancellation() {
        let calls = Arc::new(AtomicU32::new(0));
        let task = Every::new(counting_task(&calls, None), Duration::from_secs(1))
            .with_cancel_policy(CancelPolicy::Surface)
            .arc();

        let scope = Scope::root();
        scope.cancel();
        assert_eq!(task.run(scope).await, Err(TaskError::Canceled));
        assert_eq!(calls.load(Ordering::Relaxed), 0);
    }
}
