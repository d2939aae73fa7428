//! Worker: a group of named, concurrently running tasks.
//!
//! A [`Worker`] derives one cancelable scope from the root it is built with
//! and runs every submitted task under a per-task derivation of it. The first
//! task error is retained and cancels the shared scope, signaling sibling
//! tasks to wind down; [`Worker::wait`] still drains every outstanding task
//! before returning, nothing is abandoned.
//!
//! ```text
//! root scope ──► Worker::new ──► shared scope (cancelable)
//!                                   │
//!                go("a", ..) ──►  shared.child().with_task_name("a") ──► task a
//!                go("b", ..) ──►  shared.child().with_task_name("b") ──► task b
//!                                   │
//!                first Err ──► record once ──► shared.cancel()
//!                wait() ──► outstanding == 0 ──► retained error | Ok
//! ```

use std::future::Future;
use std::sync::{Arc, OnceLock};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::TaskError;
use crate::scope::Scope;
use crate::tasks::{TaskFn, TaskRef};

/// Orchestrates concurrent tasks and retains their first failure.
///
/// Cloning yields another handle to the same group: a task may clone the
/// worker and submit siblings while a `wait` is in flight.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use taskgroup::{Scope, Worker};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), taskgroup::TaskError> {
///     let count = Arc::new(AtomicU32::new(0));
///     let w = Worker::new(&Scope::root());
///
///     for name in ["one", "two"] {
///         let count = Arc::clone(&count);
///         w.go_fn(name, move |_scope| {
///             let count = Arc::clone(&count);
///             async move {
///                 count.fetch_add(1, Ordering::Relaxed);
///                 Ok(())
///             }
///         });
///     }
///
///     w.wait().await?;
///     assert_eq!(count.load(Ordering::Relaxed), 2);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Worker {
    scope: Scope,
    inner: Arc<Inner>,
}

struct Inner {
    /// Outstanding-task counter; `wait` blocks on it reaching zero.
    outstanding: watch::Sender<usize>,
    /// First task error, written at most once for the worker's lifetime.
    first_err: OnceLock<TaskError>,
}

/// Decrements the outstanding counter when the task future completes or is
/// torn down by a panic.
struct Outstanding(Arc<Inner>);

impl Drop for Outstanding {
    fn drop(&mut self) {
        self.0.outstanding.send_modify(|n| *n -= 1);
    }
}

impl Worker {
    /// Creates a worker under `root`, deriving the shared cancelable scope
    /// every submitted task executes under. Always succeeds.
    pub fn new(root: &Scope) -> Self {
        let (outstanding, _) = watch::channel(0usize);
        Self {
            scope: root.child(),
            inner: Arc::new(Inner {
                outstanding,
                first_err: OnceLock::new(),
            }),
        }
    }

    /// Starts `name`d `task` concurrently, immediately.
    ///
    /// The task runs under a fresh child of the shared scope with `name`
    /// bound, so its own cancellation cannot leak to siblings while group
    /// cancellation still reaches it. Names are not required to be unique;
    /// duplicates do not collide.
    ///
    /// If the task fails and no failure has been recorded yet, its error
    /// becomes the group result and the shared scope is canceled.
    pub fn go(&self, name: impl Into<Arc<str>>, task: TaskRef) {
        let name = name.into();
        let task_scope = self.scope.child().with_task_name(Arc::clone(&name));
        let group = self.scope.clone();
        let inner = Arc::clone(&self.inner);

        inner.outstanding.send_modify(|n| *n += 1);
        tokio::spawn(async move {
            let _outstanding = Outstanding(Arc::clone(&inner));
            debug!(task = %name, "task started");
            match task.run(task_scope).await {
                Ok(()) => debug!(task = %name, "task finished"),
                Err(err) => {
                    warn!(task = %name, error = %err, "task failed");
                    if inner.first_err.set(err).is_ok() {
                        group.cancel();
                    }
                }
            }
        });
    }

    /// Convenience for submitting a closure; see [`Worker::go`].
    pub fn go_fn<F, Fut>(&self, name: impl Into<Arc<str>>, f: F)
    where
        F: Fn(Scope) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
    {
        self.go(name, TaskFn::arc(f));
    }

    /// Blocks until every outstanding task has finished, then returns the
    /// first recorded error, if any.
    ///
    /// Idempotent: repeated calls with no new submissions return the same
    /// result immediately. A recorded error is sticky — later join cycles
    /// that add tasks via [`Worker::go`] still report it.
    pub async fn wait(&self) -> Result<(), TaskError> {
        let mut outstanding = self.inner.outstanding.subscribe();
        // The sender lives in `inner`, so this cannot observe a closed channel
        // while `self` is alive.
        let _ = outstanding.wait_for(|n| *n == 0).await;

        match self.inner.first_err.get() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
