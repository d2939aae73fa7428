//! Function-backed task (`TaskFn`).
//!
//! [`TaskFn`] wraps a closure `F: Fn(Scope) -> Fut`, producing a fresh future
//! per invocation. Middleware such as `every` and `retry` re-invoke the same
//! task many times, so the closure owns no per-run state; if runs need to
//! share state, move an `Arc<...>` into the closure explicitly.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TaskError;
use crate::scope::Scope;
use crate::tasks::task::{Task, TaskRef};

/// Function-backed task implementation.
///
/// # Example
/// ```
/// use taskgroup::{Scope, TaskFn, TaskRef, TaskError};
///
/// let task: TaskRef = TaskFn::arc(|scope: Scope| async move {
///     if scope.is_cancelled() {
///         return Ok(());
///     }
///     // do work...
///     Ok::<_, TaskError>(())
/// });
/// ```
#[derive(Debug)]
pub struct TaskFn<F> {
    f: F,
}

impl<F> TaskFn<F> {
    /// Creates a new function-backed task.
    ///
    /// Prefer [`TaskFn::arc`] when you immediately need a [`TaskRef`].
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F, Fut> TaskFn<F>
where
    F: Fn(Scope) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    /// Creates the task and returns it as a shared handle.
    pub fn arc(f: F) -> TaskRef {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F, Fut> Task for TaskFn<F>
where
    F: Fn(Scope) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    async fn run(&self, scope: Scope) -> Result<(), TaskError> {
        (self.f)(scope).await
    }
}
