//! The [`Task`] trait: an async, cancelable unit of work.
//!
//! A task receives a [`Scope`] carrying its cancellation signal and bound
//! name, and should periodically check the scope to stop cooperatively. The
//! common handle type is [`TaskRef`], an `Arc<dyn Task>` suitable for sharing
//! across the runtime and for middleware nesting.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TaskError;
use crate::scope::Scope;

/// Shared handle to a task.
pub type TaskRef = Arc<dyn Task>;

/// Asynchronous, cancelable unit of work.
///
/// Implementors should regularly check `scope.is_cancelled()` (or select on
/// `scope.cancelled()`) and exit promptly when the group shuts down. A task
/// that ignores cancellation simply runs to natural completion; nothing
/// forcibly interrupts it.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use taskgroup::{Scope, Task, TaskError};
///
/// struct Demo;
///
/// #[async_trait]
/// impl Task for Demo {
///     async fn run(&self, scope: Scope) -> Result<(), TaskError> {
///         if scope.is_cancelled() {
///             return Ok(());
///         }
///         // do work...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Task: Send + Sync + 'static {
    /// Executes the task until completion or cancellation.
    async fn run(&self, scope: Scope) -> Result<(), TaskError>;
}
