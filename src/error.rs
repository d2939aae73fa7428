//! Error type returned by task executions.
//!
//! [`TaskError`] is deliberately small: tasks either fail with a reason,
//! observe cancellation, hit a deadline, or wrap another failure with extra
//! context. The worker treats every variant as opaque; only the `bypass`
//! middleware inspects errors, via the chain-aware [`TaskError::is`].

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

/// Error produced by a task execution.
///
/// Cloneable because the worker retains the first failure and hands a copy to
/// every [`Worker::wait`](crate::Worker::wait) caller.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Task execution failed.
    #[error("execution failed: {reason}")]
    Fail {
        /// The underlying failure reason.
        reason: String,
    },

    /// Task observed cancellation of its scope and chose to surface it.
    #[error("scope canceled")]
    Canceled,

    /// Task execution exceeded its deadline.
    #[error("timed out after {timeout:?}")]
    Timeout {
        /// The deadline that was exceeded.
        timeout: Duration,
    },

    /// Another failure, wrapped with additional context.
    #[error("{context}")]
    Wrap {
        /// Context describing what was being attempted.
        context: String,
        /// The wrapped failure.
        #[source]
        source: Arc<TaskError>,
    },
}

impl TaskError {
    /// Creates a plain failure from a reason.
    ///
    /// # Example
    /// ```
    /// use taskgroup::TaskError;
    ///
    /// let err = TaskError::fail("connection refused");
    /// assert_eq!(err.to_string(), "execution failed: connection refused");
    /// ```
    pub fn fail(reason: impl Into<String>) -> Self {
        TaskError::Fail { reason: reason.into() }
    }

    /// Wraps this error with additional context, preserving the chain.
    ///
    /// # Example
    /// ```
    /// use taskgroup::TaskError;
    ///
    /// let root = TaskError::fail("connection refused");
    /// let err = root.clone().wrap("dial upstream");
    /// assert_eq!(err.to_string(), "dial upstream");
    /// assert!(err.is(&root));
    /// ```
    pub fn wrap(self, context: impl Into<String>) -> Self {
        TaskError::Wrap {
            context: context.into(),
            source: Arc::new(self),
        }
    }

    /// Chain-aware identity comparison.
    ///
    /// Returns `true` if `self` equals `target`, or if anything `self` wraps
    /// equals `target`. This is what the `bypass` middleware matches with,
    /// so a wrapped instance of an ignorable error is still ignorable.
    pub fn is(&self, target: &TaskError) -> bool {
        let mut cur = self;
        loop {
            if cur == target {
                return true;
            }
            match cur {
                TaskError::Wrap { source, .. } => cur = source,
                _ => return false,
            }
        }
    }

    /// Returns `true` if this error, or anything it wraps, is [`TaskError::Canceled`].
    pub fn is_canceled(&self) -> bool {
        self.is(&TaskError::Canceled)
    }

    /// Returns the innermost error of a wrap chain.
    pub fn root_cause(&self) -> &TaskError {
        let mut cur = self;
        while let TaskError::Wrap { source, .. } = cur {
            cur = source;
        }
        cur
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// Wrapped errors report the label of their root cause.
    ///
    /// # Example
    /// ```
    /// use taskgroup::TaskError;
    ///
    /// let err = TaskError::fail("boom").wrap("sync shard");
    /// assert_eq!(err.as_label(), "task_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self.root_cause() {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Canceled => "task_canceled",
            TaskError::Timeout { .. } => "task_timeout",
            TaskError::Wrap { .. } => unreachable!("root_cause never returns Wrap"),
        }
    }
}
