//! `LogReporter` — tracing-backed reporter.
//!
//! A minimal [`Report`] implementation that emits one `tracing` event per
//! completed run. Use it for tests or demos, or as a reference for wiring a
//! metrics backend.
//!
//! ## Example output
//! ```text
//! INFO task run completed task="poller" elapsed=12.4ms
//! WARN task run failed task="poller" elapsed=30.0s label="task_timeout" error=timed out after 30s
//! ```

use std::time::Duration;

use tracing::{info, warn};

use crate::error::TaskError;
use crate::report::Report;

/// Reporter that logs every run through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl LogReporter {
    /// Constructs a new [`LogReporter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Report for LogReporter {
    fn report(&self, name: &str, elapsed: Duration, error: Option<&TaskError>) {
        match error {
            None => info!(task = name, ?elapsed, "task run completed"),
            Some(err) => warn!(
                task = name,
                ?elapsed,
                label = err.as_label(),
                error = %err,
                "task run failed"
            ),
        }
    }
}
