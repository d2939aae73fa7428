//! Task middleware: pure `TaskRef -> TaskRef` combinators.
//!
//! Each combinator wraps a task and returns another task with the same
//! signature, so they nest freely:
//!
//! ```text
//! instrument(retry(every(task, d1), Some(3), d2), reporter)
//! ```
//!
//! ## Contents
//! - [`every`]      fixed-interval re-invocation until the first error
//! - [`retry`]      bounded or unbounded retry with constant backoff
//! - [`bypass`]     selective error suppression (chain-aware matching)
//! - [`instrument`] wall-clock measurement with a reporter callback
//! - [`timeout`]    per-run deadline with isolated cancellation
//!
//! No combinator holds state shared with another instance; wrapping never
//! changes how the worker schedules or joins the task.

mod bypass;
mod every;
mod instrument;
mod retry;
mod timeout;

pub use bypass::{bypass, Bypass};
pub use every::{every, CancelPolicy, Every};
pub use instrument::{instrument, Instrument};
pub use retry::{retry, Retry};
pub use timeout::{timeout, Timeout};
