//! # taskgroup
//!
//! **taskgroup** is a small structured-concurrency primitive for Tokio:
//! a [`Worker`] runs a group of named async tasks under one shared cancelable
//! scope, waits for all of them, and reports the first failure — while every
//! task still runs to completion.
//!
//! ## Architecture
//! ```text
//!  caller ──► Worker::new(root scope)
//!                │ derives one shared, cancelable Scope
//!                │
//!    go("a", task) ──► tokio::spawn ── shared.child().with_task_name("a") ──► task a
//!    go("b", task) ──► tokio::spawn ── shared.child().with_task_name("b") ──► task b
//!                │
//!                │   first Err ──► recorded once ──► shared scope canceled
//!                │                 (best-effort signal; nothing is killed)
//!                ▼
//!    wait().await ──► blocks until outstanding == 0 ──► Err(first) | Ok(())
//! ```
//!
//! Middleware combinators transform one task into another and nest freely;
//! the worker never knows whether a task is wrapped:
//!
//! ```text
//! instrument(retry(every(task, d1), Some(3), d2), reporter)
//! ```
//!
//! ## Features
//! | Area           | Description                                               | Key types / functions                  |
//! |----------------|-----------------------------------------------------------|----------------------------------------|
//! | **Worker**     | Spawn named tasks, join them, first error wins.           | [`Worker`]                             |
//! | **Scope**      | Derivable cancellation context with task-name binding.    | [`Scope`]                              |
//! | **Tasks**      | Define tasks as trait impls or plain closures.            | [`Task`], [`TaskFn`], [`TaskRef`]      |
//! | **Middleware** | Periodic runs, retry, error suppression, timing, deadline.| [`every`], [`retry`], [`bypass`], [`instrument`], [`timeout`] |
//! | **Errors**     | One cloneable task error with chain-aware matching.       | [`TaskError`]                          |
//!
//! ## Optional features
//! - `logging`: exports a tracing-backed [`LogReporter`] for `instrument`
//!   _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use std::time::Duration;
//! use taskgroup::{retry, Scope, TaskFn, Worker};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), taskgroup::TaskError> {
//!     let count = Arc::new(AtomicU32::new(0));
//!     let w = Worker::new(&Scope::root());
//!
//!     // a plain task
//!     let counted = Arc::clone(&count);
//!     w.go_fn("one", move |_scope| {
//!         let counted = Arc::clone(&counted);
//!         async move {
//!             counted.fetch_add(1, Ordering::Relaxed);
//!             Ok(())
//!         }
//!     });
//!
//!     // the same, wrapped in retry middleware
//!     let counted = Arc::clone(&count);
//!     w.go("two", retry(
//!         TaskFn::arc(move |_scope| {
//!             let counted = Arc::clone(&counted);
//!             async move {
//!                 counted.fetch_add(1, Ordering::Relaxed);
//!                 Ok(())
//!             }
//!         }),
//!         Some(3),
//!         Duration::from_millis(100),
//!     ));
//!
//!     w.wait().await?;
//!     assert_eq!(count.load(Ordering::Relaxed), 2);
//!     Ok(())
//! }
//! ```

mod error;
mod middleware;
mod report;
mod scope;
mod tasks;
mod worker;

// ---- Public re-exports ----

pub use error::TaskError;
pub use middleware::{
    bypass, every, instrument, retry, timeout, Bypass, CancelPolicy, Every, Instrument, Retry,
    Timeout,
};
pub use report::Report;
pub use scope::Scope;
pub use tasks::{Task, TaskFn, TaskRef};
pub use worker::Worker;

// Optional: expose the tracing-backed reporter for `instrument`.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use report::LogReporter;
