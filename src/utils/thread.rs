//! Background Task Launcher - Fire-and-forget work on its own OS thread.
//!
//! Every launch spawns a fresh, named thread. There is no pool, no queue and
//! no cancellation. Threads are detached: dropping the [`TaskHandle`] never
//! waits, and a running task does not hold the process open at exit.
//!
//! A panic inside a task is caught on the task's thread and logged with
//! `tracing::error!`. The caller never observes it.
//!
//! # Example
//!
//! ```ignore
//! use spark_widgets::utils::{run_in_thread, thread_with};
//!
//! let handle = thread_with(|(a, b): (i32, i32)| println!("{}", a + b), (1, 2))?;
//!
//! let fetch = run_in_thread(|url: String| download(&url));
//! fetch("https://example.com".into())?;
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{Builder, JoinHandle, Thread, ThreadId};

use crate::error::TaskError;

/// Counter for generated thread names.
static TASK_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn next_task_name() -> String {
    let n = TASK_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("spark-task-{n}")
}

// =============================================================================
// Handle
// =============================================================================

/// Handle to a launched task.
///
/// Dropping it detaches the thread.
#[derive(Debug)]
pub struct TaskHandle {
    inner: JoinHandle<()>,
}

impl TaskHandle {
    /// The underlying thread.
    pub fn thread(&self) -> &Thread {
        self.inner.thread()
    }

    pub fn id(&self) -> ThreadId {
        self.inner.thread().id()
    }

    /// Thread name (`spark-task-<n>` unless launched with [`thread_named`]).
    pub fn name(&self) -> Option<&str> {
        self.inner.thread().name()
    }

    /// Has the task returned (or panicked)?
    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    /// Block until the task is done.
    ///
    /// Task panics are already reported on the task thread and are not
    /// surfaced here.
    pub fn join(self) {
        let _ = self.inner.join();
    }
}

// =============================================================================
// Launch
// =============================================================================

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}

fn spawn<F>(name: String, work: F) -> Result<TaskHandle, TaskError>
where
    F: FnOnce() + Send + 'static,
{
    let task_name = name.clone();
    let inner = Builder::new()
        .name(name.clone())
        .spawn(move || {
            tracing::debug!(task = %task_name, "task started");
            match panic::catch_unwind(AssertUnwindSafe(work)) {
                Ok(()) => tracing::debug!(task = %task_name, "task finished"),
                Err(payload) => tracing::error!(
                    task = %task_name,
                    panic = panic_message(payload.as_ref()),
                    "task panicked"
                ),
            }
        })
        .map_err(|source| TaskError::Spawn { name, source })?;

    Ok(TaskHandle { inner })
}

/// Run `target` on a new detached thread and return immediately.
pub fn thread<F, R>(target: F) -> Result<TaskHandle, TaskError>
where
    F: FnOnce() -> R + Send + 'static,
    R: 'static,
{
    spawn(next_task_name(), move || {
        let _ = target();
    })
}

/// Run `target(args)` on a new detached thread and return immediately.
///
/// Use a tuple to pass several arguments.
pub fn thread_with<F, A, R>(target: F, args: A) -> Result<TaskHandle, TaskError>
where
    F: FnOnce(A) -> R + Send + 'static,
    A: Send + 'static,
    R: 'static,
{
    spawn(next_task_name(), move || {
        let _ = target(args);
    })
}

/// Like [`thread`], with an explicit thread name.
pub fn thread_named<F, R>(name: impl Into<String>, target: F) -> Result<TaskHandle, TaskError>
where
    F: FnOnce() -> R + Send + 'static,
    R: 'static,
{
    spawn(name.into(), move || {
        let _ = target();
    })
}

/// Wrap `f` so that every call runs it on its own thread.
///
/// The wrapper returns the [`TaskHandle`] in place of `f`'s result, which is
/// discarded.
pub fn run_in_thread<F, A, R>(f: F) -> impl Fn(A) -> Result<TaskHandle, TaskError>
where
    F: Fn(A) -> R + Send + Sync + 'static,
    A: Send + 'static,
    R: 'static,
{
    let f = Arc::new(f);
    move |args: A| {
        let f = Arc::clone(&f);
        thread_with(move |args| f(args), args)
    }
}
