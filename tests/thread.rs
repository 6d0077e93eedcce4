//! Integration tests for the background task launcher.
//!
//! Run with: cargo test --test thread

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Barrier, Mutex, OnceLock};
use std::thread;
use std::time::Duration;

use spark_widgets::{run_in_thread, thread_with};

const TIMEOUT: Duration = Duration::from_secs(5);

// =============================================================================
// LOG CAPTURE
// =============================================================================

/// Shared buffer the global subscriber writes into.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

/// Install a process-wide subscriber once; task threads log through it.
fn captured_logs() -> &'static LogBuffer {
    static LOGS: OnceLock<LogBuffer> = OnceLock::new();
    LOGS.get_or_init(|| {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::ERROR)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::set_global_default(subscriber).unwrap();
        logs
    })
}

#[test]
fn test_launch_returns_before_target_completes() {
    let gate = Arc::new(Barrier::new(2));
    let (tx, rx) = mpsc::channel();

    let gate_task = gate.clone();
    let handle = thread_with(
        move |(a, b): (i32, i32)| {
            // Blocks until the caller has its handle back
            gate_task.wait();
            tx.send((a + b, thread::current().id())).unwrap();
        },
        (1, 2),
    )
    .unwrap();

    assert!(!handle.is_finished());
    gate.wait();

    let (sum, task_thread) = rx.recv_timeout(TIMEOUT).unwrap();
    assert_eq!(sum, 3);
    assert_ne!(task_thread, thread::current().id());
    assert_eq!(task_thread, handle.id());
}

#[test]
fn test_decorator_launches_every_call() {
    let (tx, rx) = mpsc::channel();
    let tx = std::sync::Mutex::new(tx);

    let record = run_in_thread(move |n: u32| {
        tx.lock().unwrap().send((n, thread::current().id())).unwrap();
        n * 2
    });

    let first = record(1).unwrap();
    let second = record(2).unwrap();
    assert_ne!(first.id(), second.id());

    let mut seen: Vec<u32> = (0..2).map(|_| rx.recv_timeout(TIMEOUT).unwrap().0).collect();
    seen.sort();
    assert_eq!(seen, vec![1, 2]);
}

#[test]
fn test_task_panic_does_not_reach_caller() {
    let logs = captured_logs();
    let ran_after = Arc::new(AtomicUsize::new(0));

    let handle = thread_with(|msg: &'static str| panic!("{msg}"), "task failure").unwrap();
    let task_name = handle.name().unwrap().to_string();
    handle.join();

    // Reported on the task thread through tracing
    let output = logs.contents();
    let line = output
        .lines()
        .find(|line| line.contains("task panicked") && line.contains(&task_name))
        .unwrap_or_else(|| panic!("no panic report for {task_name} in:\n{output}"));
    assert!(line.contains("ERROR"));
    assert!(line.contains("task failure"));

    // The launcher keeps working after a task panicked
    let counter = ran_after.clone();
    thread_with(move |n| counter.fetch_add(n, Ordering::SeqCst), 5)
        .unwrap()
        .join();
    assert_eq!(ran_after.load(Ordering::SeqCst), 5);
}

#[test]
fn test_dropping_handle_detaches() {
    let (tx, rx) = mpsc::channel();

    drop(thread_with(move |v: u8| tx.send(v).unwrap(), 9).unwrap());

    assert_eq!(rx.recv_timeout(TIMEOUT).unwrap(), 9);
}
