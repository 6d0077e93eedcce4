//! Utilities that live outside the widget tree.

pub mod thread;

pub use thread::{run_in_thread, thread, thread_named, thread_with, TaskHandle};
