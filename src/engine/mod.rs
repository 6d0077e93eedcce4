//! Native Engine - Widget registry, parallel arrays, container API.
//!
//! The engine is the native toolkit the widget layer sits on:
//! - Registry: Index allocation, names, generations, destroy callbacks
//! - Arrays: Parallel arrays holding every widget property
//! - Container: The native box API (append / prepend / remove / orientation)
//!
//! # Architecture
//!
//! Widgets are NOT objects. They are indices into parallel arrays:
//!
//! ```text
//! Index 0: Box   (parent=None, children=[1, 2], orientation=Vertical, ...)
//! Index 1: Label (parent=0,    text="a",        visible=true,         ...)
//! Index 2: Label (parent=0,    text="b",        visible=true,         ...)
//! ```
//!
//! All state is thread-local: the thread that creates a widget is its UI
//! thread, and widget handles cannot leave it.

mod registry;
pub mod arrays;
pub mod container;

pub use registry::*;
