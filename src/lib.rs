//! # spark-widgets
//!
//! Declarative layout widgets over an in-process native widget engine.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! reactive properties and [taffy](https://github.com/DioxusLabs/taffy) for
//! flexbox layout.
//!
//! ## Architecture
//!
//! The native engine uses parallel arrays: a widget is an index into
//! columnar property arrays, not an object. The widget layer wraps those
//! indices in typed, generation-checked handles:
//!
//! ```text
//! LayoutBox (tracked children) → engine::container (native children) → arrays
//!                                                                        ↓
//!                                              layout::compute_layout → ComputedLayout
//! ```
//!
//! [`LayoutBox`] keeps its own ordered child list in lockstep with the
//! native container, so reading children never touches the engine.
//!
//! ## Modules
//!
//! - [`types`] - Orientation, widget kinds, capabilities
//! - [`engine`] - Registry, parallel arrays, native container API
//! - [`widgets`] - Widget handle, Label, LayoutBox
//! - [`layout`] - Taffy-backed allocation of a widget tree
//! - [`utils`] - Background task launcher
//! - [`error`] - Error types

pub mod engine;
pub mod error;
pub mod layout;
pub mod types;
pub mod utils;
pub mod widgets;

// Re-export commonly used items
pub use types::*;

pub use error::{NativeError, TaskError, WidgetError};

pub use engine::{get_allocated_count, reset_registry};

pub use layout::{compute_layout, Allocation, ComputedLayout, LayoutError};

pub use widgets::{AsWidget, BaseProps, BoxProps, IntoChild, Label, LabelProps, LayoutBox, Widget};

pub use utils::{run_in_thread, thread, thread_named, thread_with, TaskHandle};
