//! Layout - Size allocation for widget trees using Taffy.
//!
//! The bridge:
//!
//! 1. Converts box and child properties → Taffy styles
//!    (orientation → flex direction, spacing → gap, homogeneous / expand → grow)
//! 2. Builds the Taffy tree from the native child lists, in display order
//! 3. Measures labels for intrinsic sizing
//! 4. Extracts computed rectangles, relative to the layout root
//!
//! # Example
//!
//! ```ignore
//! use spark_widgets::layout::compute_layout;
//!
//! let layout = compute_layout(root.widget(), 80, 24)?;
//! let rect = layout.get(label.widget());
//! ```

mod types;
mod text_measure;
mod taffy_bridge;

pub use types::*;
pub use text_measure::*;
pub use taffy_bridge::{compute_layout, LayoutError};
