//! Native Engine - Parallel Arrays
//!
//! All widget state lives in these parallel arrays.
//! Each array index corresponds to one widget.
//!
//! # Array Categories
//!
//! - **core**: Widget kind, parent, visibility, expand, CSS classes
//! - **container**: Child list, orientation, spacing, homogeneous
//! - **text**: Label text

pub mod core;
pub mod container;
pub mod text;

use self::core as core_arrays;
use self::container as container_arrays;
use self::text as text_arrays;

/// Ensure all arrays have capacity for the given index.
///
/// Called by registry when allocating.
pub fn ensure_all_capacity(index: usize) {
    core_arrays::ensure_capacity(index);
    container_arrays::ensure_capacity(index);
    text_arrays::ensure_capacity(index);
}

/// Clear all array values at an index.
///
/// Called by registry when releasing.
pub fn clear_all_at_index(index: usize) {
    core_arrays::clear_at_index(index);
    container_arrays::clear_at_index(index);
    text_arrays::clear_at_index(index);
}

/// Reset all parallel arrays to release memory.
///
/// Called automatically when every widget has been destroyed.
pub fn reset_all_arrays() {
    core_arrays::reset();
    container_arrays::reset();
    text_arrays::reset();
}
