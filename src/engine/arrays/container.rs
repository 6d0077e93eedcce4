//! Native Engine - Container Arrays
//!
//! Properties of widgets that hold children:
//! - children: Native child list, in display order
//! - orientation: Main axis (reactive)
//! - spacing: Gap between children, in cells
//! - homogeneous: Give every child the same main-axis size
//!
//! Orientation is a `Signal` per index, so reading it inside an `effect`
//! subscribes the effect to changes of that one container.

use std::cell::RefCell;

use spark_signals::{signal, Signal};

use crate::types::Orientation;

// =============================================================================
// Arrays
// =============================================================================

thread_local! {
    /// Native child list per container.
    static CHILDREN: RefCell<Vec<Vec<usize>>> = const { RefCell::new(Vec::new()) };

    /// Orientation per container.
    static ORIENTATION: RefCell<Vec<Signal<Orientation>>> = const { RefCell::new(Vec::new()) };

    /// Spacing between children.
    static SPACING: RefCell<Vec<u16>> = const { RefCell::new(Vec::new()) };

    /// Homogeneous sizing flag.
    static HOMOGENEOUS: RefCell<Vec<bool>> = const { RefCell::new(Vec::new()) };
}

// =============================================================================
// Capacity Management
// =============================================================================

/// Ensure arrays have capacity for the given index.
pub fn ensure_capacity(index: usize) {
    CHILDREN.with(|arr| {
        let mut arr = arr.borrow_mut();
        if arr.len() <= index {
            arr.resize_with(index + 1, Vec::new);
        }
    });
    ORIENTATION.with(|arr| {
        let mut arr = arr.borrow_mut();
        while arr.len() <= index {
            arr.push(signal(Orientation::Horizontal));
        }
    });
    SPACING.with(|arr| {
        let mut arr = arr.borrow_mut();
        if arr.len() <= index {
            arr.resize(index + 1, 0);
        }
    });
    HOMOGENEOUS.with(|arr| {
        let mut arr = arr.borrow_mut();
        if arr.len() <= index {
            arr.resize(index + 1, false);
        }
    });
}

/// Clear values at index (called when releasing).
pub fn clear_at_index(index: usize) {
    CHILDREN.with(|arr| {
        if let Some(children) = arr.borrow_mut().get_mut(index) {
            children.clear();
        }
    });
    // Reset outside the borrow: setting a signal may run effects that read back
    if let Some(sig) = orientation_signal(index) {
        sig.set(Orientation::Horizontal);
    }
    SPACING.with(|arr| {
        if let Some(slot) = arr.borrow_mut().get_mut(index) {
            *slot = 0;
        }
    });
    HOMOGENEOUS.with(|arr| {
        if let Some(slot) = arr.borrow_mut().get_mut(index) {
            *slot = false;
        }
    });
}

/// Reset all arrays.
pub fn reset() {
    CHILDREN.with(|arr| arr.borrow_mut().clear());
    ORIENTATION.with(|arr| arr.borrow_mut().clear());
    SPACING.with(|arr| arr.borrow_mut().clear());
    HOMOGENEOUS.with(|arr| arr.borrow_mut().clear());
}

// =============================================================================
// Children
// =============================================================================

/// Get the native child list at index.
pub fn get_children(index: usize) -> Vec<usize> {
    CHILDREN.with(|arr| arr.borrow().get(index).cloned().unwrap_or_default())
}

/// Number of native children at index.
pub fn child_count(index: usize) -> usize {
    CHILDREN.with(|arr| arr.borrow().get(index).map_or(0, Vec::len))
}

/// Insert a child into the native list at `position` (clamped to the end).
pub fn insert_child(index: usize, position: usize, child: usize) {
    ensure_capacity(index);
    CHILDREN.with(|arr| {
        let mut arr = arr.borrow_mut();
        let children = &mut arr[index];
        let position = position.min(children.len());
        children.insert(position, child);
    });
}

/// Remove a child from the native list. Returns true if it was present.
pub fn remove_child(index: usize, child: usize) -> bool {
    CHILDREN.with(|arr| {
        let mut arr = arr.borrow_mut();
        let Some(children) = arr.get_mut(index) else { return false };
        match children.iter().position(|&c| c == child) {
            Some(pos) => {
                children.remove(pos);
                true
            }
            None => false,
        }
    })
}

// =============================================================================
// Orientation
// =============================================================================

fn orientation_signal(index: usize) -> Option<Signal<Orientation>> {
    ORIENTATION.with(|arr| arr.borrow().get(index).cloned())
}

/// Get orientation at index (reactive - tracks this index).
pub fn get_orientation(index: usize) -> Orientation {
    orientation_signal(index).map_or(Orientation::Horizontal, |sig| sig.get())
}

/// Set orientation at index.
pub fn set_orientation(index: usize, orientation: Orientation) {
    ensure_capacity(index);
    if let Some(sig) = orientation_signal(index) {
        sig.set(orientation);
    }
}

// =============================================================================
// Spacing / Homogeneous
// =============================================================================

/// Get spacing at index.
pub fn get_spacing(index: usize) -> u16 {
    SPACING.with(|arr| arr.borrow().get(index).copied().unwrap_or(0))
}

/// Set spacing at index.
pub fn set_spacing(index: usize, spacing: u16) {
    ensure_capacity(index);
    SPACING.with(|arr| arr.borrow_mut()[index] = spacing);
}

/// Get homogeneous at index.
pub fn get_homogeneous(index: usize) -> bool {
    HOMOGENEOUS.with(|arr| arr.borrow().get(index).copied().unwrap_or(false))
}

/// Set homogeneous at index.
pub fn set_homogeneous(index: usize, homogeneous: bool) {
    ensure_capacity(index);
    HOMOGENEOUS.with(|arr| arr.borrow_mut()[index] = homogeneous);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        reset();
    }

    #[test]
    fn test_insert_and_remove_children() {
        setup();

        insert_child(0, 0, 1);
        insert_child(0, usize::MAX, 2);
        insert_child(0, 0, 3);
        assert_eq!(get_children(0), vec![3, 1, 2]);
        assert_eq!(child_count(0), 3);

        assert!(remove_child(0, 1));
        assert!(!remove_child(0, 1));
        assert_eq!(get_children(0), vec![3, 2]);
    }

    #[test]
    fn test_orientation_round_trip() {
        setup();

        ensure_capacity(0);
        assert_eq!(get_orientation(0), Orientation::Horizontal);

        set_orientation(0, Orientation::Vertical);
        assert_eq!(get_orientation(0), Orientation::Vertical);

        clear_at_index(0);
        assert_eq!(get_orientation(0), Orientation::Horizontal);
    }

    #[test]
    fn test_spacing_and_homogeneous() {
        setup();

        set_spacing(2, 4);
        set_homogeneous(2, true);
        assert_eq!(get_spacing(2), 4);
        assert!(get_homogeneous(2));

        // Unallocated indices read defaults
        assert_eq!(get_spacing(40), 0);
        assert!(!get_homogeneous(40));
    }
}
