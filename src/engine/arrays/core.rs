//! Native Engine - Core Arrays
//!
//! Properties every visual widget has:
//! - kind: What kind of widget (box, label)
//! - parent: Native parent in the hierarchy
//! - visible: Is the widget allocated space
//! - hexpand / vexpand: Grow along the parent's main axis
//! - cssClasses: Style class names
//!
//! Values are stored directly in thread-local vectors owned by the UI thread.

use std::cell::RefCell;

use crate::types::WidgetKind;

// =============================================================================
// Arrays
// =============================================================================

thread_local! {
    /// Widget kind (box, label).
    static KIND: RefCell<Vec<WidgetKind>> = const { RefCell::new(Vec::new()) };

    /// Native parent index (None for toplevel widgets).
    static PARENT: RefCell<Vec<Option<usize>>> = const { RefCell::new(Vec::new()) };

    /// Is widget visible (false = hidden, no allocation).
    static VISIBLE: RefCell<Vec<bool>> = const { RefCell::new(Vec::new()) };

    /// Expand horizontally inside a horizontal parent.
    static HEXPAND: RefCell<Vec<bool>> = const { RefCell::new(Vec::new()) };

    /// Expand vertically inside a vertical parent.
    static VEXPAND: RefCell<Vec<bool>> = const { RefCell::new(Vec::new()) };

    /// CSS class names, in insertion order.
    static CSS_CLASSES: RefCell<Vec<Vec<String>>> = const { RefCell::new(Vec::new()) };
}

fn grow<T: Clone>(arr: &RefCell<Vec<T>>, index: usize, default: T) {
    let mut arr = arr.borrow_mut();
    if arr.len() <= index {
        arr.resize(index + 1, default);
    }
}

// =============================================================================
// Capacity Management
// =============================================================================

/// Ensure arrays have capacity for the given index.
pub fn ensure_capacity(index: usize) {
    KIND.with(|arr| grow(arr, index, WidgetKind::None));
    PARENT.with(|arr| grow(arr, index, None));
    VISIBLE.with(|arr| grow(arr, index, true));
    HEXPAND.with(|arr| grow(arr, index, false));
    VEXPAND.with(|arr| grow(arr, index, false));
    CSS_CLASSES.with(|arr| grow(arr, index, Vec::new()));
}

/// Clear values at index (called when releasing).
pub fn clear_at_index(index: usize) {
    KIND.with(|arr| {
        if let Some(slot) = arr.borrow_mut().get_mut(index) {
            *slot = WidgetKind::None;
        }
    });
    PARENT.with(|arr| {
        if let Some(slot) = arr.borrow_mut().get_mut(index) {
            *slot = None;
        }
    });
    VISIBLE.with(|arr| {
        if let Some(slot) = arr.borrow_mut().get_mut(index) {
            *slot = true;
        }
    });
    HEXPAND.with(|arr| {
        if let Some(slot) = arr.borrow_mut().get_mut(index) {
            *slot = false;
        }
    });
    VEXPAND.with(|arr| {
        if let Some(slot) = arr.borrow_mut().get_mut(index) {
            *slot = false;
        }
    });
    CSS_CLASSES.with(|arr| {
        if let Some(slot) = arr.borrow_mut().get_mut(index) {
            slot.clear();
        }
    });
}

/// Reset all arrays.
pub fn reset() {
    KIND.with(|arr| arr.borrow_mut().clear());
    PARENT.with(|arr| arr.borrow_mut().clear());
    VISIBLE.with(|arr| arr.borrow_mut().clear());
    HEXPAND.with(|arr| arr.borrow_mut().clear());
    VEXPAND.with(|arr| arr.borrow_mut().clear());
    CSS_CLASSES.with(|arr| arr.borrow_mut().clear());
}

// =============================================================================
// Kind
// =============================================================================

/// Get widget kind at index.
pub fn get_kind(index: usize) -> WidgetKind {
    KIND.with(|arr| arr.borrow().get(index).copied().unwrap_or_default())
}

/// Set widget kind at index.
pub fn set_kind(index: usize, kind: WidgetKind) {
    KIND.with(|arr| {
        grow(arr, index, WidgetKind::None);
        arr.borrow_mut()[index] = kind;
    });
}

// =============================================================================
// Parent
// =============================================================================

/// Get native parent at index.
pub fn get_parent(index: usize) -> Option<usize> {
    PARENT.with(|arr| arr.borrow().get(index).copied().flatten())
}

/// Set native parent at index.
pub fn set_parent(index: usize, parent: Option<usize>) {
    PARENT.with(|arr| {
        grow(arr, index, None);
        arr.borrow_mut()[index] = parent;
    });
}

/// Check whether `ancestor` is `index` or one of its native ancestors.
pub fn is_ancestor_or_self(ancestor: usize, index: usize) -> bool {
    let mut current = Some(index);
    while let Some(i) = current {
        if i == ancestor {
            return true;
        }
        current = get_parent(i);
    }
    false
}

// =============================================================================
// Visible
// =============================================================================

/// Get visibility at index.
pub fn get_visible(index: usize) -> bool {
    VISIBLE.with(|arr| arr.borrow().get(index).copied().unwrap_or(true))
}

/// Set visibility at index.
pub fn set_visible(index: usize, visible: bool) {
    VISIBLE.with(|arr| {
        grow(arr, index, true);
        arr.borrow_mut()[index] = visible;
    });
}

// =============================================================================
// Expand
// =============================================================================

/// Get hexpand at index.
pub fn get_hexpand(index: usize) -> bool {
    HEXPAND.with(|arr| arr.borrow().get(index).copied().unwrap_or(false))
}

/// Set hexpand at index.
pub fn set_hexpand(index: usize, expand: bool) {
    HEXPAND.with(|arr| {
        grow(arr, index, false);
        arr.borrow_mut()[index] = expand;
    });
}

/// Get vexpand at index.
pub fn get_vexpand(index: usize) -> bool {
    VEXPAND.with(|arr| arr.borrow().get(index).copied().unwrap_or(false))
}

/// Set vexpand at index.
pub fn set_vexpand(index: usize, expand: bool) {
    VEXPAND.with(|arr| {
        grow(arr, index, false);
        arr.borrow_mut()[index] = expand;
    });
}

// =============================================================================
// CSS Classes
// =============================================================================

/// Get CSS classes at index.
pub fn get_css_classes(index: usize) -> Vec<String> {
    CSS_CLASSES.with(|arr| arr.borrow().get(index).cloned().unwrap_or_default())
}

/// Add a CSS class at index. Adding a class twice keeps a single entry.
pub fn add_css_class(index: usize, class: &str) {
    CSS_CLASSES.with(|arr| {
        grow(arr, index, Vec::new());
        let mut arr = arr.borrow_mut();
        let classes = &mut arr[index];
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    });
}

/// Remove a CSS class at index. Returns true if it was present.
pub fn remove_css_class(index: usize, class: &str) -> bool {
    CSS_CLASSES.with(|arr| {
        let mut arr = arr.borrow_mut();
        let Some(classes) = arr.get_mut(index) else { return false };
        let before = classes.len();
        classes.retain(|c| c != class);
        classes.len() != before
    })
}
