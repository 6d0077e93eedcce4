//! Native Engine - Text Arrays
//!
//! Text-related properties:
//! - labelText: The string a label displays

use std::cell::RefCell;

// =============================================================================
// Arrays
// =============================================================================

thread_local! {
    /// Label text string.
    static LABEL_TEXT: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

// =============================================================================
// Capacity Management
// =============================================================================

/// Ensure arrays have capacity for the given index.
pub fn ensure_capacity(index: usize) {
    LABEL_TEXT.with(|arr| {
        let mut arr = arr.borrow_mut();
        if arr.len() <= index {
            arr.resize_with(index + 1, String::new);
        }
    });
}

/// Clear values at index.
pub fn clear_at_index(index: usize) {
    LABEL_TEXT.with(|arr| {
        if let Some(text) = arr.borrow_mut().get_mut(index) {
            text.clear();
        }
    });
}

/// Reset all arrays.
pub fn reset() {
    LABEL_TEXT.with(|arr| arr.borrow_mut().clear());
}

// =============================================================================
// Label Text
// =============================================================================

/// Get label text at index.
pub fn get_text(index: usize) -> String {
    LABEL_TEXT.with(|arr| arr.borrow().get(index).cloned().unwrap_or_default())
}

/// Set label text at index.
pub fn set_text(index: usize, text: String) {
    ensure_capacity(index);
    LABEL_TEXT.with(|arr| arr.borrow_mut()[index] = text);
}
