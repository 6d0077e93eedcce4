//! Native Container API - the box widget's own child-list operations.
//!
//! This is the layer a [`LayoutBox`](crate::widgets::LayoutBox) mirrors.
//! Every operation validates its arguments the way a native toolkit does and
//! refuses invalid calls: a refused call is logged at `warn` level and
//! returned as a [`NativeError`], leaving native state untouched.
//!
//! All functions must be called on the UI thread that allocated the widgets.

use crate::error::NativeError;
use crate::types::Orientation;

use super::arrays::{container, core};
use super::registry::is_allocated;

// =============================================================================
// Validation
// =============================================================================

fn check_container(parent: usize) -> Result<(), NativeError> {
    if !is_allocated(parent) {
        return Err(NativeError::Destroyed(parent));
    }
    if !core::get_kind(parent).is_container() {
        return Err(NativeError::NotAContainer(parent));
    }
    Ok(())
}

fn check_insert(parent: usize, child: usize) -> Result<(), NativeError> {
    check_container(parent)?;
    if !is_allocated(child) {
        return Err(NativeError::Destroyed(child));
    }
    if let Some(existing) = core::get_parent(child) {
        return Err(NativeError::AlreadyParented { child, parent: existing });
    }
    if core::is_ancestor_or_self(child, parent) {
        return Err(NativeError::WouldCycle { child, parent });
    }
    Ok(())
}

fn refused<T>(op: &'static str, err: NativeError) -> Result<T, NativeError> {
    tracing::warn!(op, error = %err, "native container refused operation");
    Err(err)
}

// =============================================================================
// Child List
// =============================================================================

/// Append `child` as the last child of `parent`.
pub fn append(parent: usize, child: usize) -> Result<(), NativeError> {
    if let Err(err) = check_insert(parent, child) {
        return refused("append", err);
    }
    container::insert_child(parent, usize::MAX, child);
    core::set_parent(child, Some(parent));
    Ok(())
}

/// Insert `child` as the first child of `parent`.
pub fn prepend(parent: usize, child: usize) -> Result<(), NativeError> {
    if let Err(err) = check_insert(parent, child) {
        return refused("prepend", err);
    }
    container::insert_child(parent, 0, child);
    core::set_parent(child, Some(parent));
    Ok(())
}

/// Remove `child` from `parent`. The child stays alive, unparented.
pub fn remove(parent: usize, child: usize) -> Result<(), NativeError> {
    if let Err(err) = check_container(parent) {
        return refused("remove", err);
    }
    if core::get_parent(child) != Some(parent) || !container::remove_child(parent, child) {
        return refused("remove", NativeError::NotAChild { child, parent });
    }
    core::set_parent(child, None);
    Ok(())
}

/// Children of `parent`, in display order.
pub fn children(parent: usize) -> Vec<usize> {
    container::get_children(parent)
}

/// Number of children of `parent`.
pub fn child_count(parent: usize) -> usize {
    container::child_count(parent)
}

// =============================================================================
// Properties
// =============================================================================

/// Orientation of `index` (reactive).
pub fn orientation(index: usize) -> Orientation {
    container::get_orientation(index)
}

/// Set the orientation of `index`.
pub fn set_orientation(index: usize, orientation: Orientation) {
    container::set_orientation(index, orientation);
}

/// Spacing of `index`, in cells.
pub fn spacing(index: usize) -> u16 {
    container::get_spacing(index)
}

/// Set the spacing of `index`.
pub fn set_spacing(index: usize, spacing: u16) {
    container::set_spacing(index, spacing);
}

/// Homogeneous flag of `index`.
pub fn homogeneous(index: usize) -> bool {
    container::get_homogeneous(index)
}

/// Set the homogeneous flag of `index`.
pub fn set_homogeneous(index: usize, homogeneous: bool) {
    container::set_homogeneous(index, homogeneous);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{allocate_index, release_index, reset_registry};
    use crate::types::WidgetKind;

    fn setup() {
        reset_registry();
    }

    fn new_box() -> usize {
        let index = allocate_index(None);
        core::set_kind(index, WidgetKind::Box);
        index
    }

    fn new_label() -> usize {
        let index = allocate_index(None);
        core::set_kind(index, WidgetKind::Label);
        index
    }

    #[test]
    fn test_append_prepend_order() {
        setup();

        let parent = new_box();
        let a = new_label();
        let b = new_label();
        let c = new_label();

        append(parent, a).unwrap();
        append(parent, b).unwrap();
        prepend(parent, c).unwrap();

        assert_eq!(children(parent), vec![c, a, b]);
        assert_eq!(core::get_parent(a), Some(parent));
    }

    #[test]
    fn test_append_already_parented() {
        setup();

        let parent = new_box();
        let a = new_label();
        append(parent, a).unwrap();

        assert_eq!(
            append(parent, a),
            Err(NativeError::AlreadyParented { child: a, parent })
        );
        assert_eq!(children(parent), vec![a]);
    }

    #[test]
    fn test_remove_non_child() {
        setup();

        let parent = new_box();
        let a = new_label();

        assert_eq!(remove(parent, a), Err(NativeError::NotAChild { child: a, parent }));

        append(parent, a).unwrap();
        remove(parent, a).unwrap();
        assert_eq!(core::get_parent(a), None);
        // Double remove is refused
        assert_eq!(remove(parent, a), Err(NativeError::NotAChild { child: a, parent }));
    }

    #[test]
    fn test_label_is_not_a_container() {
        setup();

        let label = new_label();
        let other = new_label();

        assert_eq!(append(label, other), Err(NativeError::NotAContainer(label)));
    }

    #[test]
    fn test_cycle_refused() {
        setup();

        let outer = new_box();
        let inner = new_box();
        append(outer, inner).unwrap();

        assert_eq!(append(inner, outer), Err(NativeError::WouldCycle { child: outer, parent: inner }));
        assert_eq!(append(outer, outer), Err(NativeError::WouldCycle { child: outer, parent: outer }));
    }

    #[test]
    fn test_destroyed_widgets_refused() {
        setup();

        let parent = new_box();
        let a = new_label();
        release_index(a);

        assert_eq!(append(parent, a), Err(NativeError::Destroyed(a)));
    }

    #[test]
    fn test_orientation() {
        setup();

        let parent = new_box();
        assert_eq!(orientation(parent), Orientation::Horizontal);
        set_orientation(parent, Orientation::Vertical);
        assert_eq!(orientation(parent), Orientation::Vertical);
    }
}
