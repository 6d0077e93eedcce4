//! LayoutBox - Ordered child holder over a native box.
//!
//! Keeps an explicit list of children in lockstep with the native box's own
//! child list. Every mutation goes through the shim and is written through
//! to the native container, so [`LayoutBox::children`] can hand out a plain
//! slice instead of querying the engine.
//!
//! # Example
//!
//! ```ignore
//! use spark_widgets::widgets::{BoxProps, Label, LayoutBox};
//!
//! let mut row = LayoutBox::new(BoxProps {
//!     children: vec![Some(Label::with_text("a").widget()), None, Some(Label::with_text("b").widget())],
//!     vertical: true,
//!     spacing: 1,
//!     ..Default::default()
//! })?;
//!
//! row.prepend(&Label::with_text("first"))?;
//! assert!(row.vertical());
//! ```

use crate::engine::{self, container};
use crate::error::WidgetError;
use crate::types::{Orientation, WidgetKind};

use super::{AsWidget, BaseProps, IntoChild, Widget};

/// Callback run once at the end of construction.
pub type SetupFn = Box<dyn FnOnce(&mut LayoutBox)>;

// =============================================================================
// Box Props
// =============================================================================

/// Properties for [`LayoutBox`].
///
/// All fields are optional in spirit: `..Default::default()` gives an empty,
/// horizontal, non-homogeneous box with no spacing.
#[derive(Default)]
pub struct BoxProps {
    /// Initial children. `None` entries are skipped.
    pub children: Vec<Option<Widget>>,
    /// Arrange children vertically (default: false).
    pub vertical: bool,
    /// Gap between children, in cells.
    pub spacing: u16,
    /// Give every child the same main-axis size.
    pub homogeneous: bool,
    pub base: BaseProps,
    /// Called with the finished box, after every other property is applied.
    pub setup: Option<SetupFn>,
}

// =============================================================================
// LayoutBox
// =============================================================================

/// Layout container with a write-through child list.
#[derive(Debug)]
pub struct LayoutBox {
    widget: Widget,
    children: Vec<Widget>,
}

impl LayoutBox {
    /// Create a box and apply `props` through the regular setters.
    ///
    /// Fails if a child cannot be added to the native box (for instance it
    /// already has another parent). The box is discarded in that case and
    /// children added so far are unparented again.
    pub fn new(props: BoxProps) -> Result<Self, WidgetError> {
        let widget = Widget::allocate(WidgetKind::Box, props.base.name.as_deref());
        let mut layout_box = Self {
            widget,
            children: Vec::new(),
        };

        props.base.apply(widget);
        layout_box.set_vertical(props.vertical);
        layout_box.set_spacing(props.spacing);
        layout_box.set_homogeneous(props.homogeneous);

        if let Err(err) = layout_box.set_children(props.children) {
            layout_box.discard();
            return Err(err);
        }

        if let Some(setup) = props.setup {
            setup(&mut layout_box);
        }

        Ok(layout_box)
    }

    /// Handle of the native box.
    pub fn widget(&self) -> Widget {
        self.widget
    }

    // -------------------------------------------------------------------------
    // Children
    // -------------------------------------------------------------------------

    /// Current children, in display order. Empty once the box is destroyed.
    pub fn children(&self) -> &[Widget] {
        if self.widget.is_alive() { &self.children } else { &[] }
    }

    /// Replace every child.
    ///
    /// Removes all tracked children from the native box, then appends each
    /// present entry of `children` in order. `None` entries are dropped.
    ///
    /// Tracked entries the native box no longer holds (a refused duplicate
    /// append, or a child detached through the engine directly) are dropped
    /// without touching the native box, so the replacement always proceeds.
    ///
    /// Not atomic: an observer of the native box sees it empty, then filling
    /// up. On error the box keeps the children appended before the failure.
    pub fn set_children<I>(&mut self, children: I) -> Result<(), WidgetError>
    where
        I: IntoIterator,
        I::Item: IntoChild,
    {
        let index = self.widget.live_index()?;

        while let Some(&child) = self.children.first() {
            if child.parent() == Some(self.widget) {
                self.remove(&child)?;
            } else {
                tracing::debug!(parent = index, child = child.index(), "dropping entry not held natively");
                self.children.remove(0);
            }
        }

        for child in children.into_iter().filter_map(IntoChild::into_child) {
            self.append(&child)?;
        }

        tracing::trace!(parent = index, count = self.children.len(), "children replaced");
        Ok(())
    }

    /// Add `child` at the end.
    ///
    /// The child is tracked before the native append. Appending a widget
    /// that already has a parent is refused natively with
    /// `AlreadyParented`, but the tracked entry stays.
    pub fn append(&mut self, child: &impl AsWidget) -> Result<(), WidgetError> {
        let index = self.widget.live_index()?;
        let child = child.as_widget();
        let child_index = child.live_index()?;

        self.children.push(child);
        container::append(index, child_index)?;
        tracing::trace!(parent = index, child = child_index, "child appended");
        Ok(())
    }

    /// Remove the first tracked occurrence of `child`.
    ///
    /// Fails with [`WidgetError::ChildNotFound`] and leaves the list unchanged
    /// if `child` is not tracked by this box.
    pub fn remove(&mut self, child: &impl AsWidget) -> Result<(), WidgetError> {
        let index = self.widget.live_index()?;
        let child = child.as_widget();
        let position = self
            .children
            .iter()
            .position(|&c| c == child)
            .ok_or(WidgetError::ChildNotFound(child.index()))?;

        self.children.remove(position);
        container::remove(index, child.live_index()?)?;
        tracing::trace!(parent = index, child = child.index(), "child removed");
        Ok(())
    }

    /// Add `child` at the front.
    pub fn prepend(&mut self, child: &impl AsWidget) -> Result<(), WidgetError> {
        let index = self.widget.live_index()?;
        let child = child.as_widget();
        let child_index = child.live_index()?;

        self.children.insert(0, child);
        container::prepend(index, child_index)?;
        tracing::trace!(parent = index, child = child_index, "child prepended");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Orientation
    // -------------------------------------------------------------------------

    /// Whether children are arranged vertically.
    ///
    /// Reads the native orientation; inside a `spark_signals::effect` this
    /// subscribes the effect to orientation changes.
    pub fn vertical(&self) -> bool {
        self.orientation().is_vertical()
    }

    pub fn set_vertical(&self, vertical: bool) {
        self.set_orientation(Orientation::from_vertical(vertical));
    }

    /// Native orientation.
    pub fn orientation(&self) -> Orientation {
        match self.widget.live_index() {
            Ok(index) => container::orientation(index),
            Err(_) => Orientation::default(),
        }
    }

    pub fn set_orientation(&self, orientation: Orientation) {
        if let Ok(index) = self.widget.live_index() {
            container::set_orientation(index, orientation);
        }
    }

    // -------------------------------------------------------------------------
    // Spacing / Homogeneous
    // -------------------------------------------------------------------------

    pub fn spacing(&self) -> u16 {
        self.widget.live_index().map_or(0, container::spacing)
    }

    pub fn set_spacing(&self, spacing: u16) {
        if let Ok(index) = self.widget.live_index() {
            container::set_spacing(index, spacing);
        }
    }

    pub fn homogeneous(&self) -> bool {
        self.widget.live_index().is_ok_and(container::homogeneous)
    }

    pub fn set_homogeneous(&self, homogeneous: bool) {
        if let Ok(index) = self.widget.live_index() {
            container::set_homogeneous(index, homogeneous);
        }
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Destroy the native box and every child it holds.
    ///
    /// Refused while the box itself sits in another container.
    pub fn destroy(&mut self) -> Result<(), WidgetError> {
        self.widget.destroy()?;
        self.children.clear();
        Ok(())
    }

    /// Unparent tracked children, then release the box alone.
    fn discard(&mut self) {
        if let Ok(index) = self.widget.live_index() {
            for child in self.children.drain(..) {
                if child.is_alive() && child.parent() == Some(self.widget) {
                    let _ = container::remove(index, child.index());
                }
            }
            engine::release_index(index);
        }
    }
}

impl AsWidget for LayoutBox {
    fn as_widget(&self) -> Widget {
        self.widget
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::reset_registry;
    use crate::error::NativeError;
    use crate::widgets::Label;

    fn setup() {
        reset_registry();
    }

    fn native_children(b: &LayoutBox) -> Vec<usize> {
        container::children(b.widget().index())
    }

    fn tracked(b: &LayoutBox) -> Vec<usize> {
        b.children().iter().map(Widget::index).collect()
    }

    #[test]
    fn test_box_defaults() {
        setup();

        let b = LayoutBox::new(BoxProps::default()).unwrap();
        assert!(b.children().is_empty());
        assert!(!b.vertical());
        assert_eq!(b.orientation(), Orientation::Horizontal);
        assert_eq!(b.spacing(), 0);
        assert!(!b.homogeneous());
        assert!(b.widget().visible());
    }

    #[test]
    fn test_append_prepend_remove_stay_in_sync() {
        setup();

        let mut b = LayoutBox::new(BoxProps::default()).unwrap();
        let a = Label::with_text("a");
        let c = Label::with_text("c");
        let first = Label::with_text("first");

        b.append(&a).unwrap();
        b.append(&c).unwrap();
        b.prepend(&first).unwrap();
        assert_eq!(tracked(&b), native_children(&b));
        assert_eq!(b.children(), &[first.widget(), a.widget(), c.widget()]);

        b.remove(&a).unwrap();
        assert_eq!(tracked(&b), native_children(&b));
        assert_eq!(b.children(), &[first.widget(), c.widget()]);
    }

    #[test]
    fn test_remove_untracked_fails() {
        setup();

        let mut b = LayoutBox::new(BoxProps::default()).unwrap();
        let a = Label::with_text("a");
        let stranger = Label::with_text("x");
        b.append(&a).unwrap();

        let err = b.remove(&stranger).unwrap_err();
        assert_eq!(err, WidgetError::ChildNotFound(stranger.widget().index()));
        assert_eq!(b.children(), &[a.widget()]);
    }

    #[test]
    fn test_double_append_keeps_tracked_duplicate() {
        setup();

        let mut b = LayoutBox::new(BoxProps::default()).unwrap();
        let a = Label::with_text("a");
        b.append(&a).unwrap();

        let err = b.append(&a).unwrap_err();
        assert_eq!(
            err,
            WidgetError::Native(NativeError::AlreadyParented {
                child: a.widget().index(),
                parent: b.widget().index(),
            })
        );
        assert_eq!(b.children(), &[a.widget(), a.widget()]);
        assert_eq!(native_children(&b), vec![a.widget().index()]);
    }

    #[test]
    fn test_set_children_skips_none() {
        setup();

        let a = Label::with_text("a");
        let b_label = Label::with_text("b");
        let mut b = LayoutBox::new(BoxProps::default()).unwrap();

        b.set_children([Some(a.widget()), None, Some(b_label.widget())]).unwrap();
        assert_eq!(b.children(), &[a.widget(), b_label.widget()]);
        assert_eq!(tracked(&b), native_children(&b));

        b.set_children(Vec::<Widget>::new()).unwrap();
        assert!(b.children().is_empty());
        assert_eq!(container::child_count(b.widget().index()), 0);
        // Old children are unparented, not destroyed
        assert!(a.widget().is_alive());
        assert!(a.widget().parent().is_none());
    }

    #[test]
    fn test_set_children_drops_entry_detached_natively() {
        setup();

        let a = Label::with_text("a");
        let keep = Label::with_text("keep");
        let mut b = LayoutBox::new(BoxProps {
            children: vec![Some(a.widget()), Some(keep.widget())],
            ..Default::default()
        })
        .unwrap();

        container::remove(b.widget().index(), a.widget().index()).unwrap();
        a.widget().destroy().unwrap();

        b.set_children([&keep]).unwrap();
        assert_eq!(b.children(), &[keep.widget()]);
        assert_eq!(tracked(&b), native_children(&b));
    }

    #[test]
    fn test_set_children_after_duplicate_append() {
        setup();

        let a = Label::with_text("a");
        let next = Label::with_text("next");
        let mut b = LayoutBox::new(BoxProps::default()).unwrap();
        b.append(&a).unwrap();
        assert!(b.append(&a).is_err());

        b.set_children([&next]).unwrap();

        assert_eq!(b.children(), &[next.widget()]);
        assert_eq!(tracked(&b), native_children(&b));
        assert!(a.widget().parent().is_none());
    }

    #[test]
    fn test_tracked_child_cannot_be_destroyed() {
        setup();

        let a = Label::with_text("a");
        let keep = Label::with_text("keep");
        let mut b = LayoutBox::new(BoxProps {
            children: vec![Some(a.widget()), Some(keep.widget())],
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            a.widget().destroy(),
            Err(NativeError::StillParented {
                child: a.widget().index(),
                parent: b.widget().index(),
            })
        );
        assert_eq!(tracked(&b), native_children(&b));

        b.remove(&a).unwrap();
        a.widget().destroy().unwrap();
        assert_eq!(b.children(), &[keep.widget()]);
        assert_eq!(tracked(&b), native_children(&b));
    }

    #[test]
    fn test_construct_with_children_and_vertical() {
        setup();

        let a = Label::with_text("a");
        let b_label = Label::with_text("b");
        let b = LayoutBox::new(BoxProps {
            children: vec![Some(a.widget()), Some(b_label.widget())],
            vertical: true,
            ..Default::default()
        })
        .unwrap();

        assert!(b.vertical());
        assert_eq!(b.children(), &[a.widget(), b_label.widget()]);
        assert_eq!(container::orientation(b.widget().index()), Orientation::Vertical);
    }

    #[test]
    fn test_construct_failure_unparents_children() {
        setup();

        let a = Label::with_text("a");
        let taken = Label::with_text("taken");
        let mut other = LayoutBox::new(BoxProps::default()).unwrap();
        other.append(&taken).unwrap();

        let result = LayoutBox::new(BoxProps {
            children: vec![Some(a.widget()), Some(taken.widget())],
            ..Default::default()
        });

        assert!(matches!(
            result,
            Err(WidgetError::Native(NativeError::AlreadyParented { .. }))
        ));
        assert!(a.widget().is_alive());
        assert!(a.widget().parent().is_none());
        assert_eq!(taken.widget().parent(), Some(other.widget()));
    }

    #[test]
    fn test_setup_runs_last() {
        setup();

        let a = Label::with_text("a");
        let b = LayoutBox::new(BoxProps {
            children: vec![Some(a.widget())],
            setup: Some(Box::new(|b: &mut LayoutBox| {
                // Props are already applied when setup runs
                assert_eq!(b.children().len(), 1);
                b.set_vertical(true);
            })),
            ..Default::default()
        })
        .unwrap();

        assert!(b.vertical());
    }

    #[test]
    fn test_vertical_round_trip() {
        setup();

        let b = LayoutBox::new(BoxProps::default()).unwrap();
        b.set_vertical(true);
        assert!(b.vertical());
        b.set_vertical(false);
        assert!(!b.vertical());
    }

    #[test]
    fn test_destroy_releases_children() {
        setup();

        let a = Label::with_text("a");
        let mut b = LayoutBox::new(BoxProps {
            children: vec![Some(a.widget())],
            ..Default::default()
        })
        .unwrap();
        let handle = b.widget();

        b.destroy().unwrap();
        assert!(!handle.is_alive());
        assert!(!a.widget().is_alive());
        assert!(b.children().is_empty());
    }

    #[test]
    fn test_nested_box_destroyed_with_ancestor() {
        setup();

        let leaf = Label::with_text("leaf");
        let inner = LayoutBox::new(BoxProps {
            children: vec![Some(leaf.widget())],
            ..Default::default()
        })
        .unwrap();
        let mut outer = LayoutBox::new(BoxProps {
            children: vec![Some(inner.widget())],
            ..Default::default()
        })
        .unwrap();

        outer.destroy().unwrap();
        assert!(!inner.widget().is_alive());
        assert!(inner.children().is_empty());
        assert_eq!(inner.children(), inner.widget().children().as_slice());
    }

    #[test]
    fn test_destroy_refused_inside_other_box() {
        setup();

        let mut inner = LayoutBox::new(BoxProps::default()).unwrap();
        let outer = LayoutBox::new(BoxProps {
            children: vec![Some(inner.widget())],
            ..Default::default()
        })
        .unwrap();

        assert!(matches!(
            inner.destroy(),
            Err(WidgetError::Native(NativeError::StillParented { .. }))
        ));
        assert!(inner.widget().is_alive());
        assert_eq!(outer.children(), outer.widget().children().as_slice());
    }

    #[test]
    fn test_operations_on_destroyed_box() {
        setup();

        let mut b = LayoutBox::new(BoxProps::default()).unwrap();
        let index = b.widget().index();
        b.widget().destroy().unwrap();

        let a = Label::with_text("a");
        assert_eq!(
            b.append(&a).unwrap_err(),
            WidgetError::Native(NativeError::Destroyed(index))
        );
        assert!(!b.vertical());
    }
}
