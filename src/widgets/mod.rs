//! Widgets - Typed handles over the native engine.
//!
//! - [`Widget`] - Opaque handle shared by every widget kind
//! - [`Label`] - Text display leaf
//! - [`LayoutBox`] - Ordered child holder mirroring its native box
//!
//! # Threading
//!
//! Handles are `!Send`: a widget can only be touched from the UI thread
//! that created it. Closures handed to [`crate::utils::thread`] cannot
//! capture widgets.

mod label;
mod layout_box;

pub use label::{Label, LabelProps};
pub use layout_box::{BoxProps, LayoutBox, SetupFn};

use std::marker::PhantomData;

use crate::engine::{self, arrays::core};
use crate::error::NativeError;
use crate::types::{Capabilities, WidgetKind};

// =============================================================================
// Widget Handle
// =============================================================================

/// Opaque reference to a native widget.
///
/// Copyable and comparable. Two handles are equal when they name the same
/// widget instance; a handle outlives its widget but then reports
/// [`is_alive`](Widget::is_alive) false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Widget {
    index: usize,
    generation: u32,
    _ui_thread: PhantomData<*const ()>,
}

impl Widget {
    /// Allocate a native widget of `kind`.
    pub(crate) fn allocate(kind: WidgetKind, name: Option<&str>) -> Self {
        let index = engine::allocate_index(name);
        core::set_kind(index, kind);
        let widget = Self::from_index(index);
        tracing::debug!(index, ?kind, name = ?engine::get_name(index), "widget created");
        widget
    }

    /// Handle for the widget currently living at `index`.
    pub(crate) fn from_index(index: usize) -> Self {
        Self {
            index,
            generation: engine::get_generation(index),
            _ui_thread: PhantomData,
        }
    }

    /// Look up a live widget by name.
    pub fn find(name: &str) -> Option<Self> {
        engine::get_index(name).map(Self::from_index)
    }

    /// Engine index of this widget.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Is the widget still alive (not destroyed).
    pub fn is_alive(&self) -> bool {
        engine::is_live(self.index, self.generation)
    }

    /// Fail with `Destroyed` if this handle is stale.
    pub(crate) fn live_index(&self) -> Result<usize, NativeError> {
        if self.is_alive() {
            Ok(self.index)
        } else {
            Err(NativeError::Destroyed(self.index))
        }
    }

    /// Widget kind, `WidgetKind::None` once destroyed.
    pub fn kind(&self) -> WidgetKind {
        if self.is_alive() { core::get_kind(self.index) } else { WidgetKind::None }
    }

    /// Capability set of this widget.
    pub fn capabilities(&self) -> Capabilities {
        self.kind().capabilities()
    }

    /// Widget name (generated when none was given).
    pub fn name(&self) -> Option<String> {
        if self.is_alive() { engine::get_name(self.index) } else { None }
    }

    /// Native parent, if any.
    pub fn parent(&self) -> Option<Widget> {
        if !self.is_alive() {
            return None;
        }
        core::get_parent(self.index).map(Self::from_index)
    }

    /// Native children, in display order. Empty for non-containers.
    pub fn children(&self) -> Vec<Widget> {
        if !self.is_alive() {
            return Vec::new();
        }
        engine::container::children(self.index)
            .into_iter()
            .map(Self::from_index)
            .collect()
    }

    // -------------------------------------------------------------------------
    // Base properties
    // -------------------------------------------------------------------------

    /// False once destroyed.
    pub fn visible(&self) -> bool {
        self.is_alive() && core::get_visible(self.index)
    }

    pub fn set_visible(&self, visible: bool) {
        if self.is_alive() {
            core::set_visible(self.index, visible);
        }
    }

    pub fn hexpand(&self) -> bool {
        self.is_alive() && core::get_hexpand(self.index)
    }

    pub fn set_hexpand(&self, expand: bool) {
        if self.is_alive() {
            core::set_hexpand(self.index, expand);
        }
    }

    pub fn vexpand(&self) -> bool {
        self.is_alive() && core::get_vexpand(self.index)
    }

    pub fn set_vexpand(&self, expand: bool) {
        if self.is_alive() {
            core::set_vexpand(self.index, expand);
        }
    }

    pub fn css_classes(&self) -> Vec<String> {
        if self.is_alive() { core::get_css_classes(self.index) } else { Vec::new() }
    }

    pub fn add_css_class(&self, class: &str) {
        if self.is_alive() {
            core::add_css_class(self.index, class);
        }
    }

    /// Returns true if the class was present.
    pub fn remove_css_class(&self, class: &str) -> bool {
        self.is_alive() && core::remove_css_class(self.index, class)
    }

    pub fn has_css_class(&self, class: &str) -> bool {
        self.css_classes().iter().any(|c| c == class)
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Run `callback` when this widget is destroyed.
    pub fn on_destroy(&self, callback: impl FnOnce() + 'static) {
        if self.is_alive() {
            engine::on_destroy(self.index, callback);
        }
    }

    /// Destroy the widget and, recursively, its native children.
    ///
    /// Refused with [`NativeError::StillParented`] while the widget has a
    /// native parent: remove it from its container first. Destroying a
    /// stale handle does nothing.
    pub fn destroy(self) -> Result<(), NativeError> {
        if !self.is_alive() {
            return Ok(());
        }
        if let Some(parent) = core::get_parent(self.index) {
            let err = NativeError::StillParented { child: self.index, parent };
            tracing::warn!(error = %err, "destroy refused");
            return Err(err);
        }
        tracing::debug!(index = self.index, "widget destroyed");
        engine::release_index(self.index);
        Ok(())
    }
}

// =============================================================================
// Capability traits
// =============================================================================

/// Anything backed by a native widget ("visual widget" capability).
pub trait AsWidget {
    fn as_widget(&self) -> Widget;
}

impl AsWidget for Widget {
    fn as_widget(&self) -> Widget {
        *self
    }
}

/// An entry of a child list: a widget, or nothing.
///
/// `None` entries are skipped by [`LayoutBox::set_children`], so lists can
/// contain conditionally omitted widgets.
pub trait IntoChild {
    fn into_child(self) -> Option<Widget>;
}

impl IntoChild for Widget {
    fn into_child(self) -> Option<Widget> {
        Some(self)
    }
}

impl<T: AsWidget> IntoChild for &T {
    fn into_child(self) -> Option<Widget> {
        Some(self.as_widget())
    }
}

impl<T: IntoChild> IntoChild for Option<T> {
    fn into_child(self) -> Option<Widget> {
        self.and_then(IntoChild::into_child)
    }
}

// =============================================================================
// Base Props
// =============================================================================

/// Properties every widget accepts at construction.
#[derive(Debug, Clone)]
pub struct BaseProps {
    /// Optional widget name for lookup via [`Widget::find`].
    pub name: Option<String>,
    /// Whether the widget is visible (default: true).
    pub visible: bool,
    /// Grow inside a horizontal parent (default: false).
    pub hexpand: bool,
    /// Grow inside a vertical parent (default: false).
    pub vexpand: bool,
    /// CSS classes to add.
    pub css_classes: Vec<String>,
}

impl Default for BaseProps {
    fn default() -> Self {
        Self {
            name: None,
            visible: true,
            hexpand: false,
            vexpand: false,
            css_classes: Vec::new(),
        }
    }
}

impl BaseProps {
    /// Apply everything except `name` (consumed at allocation) to `widget`.
    pub(crate) fn apply(&self, widget: Widget) {
        widget.set_visible(self.visible);
        widget.set_hexpand(self.hexpand);
        widget.set_vexpand(self.vexpand);
        for class in &self.css_classes {
            widget.add_css_class(class);
        }
    }
}
