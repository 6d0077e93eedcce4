//! Layout types.

use std::collections::HashMap;

use crate::widgets::Widget;

/// Rectangle assigned to a widget, in cells, relative to the layout root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Allocation {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Allocation {
    /// Create a new allocation.
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Check if a point is inside this rect.
    #[inline]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        let (x, y) = (u32::from(x), u32::from(y));
        x >= u32::from(self.x)
            && x < u32::from(self.x) + u32::from(self.width)
            && y >= u32::from(self.y)
            && y < u32::from(self.y) + u32::from(self.height)
    }
}

/// Output of a layout pass: one allocation per visible widget of the tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedLayout {
    allocations: HashMap<Widget, Allocation>,
}

impl ComputedLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, widget: Widget, allocation: Allocation) {
        self.allocations.insert(widget, allocation);
    }

    /// Allocation of `widget`, None if it was hidden or not in the tree.
    ///
    /// Keyed by handle: a widget that reused a laid-out index is not found.
    pub fn get(&self, widget: Widget) -> Option<Allocation> {
        self.allocations.get(&widget).copied()
    }

    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }
}
