//! Core types for spark-widgets.
//!
//! These types define the foundation the engine and the widgets share:
//! what kind of widget lives at an index, what it can do, and which way a
//! container lays out its children.

// =============================================================================
// Orientation
// =============================================================================

/// Axis along which a container arranges its children.
///
/// The native box exposes exactly these two states. `LayoutBox::vertical`
/// is a boolean view over this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Horizontal = 0,
    Vertical = 1,
}

impl Orientation {
    /// Check if this is the vertical orientation.
    pub const fn is_vertical(&self) -> bool {
        matches!(self, Self::Vertical)
    }

    /// Orientation for a `vertical` flag.
    pub const fn from_vertical(vertical: bool) -> Self {
        if vertical { Self::Vertical } else { Self::Horizontal }
    }
}

impl From<u8> for Orientation {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Vertical,
            _ => Self::Horizontal,
        }
    }
}

// =============================================================================
// Capabilities (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// What a widget kind supports.
    ///
    /// Combine with bitwise OR: `Capabilities::VISUAL | Capabilities::CHILD_HOLDER`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u8 {
        const NONE = 0;
        /// Takes part in layout and has visibility/expand/css state.
        const VISUAL = 1 << 0;
        /// Holds an ordered list of native children.
        const CHILD_HOLDER = 1 << 1;
        /// Displays a text string.
        const TEXT = 1 << 2;
    }
}

// =============================================================================
// Widget Kinds - For parallel arrays
// =============================================================================

/// Widget kinds for the parallel arrays pattern.
///
/// Each widget at index i has kind[i] set to one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum WidgetKind {
    #[default]
    None = 0,
    Box = 1,
    Label = 2,
}

impl WidgetKind {
    /// Capability set of this kind.
    pub const fn capabilities(&self) -> Capabilities {
        match self {
            Self::None => Capabilities::NONE,
            Self::Box => Capabilities::VISUAL.union(Capabilities::CHILD_HOLDER),
            Self::Label => Capabilities::VISUAL.union(Capabilities::TEXT),
        }
    }

    /// Check if widgets of this kind can hold children.
    pub const fn is_container(&self) -> bool {
        self.capabilities().contains(Capabilities::CHILD_HOLDER)
    }
}
