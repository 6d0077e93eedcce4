//! Taffy Bridge - Integration with Taffy layout engine
//!
//! Converts native box properties to Taffy styles, runs layout computation,
//! and extracts results back to a [`ComputedLayout`].

use taffy::{
    AlignItems as TaffyAlignItems, AvailableSpace, Dimension as TaffyDimension, Display,
    FlexDirection as TaffyFlexDirection, LengthPercentage, NodeId, Size, Style, TaffyTree,
};

use std::collections::HashMap;

use crate::engine::arrays::{container, core, text};
use crate::types::{Orientation, WidgetKind};
use crate::widgets::Widget;

use super::text_measure::measure_text;
use super::types::{Allocation, ComputedLayout};

/// Failures of a layout pass.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("layout root {0} has been destroyed")]
    Destroyed(usize),
    #[error("layout engine error: {0}")]
    Taffy(#[from] taffy::TaffyError),
}

// =============================================================================
// ENUM CONVERSIONS
// =============================================================================

fn to_taffy_flex_direction(orientation: Orientation) -> TaffyFlexDirection {
    match orientation {
        Orientation::Horizontal => TaffyFlexDirection::Row,
        Orientation::Vertical => TaffyFlexDirection::Column,
    }
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

/// How the parent box treats its items.
#[derive(Clone, Copy)]
struct ParentAxis {
    orientation: Orientation,
    homogeneous: bool,
}

/// Build a Taffy Style for the widget at `idx`.
fn build_style(idx: usize, parent: Option<ParentAxis>) -> Style {
    let mut style = Style {
        display: Display::Flex,
        ..Default::default()
    };

    if core::get_kind(idx) == WidgetKind::Box {
        let orientation = container::get_orientation(idx);
        let spacing = container::get_spacing(idx) as f32;
        style.flex_direction = to_taffy_flex_direction(orientation);
        style.align_items = Some(TaffyAlignItems::Stretch);
        style.gap = Size {
            width: LengthPercentage::Length(spacing),
            height: LengthPercentage::Length(spacing),
        };
    }

    // Flex item properties come from the parent's main axis
    if let Some(axis) = parent {
        let expand = match axis.orientation {
            Orientation::Horizontal => core::get_hexpand(idx),
            Orientation::Vertical => core::get_vexpand(idx),
        };
        if axis.homogeneous {
            style.flex_grow = 1.0;
            style.flex_basis = TaffyDimension::Length(0.0);
        } else if expand {
            style.flex_grow = 1.0;
        }
    }

    style
}

// =============================================================================
// TEXT MEASUREMENT
// =============================================================================

/// Measure function for label text.
fn measure_label(idx: usize, known_dimensions: Size<Option<f32>>) -> Size<f32> {
    let (width, height) = measure_text(&text::get_text(idx));
    Size {
        width: known_dimensions.width.unwrap_or(width as f32),
        height: known_dimensions.height.unwrap_or(height as f32),
    }
}

// =============================================================================
// TREE BUILDING
// =============================================================================

/// Add the widget at `idx` (and its visible subtree) to `tree`.
///
/// Returns None for hidden widgets, which get no allocation.
fn build_node(
    tree: &mut TaffyTree<usize>,
    idx: usize,
    parent: Option<ParentAxis>,
    nodes: &mut HashMap<NodeId, usize>,
) -> Result<Option<NodeId>, LayoutError> {
    if !core::get_visible(idx) {
        return Ok(None);
    }

    let style = build_style(idx, parent);
    let node = match core::get_kind(idx) {
        WidgetKind::Box => {
            let axis = ParentAxis {
                orientation: container::get_orientation(idx),
                homogeneous: container::get_homogeneous(idx),
            };
            let mut children = Vec::new();
            for child in container::get_children(idx) {
                if let Some(child_node) = build_node(tree, child, Some(axis), nodes)? {
                    children.push(child_node);
                }
            }
            tree.new_with_children(style, &children)?
        }
        WidgetKind::Label => tree.new_leaf_with_context(style, idx)?,
        WidgetKind::None => return Ok(None),
    };

    nodes.insert(node, idx);
    Ok(Some(node))
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Compute allocations for `root` and its visible subtree.
///
/// The root is given exactly `width` x `height` cells. Children are laid
/// out in native order along each box's orientation.
pub fn compute_layout(root: Widget, width: u16, height: u16) -> Result<ComputedLayout, LayoutError> {
    let root_idx = root.live_index().map_err(|_| LayoutError::Destroyed(root.index()))?;
    let mut result = ComputedLayout::new();

    let mut tree: TaffyTree<usize> = TaffyTree::new();
    let mut nodes: HashMap<NodeId, usize> = HashMap::new();

    let Some(root_node) = build_node(&mut tree, root_idx, None, &mut nodes)? else {
        return Ok(result);
    };

    // The root fills the whole area
    let mut root_style = tree.style(root_node)?.clone();
    root_style.size = Size {
        width: TaffyDimension::Length(width as f32),
        height: TaffyDimension::Length(height as f32),
    };
    tree.set_style(root_node, root_style)?;

    let available = Size {
        width: AvailableSpace::Definite(width as f32),
        height: AvailableSpace::Definite(height as f32),
    };

    let mut measure_fn = |known_dimensions: Size<Option<f32>>,
                          _available_space: Size<AvailableSpace>,
                          _node_id: NodeId,
                          context: Option<&mut usize>,
                          _style: &Style| {
        if let Some(&mut idx) = context {
            measure_label(idx, known_dimensions)
        } else {
            Size::ZERO
        }
    };

    tree.compute_layout_with_measure(root_node, available, &mut measure_fn)?;

    // Extract results: Taffy locations are parent-relative, accumulate offsets
    let mut stack = vec![(root_node, 0.0f32, 0.0f32)];
    while let Some((node, offset_x, offset_y)) = stack.pop() {
        let layout = tree.layout(node)?;
        let x = offset_x + layout.location.x;
        let y = offset_y + layout.location.y;

        if let Some(&idx) = nodes.get(&node) {
            result.insert(
                Widget::from_index(idx),
                Allocation::new(
                    x.round() as u16,
                    y.round() as u16,
                    layout.size.width.round() as u16,
                    layout.size.height.round() as u16,
                ),
            );
        }

        for child in tree.children(node)? {
            stack.push((child, x, y));
        }
    }

    tracing::trace!(root = root_idx, allocated = result.len(), "layout computed");
    Ok(result)
}
