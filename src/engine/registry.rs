//! Widget Registry - Index allocation for parallel arrays.
//!
//! Manages the lifecycle of widget indices:
//! - Name ↔ Index mapping
//! - Free index pool for O(1) reuse
//! - Generation counters so stale handles never alias a reused index
//! - Destroy callbacks
//! - Recursive release of native children

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

use super::arrays;
use super::arrays::{container, core};

// =============================================================================
// Registry State
// =============================================================================

thread_local! {
    /// Map widget name to array index.
    static NAME_TO_INDEX: RefCell<HashMap<String, usize>> = RefCell::new(HashMap::new());

    /// Map array index to widget name.
    static INDEX_TO_NAME: RefCell<HashMap<usize, String>> = RefCell::new(HashMap::new());

    /// Set of currently allocated indices (for iteration).
    static ALLOCATED_INDICES: RefCell<BTreeSet<usize>> = const { RefCell::new(BTreeSet::new()) };

    /// Pool of freed indices for reuse.
    static FREE_INDICES: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };

    /// Next index to allocate if pool is empty.
    static NEXT_INDEX: RefCell<usize> = const { RefCell::new(0) };

    /// Counter for generating unique names.
    static NAME_COUNTER: RefCell<usize> = const { RefCell::new(0) };

    /// Generation per index, bumped on every release.
    static GENERATIONS: RefCell<Vec<u32>> = const { RefCell::new(Vec::new()) };

    /// Destroy callbacks registered per index.
    static DESTROY_CALLBACKS: RefCell<HashMap<usize, Vec<Box<dyn FnOnce()>>>> = RefCell::new(HashMap::new());
}

// =============================================================================
// Index Allocation
// =============================================================================

/// Allocate an index for a new widget.
///
/// # Arguments
/// * `name` - Optional widget name. If not provided, one is generated.
///
/// # Returns
/// The allocated index. Pair it with [`get_generation`] to build a handle.
pub fn allocate_index(name: Option<&str>) -> usize {
    let widget_name = match name {
        Some(name) => name.to_string(),
        None => NAME_COUNTER.with(|counter| {
            let mut counter = counter.borrow_mut();
            let name = format!("w{}", *counter);
            *counter += 1;
            name
        }),
    };

    // Reuse free index or allocate new
    let index = FREE_INDICES.with(|free| {
        let mut free = free.borrow_mut();
        if let Some(index) = free.pop() {
            index
        } else {
            NEXT_INDEX.with(|next| {
                let mut next = next.borrow_mut();
                let index = *next;
                *next += 1;
                index
            })
        }
    });

    // Register mappings
    let previous = NAME_TO_INDEX.with(|map| map.borrow_mut().insert(widget_name.clone(), index));
    if let Some(previous) = previous {
        tracing::warn!(name = %widget_name, previous, index, "widget name reused, lookup now resolves to the newer widget");
    }
    INDEX_TO_NAME.with(|map| {
        map.borrow_mut().insert(index, widget_name);
    });
    ALLOCATED_INDICES.with(|set| {
        set.borrow_mut().insert(index);
    });
    GENERATIONS.with(|gens| {
        let mut gens = gens.borrow_mut();
        if gens.len() <= index {
            gens.resize(index + 1, 0);
        }
    });

    // Ensure arrays have capacity for this index
    arrays::ensure_all_capacity(index);

    index
}

/// Release an index back to the pool.
///
/// Also recursively releases all native children, then detaches the widget
/// from its native parent.
pub fn release_index(index: usize) {
    if !is_allocated(index) {
        return;
    }

    // FIRST: release children (collected up front, release mutates the list)
    for child in container::get_children(index) {
        release_index(child);
    }

    if let Some(parent) = core::get_parent(index) {
        container::remove_child(parent, index);
    }

    // Run destroy callbacks before cleanup
    run_destroy_callbacks(index);

    // Clean up mappings
    let name = INDEX_TO_NAME.with(|map| map.borrow_mut().remove(&index));
    if let Some(name) = name {
        NAME_TO_INDEX.with(|map| {
            let mut map = map.borrow_mut();
            if map.get(&name) == Some(&index) {
                map.remove(&name);
            }
        });
    }
    ALLOCATED_INDICES.with(|set| {
        set.borrow_mut().remove(&index);
    });

    // Clear all array values at this index
    arrays::clear_all_at_index(index);

    GENERATIONS.with(|gens| {
        if let Some(generation) = gens.borrow_mut().get_mut(index) {
            *generation = generation.wrapping_add(1);
        }
    });

    // Return to pool for reuse
    FREE_INDICES.with(|free| {
        free.borrow_mut().push(index);
    });

    // AUTO-CLEANUP: When all widgets are destroyed, reset arrays to free memory.
    // Generations survive so that old handles stay stale.
    let is_empty = ALLOCATED_INDICES.with(|set| set.borrow().is_empty());
    if is_empty {
        arrays::reset_all_arrays();
        FREE_INDICES.with(|free| {
            free.borrow_mut().clear();
        });
        NEXT_INDEX.with(|next| {
            *next.borrow_mut() = 0;
        });
    }
}

// =============================================================================
// Destroy Callbacks
// =============================================================================

/// Register a callback to run when the widget at `index` is destroyed.
pub fn on_destroy(index: usize, callback: impl FnOnce() + 'static) {
    DESTROY_CALLBACKS.with(|callbacks| {
        callbacks
            .borrow_mut()
            .entry(index)
            .or_default()
            .push(Box::new(callback));
    });
}

/// Run and clear destroy callbacks for an index.
fn run_destroy_callbacks(index: usize) {
    let callbacks = DESTROY_CALLBACKS.with(|callbacks| callbacks.borrow_mut().remove(&index));
    if let Some(callbacks) = callbacks {
        for callback in callbacks {
            callback();
        }
    }
}

// =============================================================================
// Lookups
// =============================================================================

/// Get index for a widget name.
pub fn get_index(name: &str) -> Option<usize> {
    NAME_TO_INDEX.with(|map| map.borrow().get(name).copied())
}

/// Get name for an index.
pub fn get_name(index: usize) -> Option<String> {
    INDEX_TO_NAME.with(|map| map.borrow().get(&index).cloned())
}

/// Current generation of an index.
pub fn get_generation(index: usize) -> u32 {
    GENERATIONS.with(|gens| gens.borrow().get(index).copied().unwrap_or(0))
}

/// Check if an index is allocated and still at `generation`.
pub fn is_live(index: usize, generation: u32) -> bool {
    is_allocated(index) && get_generation(index) == generation
}

/// Get all currently allocated indices, in ascending order.
pub fn get_allocated_indices() -> Vec<usize> {
    ALLOCATED_INDICES.with(|set| set.borrow().iter().copied().collect())
}

/// Check if an index is currently allocated.
pub fn is_allocated(index: usize) -> bool {
    ALLOCATED_INDICES.with(|set| set.borrow().contains(&index))
}

/// Get the count of currently allocated widgets.
pub fn get_allocated_count() -> usize {
    ALLOCATED_INDICES.with(|set| set.borrow().len())
}

// =============================================================================
// Reset (for testing)
// =============================================================================

/// Reset all registry state (for testing).
pub fn reset_registry() {
    NAME_TO_INDEX.with(|map| map.borrow_mut().clear());
    INDEX_TO_NAME.with(|map| map.borrow_mut().clear());
    ALLOCATED_INDICES.with(|set| set.borrow_mut().clear());
    FREE_INDICES.with(|free| free.borrow_mut().clear());
    NEXT_INDEX.with(|next| *next.borrow_mut() = 0);
    NAME_COUNTER.with(|counter| *counter.borrow_mut() = 0);
    GENERATIONS.with(|gens| gens.borrow_mut().clear());
    DESTROY_CALLBACKS.with(|callbacks| callbacks.borrow_mut().clear());
    arrays::reset_all_arrays();
}
