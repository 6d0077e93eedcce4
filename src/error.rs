//! Error types.
//!
//! Three sources of failure:
//! - [`NativeError`]: the native engine refused a container operation
//! - [`WidgetError`]: a widget-level call failed (lookup failure in a
//!   container's tracked child list, or a native failure passed through)
//! - [`TaskError`]: a background thread could not be started

use std::io;

/// Failures raised by the native container API.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum NativeError {
    #[error("widget {0} has been destroyed")]
    Destroyed(usize),
    #[error("widget {0} cannot hold children")]
    NotAContainer(usize),
    #[error("widget {child} already has parent {parent}")]
    AlreadyParented { child: usize, parent: usize },
    #[error("widget {child} is not a child of {parent}")]
    NotAChild { child: usize, parent: usize },
    #[error("adding widget {child} to {parent} would create a cycle")]
    WouldCycle { child: usize, parent: usize },
    #[error("widget {child} is still a child of {parent}, remove it first")]
    StillParented { child: usize, parent: usize },
}

/// Failures raised by widget operations.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum WidgetError {
    #[error("widget {0} is not tracked by this container")]
    ChildNotFound(usize),
    #[error(transparent)]
    Native(#[from] NativeError),
}

/// Failures raised by the task launcher.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("failed to spawn thread {name}: {source}")]
    Spawn {
        name: String,
        #[source]
        source: io::Error,
    },
}
