use taffy::TaffyError;
use thiserror::Error;

use crate::ViewId;

/// Errors reported by layout bindings and their nodes.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The layout tree could not create a node for a binding.
    #[error("failed to allocate layout node: {0}")]
    AllocationFailure(#[source] TaffyError),
    /// A property mutator was given a value outside of its domain.
    ///
    /// The node keeps the value it had before the call.
    #[error("invalid value for `{property}`: {value}")]
    InvalidLayoutValue {
        property: &'static str,
        value: String,
    },
    /// The node was already released because its view was removed.
    #[error("layout node has been released")]
    NodeReleased,
    /// The layout tree is borrowed elsewhere, usually by a caller of
    /// [`layout_tree`](crate::layout_tree) that is still solving it.
    #[error("layout tree is borrowed elsewhere")]
    TreeBusy,
    /// Adding the view as a layout item would make it its own ancestor.
    #[error("view {0:?} cannot be laid out inside itself")]
    CyclicItem(ViewId),
    /// The view was removed, or never existed on this thread.
    #[error("view {0:?} is not alive")]
    StaleView(ViewId),
    /// A layout policy document could not be parsed.
    #[error("invalid layout policy: {0}")]
    Policy(#[from] serde_json::Error),
}

impl LayoutError {
    pub(crate) fn invalid(property: &'static str, value: impl std::fmt::Debug) -> Self {
        LayoutError::InvalidLayoutValue {
            property,
            value: format!("{value:?}"),
        }
    }
}
