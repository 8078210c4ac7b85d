//! Testing utilities for flexbind.
//!
//! # Example
//!
//! ```rust
//! use flexbind_test::prelude::*;
//!
//! let view = TestView::new();
//! view.id().configure_layout(|node| node.set_width(10.0)).unwrap().unwrap();
//! assert_eq!(node_count(), 1);
//! drop(view);
//! assert_eq!(node_count(), 0);
//! ```

use std::ops::Deref;

use flexbind::{ViewId, ViewKind, layout_tree};

pub mod prelude {
    pub use super::{TestView, node_count};
    pub use flexbind::prelude::*;
}

/// A view that is removed when the guard is dropped, like a view destroyed by
/// its framework.
#[derive(Debug)]
pub struct TestView {
    id: ViewId,
}

impl TestView {
    pub fn new() -> Self {
        Self { id: ViewId::new() }
    }

    pub fn with_kind(kind: impl Into<ViewKind>) -> Self {
        Self {
            id: ViewId::with_kind(kind),
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }
}

impl Default for TestView {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for TestView {
    type Target = ViewId;

    fn deref(&self) -> &ViewId {
        &self.id
    }
}

impl Drop for TestView {
    fn drop(&mut self) {
        self.id.remove();
    }
}

/// Number of layout nodes alive in this thread's tree.
pub fn node_count() -> usize {
    layout_tree().borrow().total_node_count()
}
