//! # Flexbind
//! Flexbind attaches a flexbox layout node to every view of a host UI
//! framework. The layout engine is [taffy](https://docs.rs/taffy); flexbind
//! owns the association between views and their nodes, not the layout math.
//!
//! ## Example
//! ```rust
//! use flexbind::{Edge, LayoutValue, ViewId};
//! use flexbind::taffy::style::FlexDirection;
//!
//! let view = ViewId::new();
//! assert!(!flexbind::is_layout_enabled(view));
//!
//! flexbind::configure_layout(view, |node| {
//!     node.set_flex_direction(FlexDirection::Column)?;
//!     node.set_width(100.0)?;
//!     node.set_height(50.0)?;
//!     node.set_margin(Edge::Horizontal, 4.0)
//! })
//! .unwrap()
//! .unwrap();
//!
//! assert!(flexbind::is_layout_enabled(view));
//! let binding = flexbind::layout_binding(view).unwrap();
//! assert_eq!(binding.node().width().unwrap(), LayoutValue::Length(100.0));
//!
//! view.remove();
//! assert!(binding.is_torn_down());
//! ```
//!
//! ## Bindings
//! A [`LayoutBinding`] is created the first time a view's layout is accessed,
//! either through [`layout_binding`] or [`configure_layout`], and is kept in a
//! thread-local side table keyed by [`ViewId`]. Asking again returns the same
//! binding. [`is_layout_enabled`] only reads the table and never creates one.
//!
//! The host framework calls [`ViewId::remove`] when a view is destroyed. That
//! drops the binding from the table and releases its node from the tree. A
//! second removal is ignored.
//!
//! ## Policies
//! Whether a new binding starts enabled depends on the view's [`ViewKind`] and
//! the thread's [`LayoutPolicy`], see [`set_layout_policy`].

mod error;
mod node;
pub mod policy;
mod style;
mod value;
mod view;

use std::{cell::RefCell, rc::Rc};

pub use error::LayoutError;
pub use node::LayoutNode;
pub use policy::{LayoutPolicy, ViewKind, layout_policy, set_layout_policy};
pub use style::LayoutStyle;
pub use taffy;
pub use value::{Edge, LayoutValue};
pub use view::{LayoutBinding, ViewId};

/// Get the layout binding of `view`, creating it on first access.
pub fn layout_binding(view: ViewId) -> Result<Rc<LayoutBinding>, LayoutError> {
    view.layout_binding()
}

/// Whether `view` has an enabled binding. Does not create a binding.
pub fn is_layout_enabled(view: ViewId) -> bool {
    view.is_layout_enabled()
}

/// Run `configure` once with the layout node of `view`, creating the binding
/// first if needed.
pub fn configure_layout<R>(
    view: ViewId,
    configure: impl FnOnce(&LayoutNode) -> R,
) -> Result<R, LayoutError> {
    view.configure_layout(configure)
}

/// The taffy tree holding every node created on this thread.
///
/// Solving layout is left to the caller; flexbind only writes styles.
///
/// While a borrow of the tree is held, node operations fail with
/// [`LayoutError::TreeBusy`], and nodes of views removed in the meantime stay
/// in the tree until the next write through a [`LayoutNode`].
pub fn layout_tree() -> Rc<RefCell<taffy::TaffyTree>> {
    view::VIEW_STORAGE.with_borrow(|s| s.taffy.clone())
}

pub mod prelude {
    pub use crate::taffy::style::{
        AlignContent, AlignItems, AlignSelf, Display, FlexDirection, FlexWrap, JustifyContent,
        Position,
    };
    pub use crate::{
        Edge, LayoutBinding, LayoutError, LayoutNode, LayoutPolicy, LayoutStyle, LayoutValue,
        ViewId, ViewKind, configure_layout, is_layout_enabled, layout_binding,
    };
}
