use std::cell::{Cell, RefCell};

use taffy::NodeId;
use tracing::{debug, debug_span};

use super::{VIEW_STORAGE, ViewId};
use crate::{LayoutError, LayoutNode};

/// The layout state attached to a view.
///
/// A binding is created the first time its view's layout is accessed (see
/// [`ViewId::layout_binding`]) and owns the view's [`LayoutNode`] until the
/// view is removed.
#[derive(Debug)]
pub struct LayoutBinding {
    view: ViewId,
    enabled: Cell<bool>,
    included_in_layout: Cell<bool>,
    /// The view this one was added to with [`ViewId::add_layout_item`].
    pub(crate) parent: Cell<Option<ViewId>>,
    /// Layout items in insertion order, including ones currently excluded.
    pub(crate) items: RefCell<Vec<ViewId>>,
    node: LayoutNode,
}

impl LayoutBinding {
    pub(crate) fn new(view: ViewId, enabled: bool, node: LayoutNode) -> Self {
        Self {
            view,
            enabled: Cell::new(enabled),
            included_in_layout: Cell::new(true),
            parent: Cell::new(None),
            items: RefCell::new(Vec::new()),
            node,
        }
    }

    /// The view this binding belongs to.
    pub fn view(&self) -> ViewId {
        self.view
    }

    /// Whether the view takes part in layout. The initial value comes from the
    /// [`LayoutPolicy`](crate::LayoutPolicy) for the view's kind.
    ///
    /// A disabled item is left out of its parent's node.
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn set_enabled(&self, enabled: bool) {
        if self.enabled.replace(enabled) != enabled {
            self.sync_parent();
        }
    }

    /// Whether an enabled view occupies space in its parent's layout.
    pub fn is_included_in_layout(&self) -> bool {
        self.included_in_layout.get()
    }

    /// Excluding a view detaches its node from the parent's node; including
    /// it again puts it back in its original position among the items.
    pub fn set_included_in_layout(&self, included: bool) {
        if self.included_in_layout.replace(included) != included {
            self.sync_parent();
        }
    }

    pub fn node(&self) -> &LayoutNode {
        &self.node
    }

    /// Run `configure` once with this binding's node and return its result.
    ///
    /// Equivalent to calling the same mutators on [`LayoutBinding::node`] one
    /// by one, but gives a single entry point for a batch of changes.
    pub fn configure<R>(&self, configure: impl FnOnce(&LayoutNode) -> R) -> R {
        let _span = debug_span!("configure_layout", view = ?self.view).entered();
        configure(&self.node)
    }

    /// True once the owning view was removed and the node released.
    pub fn is_torn_down(&self) -> bool {
        self.node.is_released()
    }

    /// The parent view, if this view was added as a layout item.
    pub fn parent(&self) -> Option<ViewId> {
        self.parent.get()
    }

    /// Layout items in the order they were added, whether or not they are
    /// currently included.
    pub fn items(&self) -> Vec<ViewId> {
        self.items.borrow().clone()
    }

    fn participates(&self) -> bool {
        self.is_enabled() && self.is_included_in_layout() && !self.is_torn_down()
    }

    /// Rebuild the node's children from the items that take part in layout.
    pub(crate) fn sync_items(&self) -> Result<(), LayoutError> {
        let children: Vec<NodeId> = VIEW_STORAGE.with_borrow(|s| {
            self.items
                .borrow()
                .iter()
                .filter_map(|item| s.bindings.get(*item))
                .filter(|binding| binding.participates())
                .map(|binding| binding.node.id())
                .collect()
        });
        self.node.set_children(&children)
    }

    fn sync_parent(&self) {
        let Some(parent) = self.parent.get() else {
            return;
        };
        let parent = VIEW_STORAGE.with_borrow(|s| s.bindings.get(parent).cloned());
        if let Some(parent) = parent
            && let Err(err) = parent.sync_items()
        {
            debug!(view = ?self.view, %err, "could not update parent layout children");
        }
    }

    /// Release the node. Repeated calls are ignored.
    pub(crate) fn teardown(&self) {
        if !self.node.release() {
            debug!(view = ?self.view, "layout binding already torn down");
        }
    }
}
