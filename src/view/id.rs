//! # `ViewId`s
//!
//! [`ViewId`]s are unique identifiers for views. A view's layout binding is
//! stored against its id and lives until [`ViewId::remove`] is called.

use std::rc::Rc;

use slotmap::new_key_type;
use tracing::{debug, trace};

use super::{LayoutBinding, VIEW_STORAGE};
use crate::{LayoutError, LayoutNode, ViewKind};

new_key_type! {
    /// A small unique identifier for an instance of a view.
    ///
    /// Ids are only meaningful on the thread that created them.
    pub struct ViewId;
}

impl ViewId {
    /// Create a new view of the default kind.
    pub fn new() -> ViewId {
        Self::with_kind(ViewKind::VIEW)
    }

    /// Create a new view of `kind`. The kind decides, through the
    /// [`LayoutPolicy`](crate::LayoutPolicy), whether its binding starts
    /// enabled.
    pub fn with_kind(kind: impl Into<ViewKind>) -> ViewId {
        let kind = kind.into();
        VIEW_STORAGE.with_borrow_mut(|s| s.view_ids.insert(kind))
    }

    /// Check if this ViewId is still valid (exists in `VIEW_STORAGE`).
    pub fn is_valid(&self) -> bool {
        VIEW_STORAGE.with_borrow(|s| s.view_ids.contains_key(*self))
    }

    pub fn kind(&self) -> Option<ViewKind> {
        VIEW_STORAGE.with_borrow(|s| s.view_ids.get(*self).cloned())
    }

    /// Remove this view and tear down its layout binding, releasing the
    /// layout node.
    ///
    /// This is the hook to call when the view is destroyed. Calling it again
    /// for the same id does nothing.
    pub fn remove(&self) {
        let (kind, binding) = VIEW_STORAGE.with_borrow_mut(|s| {
            let binding = s.bindings.remove(*self);
            (s.view_ids.remove(*self), binding)
        });
        if kind.is_none() {
            debug!(view = ?self, "view already removed, ignoring teardown");
        }
        // the storage borrow is released before the node leaves the tree
        let Some(binding) = binding else {
            return;
        };
        binding.teardown();
        if let Some(parent) = binding.parent.take().and_then(|p| p.existing_binding()) {
            parent.items.borrow_mut().retain(|item| item != self);
        }
        let items = binding.items.take();
        VIEW_STORAGE.with_borrow(|s| {
            for item in items {
                if let Some(item) = s.bindings.get(item) {
                    item.parent.set(None);
                }
            }
        });
    }

    fn existing_binding(&self) -> Option<Rc<LayoutBinding>> {
        VIEW_STORAGE.with_borrow(|s| s.bindings.get(*self).cloned())
    }

    /// Get the layout binding for this view, creating it on first access.
    ///
    /// Every call for the same view returns the same binding until the view
    /// is removed.
    pub fn layout_binding(&self) -> Result<Rc<LayoutBinding>, LayoutError> {
        VIEW_STORAGE.with_borrow_mut(|s| {
            let Some(kind) = s.view_ids.get(*self) else {
                return Err(LayoutError::StaleView(*self));
            };
            if let Some(binding) = s.bindings.get(*self) {
                return Ok(binding.clone());
            }
            let enabled = s.policy.is_enabled_for(kind);
            let node = LayoutNode::new(&s.taffy)?;
            let binding = Rc::new(LayoutBinding::new(*self, enabled, node));
            s.bindings.insert(*self, binding.clone());
            trace!(view = ?self, %kind, enabled, "created layout binding");
            Ok(binding)
        })
    }

    /// Whether this view has a binding, without creating one.
    pub fn has_layout_binding(&self) -> bool {
        VIEW_STORAGE.with_borrow(|s| s.bindings.contains_key(*self))
    }

    /// Whether this view has a binding and it is enabled.
    ///
    /// Never creates a binding: a view whose layout was never accessed
    /// reports `false`.
    pub fn is_layout_enabled(&self) -> bool {
        VIEW_STORAGE.with_borrow(|s| {
            s.bindings
                .get(*self)
                .is_some_and(|binding| binding.is_enabled())
        })
    }

    /// Run `configure` once with this view's layout node, creating the
    /// binding first if needed.
    ///
    /// ```rust
    /// use flexbind::{Edge, ViewId};
    ///
    /// let id = ViewId::new();
    /// id.configure_layout(|node| {
    ///     node.set_width(100.0)?;
    ///     node.set_height(50.0)?;
    ///     node.set_padding(Edge::All, 8.0)
    /// })
    /// .unwrap()
    /// .unwrap();
    /// ```
    pub fn configure_layout<R>(
        &self,
        configure: impl FnOnce(&LayoutNode) -> R,
    ) -> Result<R, LayoutError> {
        let binding = self.layout_binding()?;
        Ok(binding.configure(configure))
    }

    /// Add `item` as the last layout item of this view, creating both
    /// bindings if needed, and return the item's binding.
    ///
    /// An item that already has a parent is moved. The item's node becomes a
    /// child of this view's node while the item is enabled and included in
    /// layout.
    pub fn add_layout_item(&self, item: ViewId) -> Result<Rc<LayoutBinding>, LayoutError> {
        let parent = self.layout_binding()?;
        let child = item.layout_binding()?;

        let mut ancestor = Some(*self);
        while let Some(id) = ancestor {
            if id == item {
                return Err(LayoutError::CyclicItem(item));
            }
            ancestor = id.layout_parent();
        }

        if let Some(previous) = child.parent() {
            previous.remove_layout_item(item)?;
        }
        parent.items.borrow_mut().push(item);
        child.parent.set(Some(*self));
        parent.sync_items()?;
        Ok(child)
    }

    /// Remove `item` from this view's layout items. Does nothing if it is not
    /// one of them.
    pub fn remove_layout_item(&self, item: ViewId) -> Result<(), LayoutError> {
        if !self.is_valid() {
            return Err(LayoutError::StaleView(*self));
        }
        let Some(parent) = self.existing_binding() else {
            return Ok(());
        };
        let removed = {
            let mut items = parent.items.borrow_mut();
            let count = items.len();
            items.retain(|i| *i != item);
            items.len() != count
        };
        if !removed {
            return Ok(());
        }
        if let Some(child) = item.existing_binding() {
            child.parent.set(None);
        }
        parent.sync_items()
    }

    /// The layout items of this view in insertion order.
    pub fn layout_items(&self) -> Vec<ViewId> {
        self.existing_binding()
            .map(|binding| binding.items())
            .unwrap_or_default()
    }

    /// The view this one was added to as a layout item.
    pub fn layout_parent(&self) -> Option<ViewId> {
        self.existing_binding().and_then(|binding| binding.parent())
    }
}
