//! # `LayoutNode`
//!
//! A [`LayoutNode`] owns one node of the shared taffy tree. It only writes
//! layout properties; solving the tree is left to whoever holds the tree.
//!
//! Every mutator validates its argument before touching the tree, so a
//! rejected value leaves the node exactly as it was.

use std::{
    cell::{Cell, Ref, RefCell, RefMut},
    fmt,
    rc::{Rc, Weak},
};

use taffy::{
    NodeId, TaffyTree,
    style::{
        AlignContent, AlignItems, AlignSelf, Display, FlexDirection, FlexWrap, JustifyContent,
        Position,
    },
};
use tracing::{debug, trace};

use crate::{
    Edge, LayoutError, LayoutStyle, LayoutValue,
    value::{check_aspect_ratio, check_factor},
};

thread_local! {
    /// Nodes whose release found their tree borrowed. They are removed the
    /// next time that tree is written through a [`LayoutNode`].
    static DEFERRED_RELEASES: RefCell<Vec<(Weak<RefCell<TaffyTree>>, NodeId)>> =
        const { RefCell::new(Vec::new()) };
}

fn flush_deferred_releases(owner: &Rc<RefCell<TaffyTree>>, tree: &mut TaffyTree) {
    let _ = DEFERRED_RELEASES.try_with(|pending| {
        pending.borrow_mut().retain(|(tree_ref, node)| {
            if tree_ref.strong_count() == 0 {
                return false;
            }
            if tree_ref.as_ptr() != Rc::as_ptr(owner) {
                return true;
            }
            if let Err(err) = tree.remove(*node) {
                debug!(?node, %err, "deferred layout node was already gone from the tree");
            }
            trace!(?node, "released deferred layout node");
            false
        });
    });
}

/// Getter and `set_` mutator for properties stored as a taffy `Dimension`.
macro_rules! size_property {
    ($($(#[$meta:meta])* $name:ident => $($field:ident).+;)*) => {
        paste::paste! {
            $(
                $(#[$meta])*
                pub fn $name(&self) -> Result<LayoutValue, LayoutError> {
                    self.read(|s| LayoutValue::from_dimension(s.$($field).+))
                }

                $(#[$meta])*
                ///
                /// Fails with [`LayoutError::InvalidLayoutValue`] for negative or
                /// non-finite values.
                pub fn [<set_ $name>](&self, value: impl Into<LayoutValue>) -> Result<(), LayoutError> {
                    let value = value.into().check_size(stringify!($name))?;
                    self.write(|s| s.$($field).+ = value.to_dimension())
                }
            )*
        }
    };
}

/// Getter and `set_` mutator for enum properties, which need no validation.
macro_rules! enum_property {
    ($($name:ident: $ty:ty => $field:ident;)*) => {
        paste::paste! {
            $(
                pub fn $name(&self) -> Result<$ty, LayoutError> {
                    self.read(|s| s.$field)
                }

                pub fn [<set_ $name>](&self, value: $ty) -> Result<(), LayoutError> {
                    self.write(|s| s.$field = value)
                }
            )*
        }
    };
}

/// Owner of a single node in a [`TaffyTree`].
///
/// The node is removed from the tree exactly once: either by
/// [`LayoutNode::destroy`], by the teardown of the view that owns it, or when
/// the handle is dropped. If the tree is borrowed at that moment the removal
/// is deferred to the next write through any node of the same tree.
///
/// Every operation fails with [`LayoutError::TreeBusy`] instead of panicking
/// while the tree is borrowed elsewhere.
pub struct LayoutNode {
    tree: Rc<RefCell<TaffyTree>>,
    node: NodeId,
    released: Cell<bool>,
}

impl fmt::Debug for LayoutNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutNode")
            .field("node", &self.node)
            .field("released", &self.released.get())
            .finish()
    }
}

impl LayoutNode {
    /// Create a new leaf with the default style in `tree`.
    pub fn new(tree: &Rc<RefCell<TaffyTree>>) -> Result<Self, LayoutError> {
        let node = {
            let mut taffy = tree.try_borrow_mut().map_err(|_| LayoutError::TreeBusy)?;
            flush_deferred_releases(tree, &mut taffy);
            taffy
                .new_leaf(taffy::Style::DEFAULT)
                .map_err(LayoutError::AllocationFailure)?
        };
        trace!(?node, "allocated layout node");
        Ok(Self {
            tree: tree.clone(),
            node,
            released: Cell::new(false),
        })
    }

    /// The taffy id of this node, for collaborators that solve the tree.
    pub fn id(&self) -> NodeId {
        self.node
    }

    /// Release the node now instead of waiting for the handle to drop.
    pub fn destroy(self) {
        self.release();
    }

    pub fn is_released(&self) -> bool {
        self.released.get()
    }

    /// Remove the node from the tree. Returns `false` if it was already
    /// released, in which case nothing happens.
    pub(crate) fn release(&self) -> bool {
        if self.released.replace(true) {
            return false;
        }
        match self.tree.try_borrow_mut() {
            Ok(mut tree) => {
                flush_deferred_releases(&self.tree, &mut tree);
                if let Err(err) = tree.remove(self.node) {
                    debug!(node = ?self.node, %err, "layout node was already gone from the tree");
                }
                trace!(node = ?self.node, "released layout node");
            }
            Err(_) => {
                debug!(node = ?self.node, "layout tree is borrowed, deferring node release");
                let _ = DEFERRED_RELEASES.try_with(|pending| {
                    pending
                        .borrow_mut()
                        .push((Rc::downgrade(&self.tree), self.node))
                });
            }
        }
        true
    }

    fn tree(&self) -> Result<Ref<'_, TaffyTree>, LayoutError> {
        if self.is_released() {
            return Err(LayoutError::NodeReleased);
        }
        self.tree.try_borrow().map_err(|_| LayoutError::TreeBusy)
    }

    fn tree_mut(&self) -> Result<RefMut<'_, TaffyTree>, LayoutError> {
        if self.is_released() {
            return Err(LayoutError::NodeReleased);
        }
        let mut tree = self
            .tree
            .try_borrow_mut()
            .map_err(|_| LayoutError::TreeBusy)?;
        flush_deferred_releases(&self.tree, &mut tree);
        Ok(tree)
    }

    fn read<R>(&self, f: impl FnOnce(&taffy::Style) -> R) -> Result<R, LayoutError> {
        let tree = self.tree()?;
        let style = tree.style(self.node).map_err(|_| LayoutError::NodeReleased)?;
        Ok(f(style))
    }

    fn write(&self, f: impl FnOnce(&mut taffy::Style)) -> Result<(), LayoutError> {
        let mut tree = self.tree_mut()?;
        let mut style = tree
            .style(self.node)
            .map_err(|_| LayoutError::NodeReleased)?
            .clone();
        f(&mut style);
        tree.set_style(self.node, style)
            .map_err(|_| LayoutError::NodeReleased)
    }

    /// A copy of the node's current taffy style.
    pub fn style(&self) -> Result<taffy::Style, LayoutError> {
        self.read(|s| s.clone())
    }

    /// Write every property set in `style` with a single tree update.
    ///
    /// All values are validated first; if any is rejected nothing is written.
    pub fn apply(&self, style: &LayoutStyle) -> Result<(), LayoutError> {
        style.check()?;
        self.write(|s| style.write_to(s))
    }

    pub fn mark_dirty(&self) -> Result<(), LayoutError> {
        self.tree_mut()?
            .mark_dirty(self.node)
            .map_err(|_| LayoutError::NodeReleased)
    }

    pub fn is_dirty(&self) -> Result<bool, LayoutError> {
        self.tree()?
            .dirty(self.node)
            .map_err(|_| LayoutError::NodeReleased)
    }

    /// The nodes laid out inside this one, in order.
    pub fn children(&self) -> Result<Vec<NodeId>, LayoutError> {
        self.tree()?
            .children(self.node)
            .map_err(|_| LayoutError::NodeReleased)
    }

    pub fn child_count(&self) -> Result<usize, LayoutError> {
        self.children().map(|children| children.len())
    }

    /// The node this one is laid out in, if any.
    pub fn parent(&self) -> Result<Option<NodeId>, LayoutError> {
        Ok(self.tree()?.parent(self.node))
    }

    /// Children are owned by the view hierarchy, see
    /// [`ViewId::add_layout_item`](crate::ViewId::add_layout_item).
    pub(crate) fn set_children(&self, children: &[NodeId]) -> Result<(), LayoutError> {
        self.tree_mut()?
            .set_children(self.node, children)
            .map_err(|_| LayoutError::NodeReleased)
    }

    size_property! {
        /// The preferred width.
        width => size.width;
        /// The preferred height.
        height => size.height;
        min_width => min_size.width;
        min_height => min_size.height;
        max_width => max_size.width;
        max_height => max_size.height;
        /// The initial main size before free space is distributed.
        flex_basis => flex_basis;
    }

    enum_property! {
        display: Display => display;
        position_type: Position => position;
        flex_direction: FlexDirection => flex_direction;
        flex_wrap: FlexWrap => flex_wrap;
        justify_content: Option<JustifyContent> => justify_content;
        align_items: Option<AlignItems> => align_items;
        align_self: Option<AlignSelf> => align_self;
        align_content: Option<AlignContent> => align_content;
    }

    pub fn flex_grow(&self) -> Result<f32, LayoutError> {
        self.read(|s| s.flex_grow)
    }

    pub fn set_flex_grow(&self, value: f32) -> Result<(), LayoutError> {
        let value = check_factor("flex_grow", value)?;
        self.write(|s| s.flex_grow = value)
    }

    pub fn flex_shrink(&self) -> Result<f32, LayoutError> {
        self.read(|s| s.flex_shrink)
    }

    pub fn set_flex_shrink(&self, value: f32) -> Result<(), LayoutError> {
        let value = check_factor("flex_shrink", value)?;
        self.write(|s| s.flex_shrink = value)
    }

    pub fn aspect_ratio(&self) -> Result<Option<f32>, LayoutError> {
        self.read(|s| s.aspect_ratio)
    }

    /// Width divided by height. Must be positive; `None` clears it.
    pub fn set_aspect_ratio(&self, value: Option<f32>) -> Result<(), LayoutError> {
        let value = check_aspect_ratio(value)?;
        self.write(|s| s.aspect_ratio = value)
    }

    pub fn margin(&self, edge: Edge) -> Result<LayoutValue, LayoutError> {
        self.read(|s| LayoutValue::from_length_percentage_auto(edge.get(&s.margin)))
    }

    /// Margins may be negative or `auto`.
    pub fn set_margin(&self, edge: Edge, value: impl Into<LayoutValue>) -> Result<(), LayoutError> {
        let value = value.into().check_offset("margin")?;
        self.write(|s| edge.set(&mut s.margin, value.to_length_percentage_auto()))
    }

    pub fn padding(&self, edge: Edge) -> Result<LayoutValue, LayoutError> {
        self.read(|s| LayoutValue::from_length_percentage(edge.get(&s.padding)))
    }

    pub fn set_padding(&self, edge: Edge, value: impl Into<LayoutValue>) -> Result<(), LayoutError> {
        let value = value.into().check_spacing("padding")?;
        self.write(|s| edge.set(&mut s.padding, value.to_length_percentage()))
    }

    pub fn border(&self, edge: Edge) -> Result<f32, LayoutError> {
        self.read(
            |s| match LayoutValue::from_length_percentage(edge.get(&s.border)) {
                LayoutValue::Length(v) => v,
                _ => 0.0,
            },
        )
    }

    pub fn set_border(&self, edge: Edge, width: f32) -> Result<(), LayoutError> {
        let value = LayoutValue::Length(width).check_spacing("border")?;
        self.write(|s| edge.set(&mut s.border, value.to_length_percentage()))
    }

    /// The inset of the node from its containing block on `edge`.
    pub fn position(&self, edge: Edge) -> Result<LayoutValue, LayoutError> {
        self.read(|s| LayoutValue::from_length_percentage_auto(edge.get(&s.inset)))
    }

    pub fn set_position(
        &self,
        edge: Edge,
        value: impl Into<LayoutValue>,
    ) -> Result<(), LayoutError> {
        let value = value.into().check_offset("position")?;
        self.write(|s| edge.set(&mut s.inset, value.to_length_percentage_auto()))
    }

    pub fn row_gap(&self) -> Result<LayoutValue, LayoutError> {
        self.read(|s| LayoutValue::from_length_percentage(s.gap.height))
    }

    pub fn set_row_gap(&self, value: impl Into<LayoutValue>) -> Result<(), LayoutError> {
        let value = value.into().check_spacing("row_gap")?;
        self.write(|s| s.gap.height = value.to_length_percentage())
    }

    pub fn column_gap(&self) -> Result<LayoutValue, LayoutError> {
        self.read(|s| LayoutValue::from_length_percentage(s.gap.width))
    }

    pub fn set_column_gap(&self, value: impl Into<LayoutValue>) -> Result<(), LayoutError> {
        let value = value.into().check_spacing("column_gap")?;
        self.write(|s| s.gap.width = value.to_length_percentage())
    }
}

impl Drop for LayoutNode {
    fn drop(&mut self) {
        self.release();
    }
}
