use std::{cell::RefCell, rc::Rc};

use slotmap::{SecondaryMap, SlotMap};
use taffy::TaffyTree;

use super::{LayoutBinding, ViewId};
use crate::{LayoutPolicy, ViewKind};

thread_local! {
    pub(crate) static VIEW_STORAGE: RefCell<ViewStorage> = Default::default();
}

/// Side table standing in for per-view auxiliary data.
///
/// A binding lives here from its first access until its view is removed.
pub(crate) struct ViewStorage {
    pub(crate) taffy: Rc<RefCell<TaffyTree>>,
    pub(crate) view_ids: SlotMap<ViewId, ViewKind>,
    pub(crate) bindings: SecondaryMap<ViewId, Rc<LayoutBinding>>,
    pub(crate) policy: LayoutPolicy,
}

impl Default for ViewStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewStorage {
    pub fn new() -> Self {
        let mut taffy = TaffyTree::new();
        taffy.disable_rounding();

        Self {
            taffy: Rc::new(RefCell::new(taffy)),
            view_ids: Default::default(),
            bindings: Default::default(),
            policy: Default::default(),
        }
    }
}
