//! # Views and their layout bindings
//!
//! Views are owned by the host UI framework. This module only tracks their
//! identity ([`ViewId`]) and the [`LayoutBinding`] attached to each one.

mod binding;
mod id;
mod storage;

pub use binding::LayoutBinding;
pub use id::ViewId;
pub(crate) use storage::*;
