//! Which kinds of views take part in layout when their binding is created.

use std::{borrow::Cow, fmt};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{LayoutError, view::VIEW_STORAGE};

/// The kind of a platform view, such as `"label"` or `"image"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewKind(Cow<'static, str>);

impl ViewKind {
    /// The kind used by [`ViewId::new`](crate::ViewId::new).
    pub const VIEW: ViewKind = ViewKind(Cow::Borrowed("view"));

    pub const fn new(name: &'static str) -> Self {
        ViewKind(Cow::Borrowed(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Default for ViewKind {
    fn default() -> Self {
        ViewKind::VIEW
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ViewKind {
    fn from(name: &'static str) -> Self {
        ViewKind::new(name)
    }
}

impl From<String> for ViewKind {
    fn from(name: String) -> Self {
        ViewKind(Cow::Owned(name))
    }
}

/// Decides whether a new binding starts enabled, per view kind.
///
/// Kinds without an entry use `default_enabled`. A policy can be loaded from
/// JSON:
///
/// ```rust
/// use flexbind::LayoutPolicy;
///
/// let policy = LayoutPolicy::from_json(
///     r#"{ "default_enabled": true, "kinds": { "spacer": false } }"#,
/// )
/// .unwrap();
/// assert!(!policy.is_enabled_for(&"spacer".into()));
/// assert!(policy.is_enabled_for(&"label".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutPolicy {
    pub default_enabled: bool,
    pub kinds: FxHashMap<ViewKind, bool>,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            default_enabled: true,
            kinds: FxHashMap::default(),
        }
    }
}

impl LayoutPolicy {
    pub fn new(default_enabled: bool) -> Self {
        Self {
            default_enabled,
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the starting state for bindings of `kind`.
    pub fn with_kind(mut self, kind: impl Into<ViewKind>, enabled: bool) -> Self {
        self.kinds.insert(kind.into(), enabled);
        self
    }

    pub fn is_enabled_for(&self, kind: &ViewKind) -> bool {
        self.kinds
            .get(kind)
            .copied()
            .unwrap_or(self.default_enabled)
    }
}

/// Replace the policy used for bindings created on this thread from now on.
///
/// Bindings that already exist keep their state.
pub fn set_layout_policy(policy: LayoutPolicy) {
    VIEW_STORAGE.with_borrow_mut(|s| s.policy = policy);
}

/// The policy currently used on this thread.
pub fn layout_policy() -> LayoutPolicy {
    VIEW_STORAGE.with_borrow(|s| s.policy.clone())
}
