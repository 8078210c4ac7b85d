//! A set of layout property changes that can be applied to a
//! [`LayoutNode`](crate::LayoutNode) in one write.

use taffy::style::{
    AlignContent, AlignItems, AlignSelf, Display, FlexDirection, FlexWrap, JustifyContent,
    Position,
};

use crate::{
    Edge, LayoutError, LayoutValue,
    value::{check_aspect_ratio, check_factor},
};

/// Optional property changes, applied with [`LayoutNode::apply`](crate::LayoutNode::apply).
///
/// Properties left unset keep whatever the node already has.
///
/// ```rust
/// use flexbind::{Edge, LayoutStyle};
///
/// let style = LayoutStyle::new()
///     .size(100.0, 50.0)
///     .flex_grow(1.0)
///     .padding(Edge::All, 8.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutStyle {
    width: Option<LayoutValue>,
    height: Option<LayoutValue>,
    min_width: Option<LayoutValue>,
    min_height: Option<LayoutValue>,
    max_width: Option<LayoutValue>,
    max_height: Option<LayoutValue>,
    flex_basis: Option<LayoutValue>,
    flex_grow: Option<f32>,
    flex_shrink: Option<f32>,
    aspect_ratio: Option<Option<f32>>,
    display: Option<Display>,
    position_type: Option<Position>,
    flex_direction: Option<FlexDirection>,
    flex_wrap: Option<FlexWrap>,
    justify_content: Option<Option<JustifyContent>>,
    align_items: Option<Option<AlignItems>>,
    align_self: Option<Option<AlignSelf>>,
    align_content: Option<Option<AlignContent>>,
    row_gap: Option<LayoutValue>,
    column_gap: Option<LayoutValue>,
    margin: Vec<(Edge, LayoutValue)>,
    padding: Vec<(Edge, LayoutValue)>,
    position: Vec<(Edge, LayoutValue)>,
    border: Vec<(Edge, f32)>,
}

impl LayoutStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, value: impl Into<LayoutValue>) -> Self {
        self.width = Some(value.into());
        self
    }

    pub fn height(mut self, value: impl Into<LayoutValue>) -> Self {
        self.height = Some(value.into());
        self
    }

    pub fn size(self, width: impl Into<LayoutValue>, height: impl Into<LayoutValue>) -> Self {
        self.width(width).height(height)
    }

    pub fn min_width(mut self, value: impl Into<LayoutValue>) -> Self {
        self.min_width = Some(value.into());
        self
    }

    pub fn min_height(mut self, value: impl Into<LayoutValue>) -> Self {
        self.min_height = Some(value.into());
        self
    }

    pub fn max_width(mut self, value: impl Into<LayoutValue>) -> Self {
        self.max_width = Some(value.into());
        self
    }

    pub fn max_height(mut self, value: impl Into<LayoutValue>) -> Self {
        self.max_height = Some(value.into());
        self
    }

    pub fn flex_basis(mut self, value: impl Into<LayoutValue>) -> Self {
        self.flex_basis = Some(value.into());
        self
    }

    pub fn flex_grow(mut self, value: f32) -> Self {
        self.flex_grow = Some(value);
        self
    }

    pub fn flex_shrink(mut self, value: f32) -> Self {
        self.flex_shrink = Some(value);
        self
    }

    pub fn aspect_ratio(mut self, value: Option<f32>) -> Self {
        self.aspect_ratio = Some(value);
        self
    }

    pub fn display(mut self, value: Display) -> Self {
        self.display = Some(value);
        self
    }

    pub fn position_type(mut self, value: Position) -> Self {
        self.position_type = Some(value);
        self
    }

    pub fn flex_direction(mut self, value: FlexDirection) -> Self {
        self.flex_direction = Some(value);
        self
    }

    pub fn flex_wrap(mut self, value: FlexWrap) -> Self {
        self.flex_wrap = Some(value);
        self
    }

    pub fn justify_content(mut self, value: Option<JustifyContent>) -> Self {
        self.justify_content = Some(value);
        self
    }

    pub fn align_items(mut self, value: Option<AlignItems>) -> Self {
        self.align_items = Some(value);
        self
    }

    pub fn align_self(mut self, value: Option<AlignSelf>) -> Self {
        self.align_self = Some(value);
        self
    }

    pub fn align_content(mut self, value: Option<AlignContent>) -> Self {
        self.align_content = Some(value);
        self
    }

    pub fn row_gap(mut self, value: impl Into<LayoutValue>) -> Self {
        self.row_gap = Some(value.into());
        self
    }

    pub fn column_gap(mut self, value: impl Into<LayoutValue>) -> Self {
        self.column_gap = Some(value.into());
        self
    }

    pub fn gap(self, value: impl Into<LayoutValue>) -> Self {
        let value = value.into();
        self.row_gap(value).column_gap(value)
    }

    /// Later edges override earlier ones where they overlap.
    pub fn margin(mut self, edge: Edge, value: impl Into<LayoutValue>) -> Self {
        self.margin.push((edge, value.into()));
        self
    }

    pub fn padding(mut self, edge: Edge, value: impl Into<LayoutValue>) -> Self {
        self.padding.push((edge, value.into()));
        self
    }

    pub fn position(mut self, edge: Edge, value: impl Into<LayoutValue>) -> Self {
        self.position.push((edge, value.into()));
        self
    }

    pub fn border(mut self, edge: Edge, width: f32) -> Self {
        self.border.push((edge, width));
        self
    }

    /// Validate every value that is set, in declaration order.
    pub(crate) fn check(&self) -> Result<(), LayoutError> {
        let sizes = [
            ("width", self.width),
            ("height", self.height),
            ("min_width", self.min_width),
            ("min_height", self.min_height),
            ("max_width", self.max_width),
            ("max_height", self.max_height),
            ("flex_basis", self.flex_basis),
        ];
        for (property, value) in sizes {
            if let Some(value) = value {
                value.check_size(property)?;
            }
        }
        if let Some(value) = self.flex_grow {
            check_factor("flex_grow", value)?;
        }
        if let Some(value) = self.flex_shrink {
            check_factor("flex_shrink", value)?;
        }
        if let Some(value) = self.aspect_ratio {
            check_aspect_ratio(value)?;
        }
        for (property, value) in [("row_gap", self.row_gap), ("column_gap", self.column_gap)] {
            if let Some(value) = value {
                value.check_spacing(property)?;
            }
        }
        for (_, value) in &self.margin {
            value.check_offset("margin")?;
        }
        for (_, value) in &self.padding {
            value.check_spacing("padding")?;
        }
        for (_, value) in &self.position {
            value.check_offset("position")?;
        }
        for (_, width) in &self.border {
            LayoutValue::Length(*width).check_spacing("border")?;
        }
        Ok(())
    }

    /// Assumes [`LayoutStyle::check`] passed.
    pub(crate) fn write_to(&self, style: &mut taffy::Style) {
        let sizes = [
            (self.width, &mut style.size.width),
            (self.height, &mut style.size.height),
            (self.min_width, &mut style.min_size.width),
            (self.min_height, &mut style.min_size.height),
            (self.max_width, &mut style.max_size.width),
            (self.max_height, &mut style.max_size.height),
            (self.flex_basis, &mut style.flex_basis),
        ];
        for (value, slot) in sizes {
            if let Some(value) = value {
                *slot = value.to_dimension();
            }
        }
        if let Some(value) = self.flex_grow {
            style.flex_grow = value;
        }
        if let Some(value) = self.flex_shrink {
            style.flex_shrink = value;
        }
        if let Some(value) = self.aspect_ratio {
            style.aspect_ratio = value;
        }
        if let Some(value) = self.display {
            style.display = value;
        }
        if let Some(value) = self.position_type {
            style.position = value;
        }
        if let Some(value) = self.flex_direction {
            style.flex_direction = value;
        }
        if let Some(value) = self.flex_wrap {
            style.flex_wrap = value;
        }
        if let Some(value) = self.justify_content {
            style.justify_content = value;
        }
        if let Some(value) = self.align_items {
            style.align_items = value;
        }
        if let Some(value) = self.align_self {
            style.align_self = value;
        }
        if let Some(value) = self.align_content {
            style.align_content = value;
        }
        if let Some(value) = self.row_gap {
            style.gap.height = value.to_length_percentage();
        }
        if let Some(value) = self.column_gap {
            style.gap.width = value.to_length_percentage();
        }
        for (edge, value) in &self.margin {
            edge.set(&mut style.margin, value.to_length_percentage_auto());
        }
        for (edge, value) in &self.padding {
            edge.set(&mut style.padding, value.to_length_percentage());
        }
        for (edge, value) in &self.position {
            edge.set(&mut style.inset, value.to_length_percentage_auto());
        }
        for (edge, width) in &self.border {
            edge.set(&mut style.border, LayoutValue::Length(*width).to_length_percentage());
        }
    }
}
