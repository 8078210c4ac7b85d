//! Values accepted by [`LayoutNode`](crate::LayoutNode) properties.

use serde::{Deserialize, Serialize};
use taffy::{
    CompactLength,
    style::{Dimension, LengthPercentage, LengthPercentageAuto},
};

use crate::LayoutError;

/// A length that can be written to a layout property.
///
/// Percentages are fractions of the parent size: `Percent(1.0)` is 100%.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum LayoutValue {
    #[default]
    Auto,
    Length(f32),
    Percent(f32),
}

impl From<f32> for LayoutValue {
    fn from(value: f32) -> Self {
        LayoutValue::Length(value)
    }
}

impl From<f64> for LayoutValue {
    fn from(value: f64) -> Self {
        LayoutValue::Length(value as f32)
    }
}

impl From<i32> for LayoutValue {
    fn from(value: i32) -> Self {
        LayoutValue::Length(value as f32)
    }
}

impl LayoutValue {
    pub fn length(value: f32) -> Self {
        LayoutValue::Length(value)
    }

    pub fn percent(value: f32) -> Self {
        LayoutValue::Percent(value)
    }

    /// A length if one is given, otherwise `Auto`.
    pub fn or_auto(value: Option<f32>) -> Self {
        value.map_or(LayoutValue::Auto, LayoutValue::Length)
    }

    /// A length if one is given, otherwise a zero length.
    ///
    /// Used for properties such as padding that have no `auto` form.
    pub fn or_zero(value: Option<f32>) -> Self {
        LayoutValue::Length(value.unwrap_or(0.0))
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, LayoutValue::Auto)
    }

    fn number(&self) -> Option<f32> {
        match self {
            LayoutValue::Auto => None,
            LayoutValue::Length(v) | LayoutValue::Percent(v) => Some(*v),
        }
    }

    fn from_raw(raw: CompactLength) -> Self {
        if raw.tag() == CompactLength::LENGTH_TAG {
            LayoutValue::Length(raw.value())
        } else if raw.tag() == CompactLength::PERCENT_TAG {
            LayoutValue::Percent(raw.value())
        } else {
            LayoutValue::Auto
        }
    }

    pub(crate) fn from_dimension(value: Dimension) -> Self {
        Self::from_raw(value.into_raw())
    }

    pub(crate) fn from_length_percentage(value: LengthPercentage) -> Self {
        Self::from_raw(value.into_raw())
    }

    pub(crate) fn from_length_percentage_auto(value: LengthPercentageAuto) -> Self {
        Self::from_raw(value.into_raw())
    }

    pub(crate) fn to_dimension(self) -> Dimension {
        match self {
            LayoutValue::Auto => Dimension::auto(),
            LayoutValue::Length(v) => Dimension::length(v),
            LayoutValue::Percent(v) => Dimension::percent(v),
        }
    }

    pub(crate) fn to_length_percentage_auto(self) -> LengthPercentageAuto {
        match self {
            LayoutValue::Auto => LengthPercentageAuto::auto(),
            LayoutValue::Length(v) => LengthPercentageAuto::length(v),
            LayoutValue::Percent(v) => LengthPercentageAuto::percent(v),
        }
    }

    /// `Auto` has no representation here; callers validate with
    /// [`LayoutValue::check_spacing`] first.
    pub(crate) fn to_length_percentage(self) -> LengthPercentage {
        match self {
            LayoutValue::Auto => LengthPercentage::length(0.0),
            LayoutValue::Length(v) => LengthPercentage::length(v),
            LayoutValue::Percent(v) => LengthPercentage::percent(v),
        }
    }

    /// Sizes: `auto`, or a finite non-negative length or percentage.
    pub(crate) fn check_size(self, property: &'static str) -> Result<Self, LayoutError> {
        match self.number() {
            Some(v) if !v.is_finite() || v < 0.0 => Err(LayoutError::invalid(property, self)),
            _ => Ok(self),
        }
    }

    /// Margins and insets: `auto`, or any finite length or percentage.
    pub(crate) fn check_offset(self, property: &'static str) -> Result<Self, LayoutError> {
        match self.number() {
            Some(v) if !v.is_finite() => Err(LayoutError::invalid(property, self)),
            _ => Ok(self),
        }
    }

    /// Padding and gaps: a finite non-negative length or percentage.
    pub(crate) fn check_spacing(self, property: &'static str) -> Result<Self, LayoutError> {
        match self.number() {
            Some(v) if v.is_finite() && v >= 0.0 => Ok(self),
            _ => Err(LayoutError::invalid(property, self)),
        }
    }
}

pub(crate) fn check_factor(property: &'static str, value: f32) -> Result<f32, LayoutError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(LayoutError::invalid(property, value))
    }
}

pub(crate) fn check_aspect_ratio(value: Option<f32>) -> Result<Option<f32>, LayoutError> {
    match value {
        Some(v) if !v.is_finite() || v <= 0.0 => Err(LayoutError::invalid("aspect_ratio", v)),
        _ => Ok(value),
    }
}

/// The side(s) of a node an edge property applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
    /// Left and right.
    Horizontal,
    /// Top and bottom.
    Vertical,
    All,
}

impl Edge {
    pub(crate) fn set<T: Copy>(self, rect: &mut taffy::geometry::Rect<T>, value: T) {
        match self {
            Edge::Left => rect.left = value,
            Edge::Top => rect.top = value,
            Edge::Right => rect.right = value,
            Edge::Bottom => rect.bottom = value,
            Edge::Horizontal => {
                rect.left = value;
                rect.right = value;
            }
            Edge::Vertical => {
                rect.top = value;
                rect.bottom = value;
            }
            Edge::All => {
                rect.left = value;
                rect.right = value;
                rect.top = value;
                rect.bottom = value;
            }
        }
    }

    /// Composite edges read their first side: left for horizontal and all,
    /// top for vertical.
    pub(crate) fn get<T: Copy>(self, rect: &taffy::geometry::Rect<T>) -> T {
        match self {
            Edge::Left | Edge::Horizontal | Edge::All => rect.left,
            Edge::Top | Edge::Vertical => rect.top,
            Edge::Right => rect.right,
            Edge::Bottom => rect.bottom,
        }
    }
}
