//! Typed style properties written by animations
//!
//! Backends map each [`Property`] onto their own representation (a web
//! backend composes `x`/`y`/`rotate`/`scale` into a CSS transform, the
//! in-memory document stores them as-is).

use std::fmt;

use crate::geometry::Color;

/// Style properties the motion components read and write
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    Opacity,
    Visibility,
    /// Horizontal translation in pixels
    X,
    /// Vertical translation in pixels
    Y,
    /// Horizontal translation as a percentage of the element width
    XPercent,
    /// Vertical translation as a percentage of the element height
    YPercent,
    /// Rotation in degrees
    Rotate,
    Scale,
    Color,
    Display,
    PointerEvents,
    Left,
    Top,
    StrokeDashoffset,
    TransformOrigin,
}

impl Property {
    /// Property name as written in style sheets and logs
    pub fn name(&self) -> &'static str {
        match self {
            Property::Opacity => "opacity",
            Property::Visibility => "visibility",
            Property::X => "x",
            Property::Y => "y",
            Property::XPercent => "xPercent",
            Property::YPercent => "yPercent",
            Property::Rotate => "rotate",
            Property::Scale => "scale",
            Property::Color => "color",
            Property::Display => "display",
            Property::PointerEvents => "pointerEvents",
            Property::Left => "left",
            Property::Top => "top",
            Property::StrokeDashoffset => "strokeDashoffset",
            Property::TransformOrigin => "transformOrigin",
        }
    }

    /// Computed value of an element that never had the property written
    ///
    /// `None` means the value depends on the style sheet and cannot be
    /// assumed (colors, display, offsets).
    pub fn initial_value(&self) -> Option<StyleValue> {
        match self {
            Property::Opacity | Property::Scale => Some(StyleValue::Number(1.0)),
            Property::X
            | Property::Y
            | Property::XPercent
            | Property::YPercent
            | Property::Rotate => Some(StyleValue::Number(0.0)),
            Property::Visibility => Some(StyleValue::keyword("inherit")),
            _ => None,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value held by a style property
#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue {
    Number(f32),
    Color(Color),
    Keyword(String),
}

impl StyleValue {
    pub fn keyword(value: impl Into<String>) -> Self {
        StyleValue::Keyword(value.into())
    }

    pub fn as_number(&self) -> Option<f32> {
        match self {
            StyleValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            StyleValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            StyleValue::Keyword(k) => Some(k),
            _ => None,
        }
    }
}

impl From<f32> for StyleValue {
    fn from(value: f32) -> Self {
        StyleValue::Number(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value as f32)
    }
}

impl From<Color> for StyleValue {
    fn from(value: Color) -> Self {
        StyleValue::Color(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Keyword(value.to_string())
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Number(n) => write!(f, "{}", n),
            StyleValue::Color(c) => write!(f, "{}", c),
            StyleValue::Keyword(k) => f.write_str(k),
        }
    }
}
