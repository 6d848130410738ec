//! Typed property values and tri-state lookups

use serde::{Deserialize, Serialize};
use std::fmt;

/// Screen rectangle in integer pixels, stored as edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Create a rectangle from its edges
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from an origin and a size
    pub fn from_origin_size(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self::new(
            left,
            top,
            left.saturating_add(width),
            top.saturating_add(height),
        )
    }

    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    /// True when the rectangle has no area
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// True when every edge is zero, which providers report for "no rectangle"
    pub fn is_all_zeros(&self) -> bool {
        *self == Self::default()
    }

    /// Return a rectangle grown by `amount` on every side
    pub fn inflate(&self, amount: i32) -> Self {
        Self::new(
            self.left.saturating_sub(amount),
            self.top.saturating_sub(amount),
            self.right.saturating_add(amount),
            self.bottom.saturating_add(amount),
        )
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// A typed property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Int(i32),
    Double(f64),
    String(String),
    IntArray(Vec<i32>),
    DoubleArray(Vec<f64>),
    Rect(Rect),
}

impl PropertyValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Read a rectangle.
    ///
    /// A four element double array is interpreted the way platform providers
    /// report bounding rectangles: left, top, width, height.
    pub fn as_rect(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(*r),
            Self::DoubleArray(values) if values.len() == 4 => Some(Rect::from_origin_size(
                values[0].round() as i32,
                values[1].round() as i32,
                values[2].round() as i32,
                values[3].round() as i32,
            )),
            Self::IntArray(values) if values.len() == 4 => Some(Rect::from_origin_size(
                values[0], values[1], values[2], values[3],
            )),
            _ => None,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Rect> for PropertyValue {
    fn from(value: Rect) -> Self {
        Self::Rect(value)
    }
}

/// Result of looking up a property on a node.
///
/// A property that the provider reports with no value (`Null`) is distinct
/// from one the provider does not report at all (`Absent`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyLookup<'a> {
    Present(&'a PropertyValue),
    Null,
    Absent,
}

impl<'a> PropertyLookup<'a> {
    pub fn value(self) -> Option<&'a PropertyValue> {
        match self {
            Self::Present(v) => Some(v),
            Self::Null | Self::Absent => None,
        }
    }

    /// True when the provider reported the property, with or without a value
    pub fn exists(self) -> bool {
        !matches!(self, Self::Absent)
    }

    /// True when there is no usable value
    pub fn is_null_or_absent(self) -> bool {
        !matches!(self, Self::Present(_))
    }

    pub fn bool(self) -> TypedRead<bool> {
        self.read(PropertyValue::as_bool)
    }

    pub fn int(self) -> TypedRead<i32> {
        self.read(PropertyValue::as_int)
    }

    pub fn str(self) -> TypedRead<&'a str> {
        self.read(PropertyValue::as_str)
    }

    pub fn rect(self) -> TypedRead<Rect> {
        self.read(PropertyValue::as_rect)
    }

    fn read<T>(self, f: impl FnOnce(&'a PropertyValue) -> Option<T>) -> TypedRead<T> {
        match self {
            Self::Present(v) => f(v).map_or(TypedRead::WrongType, TypedRead::Value),
            Self::Null | Self::Absent => TypedRead::Absent,
        }
    }
}

/// A typed read of a property: the value, a value of another type, or nothing.
///
/// Null properties read as `Absent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypedRead<T> {
    Value(T),
    WrongType,
    Absent,
}

impl<T> TypedRead<T> {
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            Self::WrongType | Self::Absent => None,
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}
