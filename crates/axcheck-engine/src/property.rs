//! Atomic property predicates
//!
//! Predicates come in families keyed by the type of the property they read:
//! boolean, string, integer and rectangle properties, boolean pattern
//! properties, and the node's control type. Each family has a small builder
//! that produces a [`Condition`]:
//!
//! ```
//! use axcheck_engine::property::{boolean, string};
//! use axcheck_core::PropertyId;
//!
//! let named_and_focusable = string(PropertyId::Name)
//!     .not_white_space()
//!     .and(boolean(PropertyId::IsKeyboardFocusable).is_true());
//! ```
//!
//! A property that is absent, null or of an unexpected type never satisfies
//! a positive check.

use crate::condition::Condition;
use axcheck_core::{ControlType, Node, PatternPropertyId, PropertyId, PropertyLookup, TypedRead};
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// An atomic test of one node's own data
#[derive(Debug, Clone)]
pub enum Predicate {
    Bool {
        property: PropertyId,
        check: BoolCheck,
    },
    PatternBool {
        property: PatternPropertyId,
        check: BoolCheck,
    },
    String {
        property: PropertyId,
        check: StringCheck,
    },
    Int {
        property: PropertyId,
        check: IntCheck,
    },
    Rect {
        property: PropertyId,
        check: RectCheck,
    },
    ControlType(Vec<ControlType>),
    Custom(CustomPredicate),
}

impl Predicate {
    pub fn matches(&self, node: &dyn Node) -> bool {
        match self {
            Self::Bool { property, check } => check.matches(node.property(*property)),
            Self::PatternBool { property, check } => {
                check.matches(node.pattern_property(*property))
            }
            Self::String { property, check } => check.matches(node.property(*property)),
            Self::Int { property, check } => check.matches(node.property(*property)),
            Self::Rect { property, check } => check.matches(node.property(*property)),
            Self::ControlType(types) => types.contains(&node.control_type()),
            Self::Custom(custom) => (custom.f)(node),
        }
    }

    /// Predicate backed by a function
    pub fn custom<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&dyn Node) -> bool + Send + Sync + 'static,
    {
        Self::Custom(CustomPredicate {
            name: name.into(),
            f: Arc::new(f),
        })
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool { property, check } => check.describe(f, property),
            Self::PatternBool { property, check } => check.describe(f, property),
            Self::String { property, check } => check.describe(f, property),
            Self::Int { property, check } => check.describe(f, property),
            Self::Rect { property, check } => write!(f, "{}.{:?}", property, check),
            Self::ControlType(types) => match types.as_slice() {
                [single] => write!(f, "ControlType == {}", single),
                many => {
                    let names: Vec<String> = many.iter().map(ToString::to_string).collect();
                    write!(f, "ControlType in [{}]", names.join(", "))
                }
            },
            Self::Custom(custom) => f.write_str(&custom.name),
        }
    }
}

/// Named predicate function
#[derive(Clone)]
pub struct CustomPredicate {
    name: String,
    f: Arc<dyn Fn(&dyn Node) -> bool + Send + Sync>,
}

impl CustomPredicate {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for CustomPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomPredicate")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Checks on a boolean property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolCheck {
    /// Present with a boolean value
    Exists,
    IsTrue,
    IsFalse,
    /// Absent, null, or not a boolean
    NotSet,
}

impl BoolCheck {
    fn matches(&self, lookup: PropertyLookup<'_>) -> bool {
        let value = lookup.bool();
        match self {
            Self::Exists => value.is_value(),
            Self::IsTrue => value == TypedRead::Value(true),
            Self::IsFalse => value == TypedRead::Value(false),
            Self::NotSet => !value.is_value(),
        }
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>, property: &dyn fmt::Display) -> fmt::Result {
        match self {
            Self::Exists => write!(f, "{}.Exists", property),
            Self::IsTrue => write!(f, "{} == true", property),
            Self::IsFalse => write!(f, "{} == false", property),
            Self::NotSet => write!(f, "{}.NotSet", property),
        }
    }
}

/// Checks on a string property
#[derive(Debug, Clone)]
pub enum StringCheck {
    Is(String),
    IsIgnoreCase(String),
    /// Present with a string value, possibly empty
    NotNull,
    /// Absent, null, or not a string
    Null,
    /// Present and empty
    Empty,
    /// Present and not empty
    NotEmpty,
    /// Present and containing at least one non-whitespace character
    NotWhiteSpace,
    /// Present, not empty, and only whitespace
    WhiteSpace,
    /// Present with at most this many characters
    MaxLength(usize),
    /// Present with more than this many characters
    LongerThan(usize),
    /// Present and containing a match for the expression
    Matches(Regex),
}

impl StringCheck {
    fn matches(&self, lookup: PropertyLookup<'_>) -> bool {
        let value = match lookup.str() {
            TypedRead::Value(s) => s,
            TypedRead::WrongType | TypedRead::Absent => return matches!(self, Self::Null),
        };

        match self {
            Self::Is(expected) => value == expected,
            Self::IsIgnoreCase(expected) => value.to_lowercase() == expected.to_lowercase(),
            Self::NotNull => true,
            Self::Null => false,
            Self::Empty => value.is_empty(),
            Self::NotEmpty => !value.is_empty(),
            Self::NotWhiteSpace => value.chars().any(|c| !c.is_whitespace()),
            Self::WhiteSpace => !value.is_empty() && value.chars().all(char::is_whitespace),
            Self::MaxLength(max) => value.chars().count() <= *max,
            Self::LongerThan(min) => value.chars().count() > *min,
            Self::Matches(regex) => regex.is_match(value),
        }
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>, property: &dyn fmt::Display) -> fmt::Result {
        match self {
            Self::Is(expected) => write!(f, "{} == {:?}", property, expected),
            Self::IsIgnoreCase(expected) => write!(f, "{} ~= {:?}", property, expected),
            Self::NotNull => write!(f, "{}.NotNull", property),
            Self::Null => write!(f, "{}.Null", property),
            Self::Empty => write!(f, "{}.Empty", property),
            Self::NotEmpty => write!(f, "{}.NotEmpty", property),
            Self::NotWhiteSpace => write!(f, "{}.NotWhiteSpace", property),
            Self::WhiteSpace => write!(f, "{}.WhiteSpace", property),
            Self::MaxLength(max) => write!(f, "{}.Length <= {}", property, max),
            Self::LongerThan(min) => write!(f, "{}.Length > {}", property, min),
            Self::Matches(regex) => write!(f, "{} =~ /{}/", property, regex.as_str()),
        }
    }
}

/// Checks on an integer or enumeration property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntCheck {
    Exists,
    Is(i32),
    AtLeast(i32),
    AtMost(i32),
    /// Closed interval
    InRange(i32, i32),
}

impl IntCheck {
    fn matches(&self, lookup: PropertyLookup<'_>) -> bool {
        let Some(value) = lookup.int().ok() else {
            return false;
        };

        match self {
            Self::Exists => true,
            Self::Is(expected) => value == *expected,
            Self::AtLeast(min) => value >= *min,
            Self::AtMost(max) => value <= *max,
            Self::InRange(min, max) => (*min..=*max).contains(&value),
        }
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>, property: &dyn fmt::Display) -> fmt::Result {
        match self {
            Self::Exists => write!(f, "{}.Exists", property),
            Self::Is(expected) => write!(f, "{} == {}", property, expected),
            Self::AtLeast(min) => write!(f, "{} >= {}", property, min),
            Self::AtMost(max) => write!(f, "{} <= {}", property, max),
            Self::InRange(min, max) => write!(f, "{} in [{}, {}]", property, min, max),
        }
    }
}

/// Checks on a rectangle property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectCheck {
    /// Present and readable as a rectangle
    NotNull,
    /// Present, not all zeros
    NotAllZeros,
    /// Present with positive width and height
    NotEmpty,
}

impl RectCheck {
    fn matches(&self, lookup: PropertyLookup<'_>) -> bool {
        let Some(rect) = lookup.rect().ok() else {
            return false;
        };

        match self {
            Self::NotNull => true,
            Self::NotAllZeros => !rect.is_all_zeros(),
            Self::NotEmpty => !rect.is_empty(),
        }
    }
}

/// Builder for boolean property checks
#[derive(Debug, Clone, Copy)]
pub struct BoolProperty(PropertyId);

impl BoolProperty {
    pub fn exists(self) -> Condition {
        self.check(BoolCheck::Exists)
    }

    pub fn is_true(self) -> Condition {
        self.check(BoolCheck::IsTrue)
    }

    pub fn is_false(self) -> Condition {
        self.check(BoolCheck::IsFalse)
    }

    pub fn not_set(self) -> Condition {
        self.check(BoolCheck::NotSet)
    }

    fn check(self, check: BoolCheck) -> Condition {
        Condition::Atomic(Predicate::Bool {
            property: self.0,
            check,
        })
    }
}

/// Builder for boolean pattern property checks
#[derive(Debug, Clone, Copy)]
pub struct PatternBoolProperty(PatternPropertyId);

impl PatternBoolProperty {
    pub fn exists(self) -> Condition {
        self.check(BoolCheck::Exists)
    }

    pub fn is_true(self) -> Condition {
        self.check(BoolCheck::IsTrue)
    }

    pub fn is_false(self) -> Condition {
        self.check(BoolCheck::IsFalse)
    }

    fn check(self, check: BoolCheck) -> Condition {
        Condition::Atomic(Predicate::PatternBool {
            property: self.0,
            check,
        })
    }
}

/// Builder for string property checks
#[derive(Debug, Clone, Copy)]
pub struct StringProperty(PropertyId);

impl StringProperty {
    pub fn is(self, value: impl Into<String>) -> Condition {
        self.check(StringCheck::Is(value.into()))
    }

    pub fn is_ignore_case(self, value: impl Into<String>) -> Condition {
        self.check(StringCheck::IsIgnoreCase(value.into()))
    }

    pub fn not_null(self) -> Condition {
        self.check(StringCheck::NotNull)
    }

    pub fn null(self) -> Condition {
        self.check(StringCheck::Null)
    }

    pub fn empty(self) -> Condition {
        self.check(StringCheck::Empty)
    }

    pub fn not_empty(self) -> Condition {
        self.check(StringCheck::NotEmpty)
    }

    pub fn not_white_space(self) -> Condition {
        self.check(StringCheck::NotWhiteSpace)
    }

    pub fn white_space(self) -> Condition {
        self.check(StringCheck::WhiteSpace)
    }

    pub fn max_length(self, max: usize) -> Condition {
        self.check(StringCheck::MaxLength(max))
    }

    pub fn longer_than(self, min: usize) -> Condition {
        self.check(StringCheck::LongerThan(min))
    }

    /// Value contains a match for `regex`
    pub fn matches(self, regex: Regex) -> Condition {
        self.check(StringCheck::Matches(regex))
    }

    fn check(self, check: StringCheck) -> Condition {
        Condition::Atomic(Predicate::String {
            property: self.0,
            check,
        })
    }
}

/// Builder for integer property checks
#[derive(Debug, Clone, Copy)]
pub struct IntProperty(PropertyId);

impl IntProperty {
    pub fn exists(self) -> Condition {
        self.check(IntCheck::Exists)
    }

    pub fn is(self, value: i32) -> Condition {
        self.check(IntCheck::Is(value))
    }

    pub fn at_least(self, value: i32) -> Condition {
        self.check(IntCheck::AtLeast(value))
    }

    pub fn at_most(self, value: i32) -> Condition {
        self.check(IntCheck::AtMost(value))
    }

    /// Value within the closed interval `[min, max]`
    pub fn in_range(self, min: i32, max: i32) -> Condition {
        self.check(IntCheck::InRange(min, max))
    }

    fn check(self, check: IntCheck) -> Condition {
        Condition::Atomic(Predicate::Int {
            property: self.0,
            check,
        })
    }
}

/// Builder for rectangle property checks
#[derive(Debug, Clone, Copy)]
pub struct RectProperty(PropertyId);

impl RectProperty {
    pub fn not_null(self) -> Condition {
        self.check(RectCheck::NotNull)
    }

    pub fn not_all_zeros(self) -> Condition {
        self.check(RectCheck::NotAllZeros)
    }

    pub fn not_empty(self) -> Condition {
        self.check(RectCheck::NotEmpty)
    }

    fn check(self, check: RectCheck) -> Condition {
        Condition::Atomic(Predicate::Rect {
            property: self.0,
            check,
        })
    }
}

pub fn boolean(id: PropertyId) -> BoolProperty {
    BoolProperty(id)
}

pub fn pattern_boolean(id: PatternPropertyId) -> PatternBoolProperty {
    PatternBoolProperty(id)
}

pub fn string(id: PropertyId) -> StringProperty {
    StringProperty(id)
}

pub fn integer(id: PropertyId) -> IntProperty {
    IntProperty(id)
}

pub fn rect(id: PropertyId) -> RectProperty {
    RectProperty(id)
}

/// Control type equals `control_type`
pub fn control_type_is(control_type: ControlType) -> Condition {
    Condition::Atomic(Predicate::ControlType(vec![control_type]))
}

/// Control type is one of `control_types`
pub fn control_type_in(control_types: &[ControlType]) -> Condition {
    Condition::Atomic(Predicate::ControlType(control_types.to_vec()))
}

/// Shortcuts for frequently tested properties
pub mod properties {
    use super::*;

    pub fn name() -> StringProperty {
        string(PropertyId::Name)
    }

    pub fn localized_control_type() -> StringProperty {
        string(PropertyId::LocalizedControlType)
    }

    pub fn localized_landmark_type() -> StringProperty {
        string(PropertyId::LocalizedLandmarkType)
    }

    pub fn is_keyboard_focusable() -> BoolProperty {
        boolean(PropertyId::IsKeyboardFocusable)
    }

    pub fn is_offscreen() -> BoolProperty {
        boolean(PropertyId::IsOffscreen)
    }

    pub fn is_enabled() -> BoolProperty {
        boolean(PropertyId::IsEnabled)
    }

    pub fn is_content_element() -> BoolProperty {
        boolean(PropertyId::IsContentElement)
    }

    pub fn is_control_element() -> BoolProperty {
        boolean(PropertyId::IsControlElement)
    }

    pub fn heading_level() -> IntProperty {
        integer(PropertyId::HeadingLevel)
    }

    pub fn landmark_type() -> IntProperty {
        integer(PropertyId::LandmarkType)
    }

    pub fn bounding_rectangle() -> RectProperty {
        rect(PropertyId::BoundingRectangle)
    }
}
