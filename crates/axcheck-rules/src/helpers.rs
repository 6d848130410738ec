//! Condition groups and property readers shared by the rules

use axcheck_core::{ControlType, Node, PatternPropertyId, PropertyId, Rect, TypedRead};
use axcheck_engine::property::properties;
use axcheck_engine::{control_type_in, Condition, RuleError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Control types that must expose a name
pub const NAME_REQUIRED_TYPES: &[ControlType] = &[
    ControlType::Button,
    ControlType::Calendar,
    ControlType::CheckBox,
    ControlType::ComboBox,
    ControlType::DataGrid,
    ControlType::Edit,
    ControlType::Hyperlink,
    ControlType::List,
    ControlType::ListItem,
    ControlType::MenuItem,
    ControlType::RadioButton,
    ControlType::Slider,
    ControlType::Spinner,
    ControlType::SplitButton,
    ControlType::Tab,
    ControlType::TabItem,
    ControlType::Tree,
    ControlType::TreeItem,
];

/// Interactive control types expected to take keyboard focus
pub const FOCUSABLE_TYPES: &[ControlType] = &[
    ControlType::Button,
    ControlType::CheckBox,
    ControlType::ComboBox,
    ControlType::Edit,
    ControlType::Hyperlink,
    ControlType::RadioButton,
    ControlType::Slider,
    ControlType::Spinner,
    ControlType::SplitButton,
];

/// Leaf-like control types whose content view must stay empty
pub const CHILDLESS_TYPES: &[ControlType] = &[
    ControlType::Image,
    ControlType::ProgressBar,
    ControlType::ScrollBar,
    ControlType::Separator,
    ControlType::Thumb,
];

/// Private use areas of the basic and supplementary planes
static PRIVATE_USE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x{E000}-\x{F8FF}\x{F0000}-\x{FFFFD}\x{100000}-\x{10FFFD}]")
        .expect("private use pattern is valid")
});

/// Node is not reported offscreen
pub fn on_screen() -> Condition {
    properties::is_offscreen().is_true().negate()
}

/// Node is not explicitly disabled
pub fn not_disabled() -> Condition {
    properties::is_enabled().is_false().negate()
}

/// On-screen node of a type that must be named
pub fn name_required() -> Condition {
    control_type_in(NAME_REQUIRED_TYPES).and(on_screen())
}

/// On-screen node with a usable bounding rectangle
pub fn has_area() -> Condition {
    on_screen().and(properties::bounding_rectangle().not_all_zeros())
}

pub fn contains_private_use(text: &str) -> bool {
    PRIVATE_USE.is_match(text)
}

/// Case-insensitive whole-word pattern for each control type with spoken
/// words. Spaces inside a spoken word match any run of whitespace.
static CONTROL_TYPE_WORDS: Lazy<HashMap<ControlType, Regex>> = Lazy::new(|| {
    ControlType::ALL
        .iter()
        .filter(|t| !t.spoken_words().is_empty())
        .map(|&t| {
            let alternatives: Vec<String> = t
                .spoken_words()
                .iter()
                .map(|word| regex::escape(word).replace(' ', r"\s+"))
                .collect();
            let pattern = format!(r"(?i)\b(?:{})\b", alternatives.join("|"));
            (t, Regex::new(&pattern).expect("escaped words form a valid pattern"))
        })
        .collect()
});

/// Pattern matching a word announced for `control_type`, if it has any
pub fn control_type_words(control_type: ControlType) -> Option<&'static Regex> {
    CONTROL_TYPE_WORDS.get(&control_type)
}

/// Read a property the rule's condition guarantees
pub fn require<T>(read: TypedRead<T>, property: PropertyId, node: &dyn Node) -> Result<T, RuleError> {
    match read {
        TypedRead::Value(value) => Ok(value),
        TypedRead::WrongType => Err(RuleError::invalid_value(property, node)),
        TypedRead::Absent => Err(RuleError::missing_property(property, node)),
    }
}

pub fn require_name(node: &dyn Node) -> Result<&str, RuleError> {
    require(node.property(PropertyId::Name).str(), PropertyId::Name, node)
}

pub fn require_rect(node: &dyn Node) -> Result<Rect, RuleError> {
    require(
        node.property(PropertyId::BoundingRectangle).rect(),
        PropertyId::BoundingRectangle,
        node,
    )
}

/// Boolean pattern property, false unless reported true
pub fn pattern_flag(node: &dyn Node, id: PatternPropertyId) -> bool {
    node.pattern_property(id).bool().ok().unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_type_words() {
        let button = control_type_words(ControlType::Button).unwrap();
        assert!(button.is_match("Save button"));
        assert!(button.is_match("OK BUTTON"));
        assert!(!button.is_match("Buttonhole"));

        let check_box = control_type_words(ControlType::CheckBox).unwrap();
        assert!(check_box.is_match("Remember me check  box"));
        assert!(check_box.is_match("checkbox"));
        assert!(!check_box.is_match("check"));

        assert!(control_type_words(ControlType::Custom).is_none());
    }

    #[test]
    fn test_private_use_detection() {
        assert!(contains_private_use("Save \u{E700}"));
        assert!(contains_private_use("\u{F0001}"));
        assert!(!contains_private_use("Save"));
        assert!(!contains_private_use("Größe ✓"));
    }
}
