//! Bounding rectangle rules

use crate::helpers::{has_area, on_screen, pattern_flag, require_rect};
use axcheck_core::{
    ControlType, EvaluationCode, Node, PatternPropertyId, PropertyId, RuleId, TypedRead,
};
use axcheck_engine::property::properties;
use axcheck_engine::{
    control_type_in, parent, Condition, EngineConfig, RuleDefinition, RuleError, RuleInfo,
    Standard,
};

pub const BOUNDING_RECTANGLE_NOT_NULL: RuleDefinition = RuleDefinition {
    info: RuleInfo {
        id: RuleId::BoundingRectangleNotNull,
        description: "An on-screen element must have a non-null BoundingRectangle property",
        how_to_fix: "Report the element's screen rectangle through the BoundingRectangle property",
        standard: Standard::ObjectInformation,
        property_id: Some(PropertyId::BoundingRectangle),
    },
    condition: not_null_condition,
    evaluate: not_null_evaluate,
};

fn not_null_condition(_: &EngineConfig) -> Condition {
    on_screen().and(properties::is_control_element().is_true())
}

fn not_null_evaluate(node: &dyn Node, _: &EngineConfig) -> Result<EvaluationCode, RuleError> {
    match node.property(PropertyId::BoundingRectangle).rect() {
        TypedRead::Value(_) => Ok(EvaluationCode::Pass),
        TypedRead::Absent => Ok(EvaluationCode::Error),
        TypedRead::WrongType => Err(RuleError::invalid_value(PropertyId::BoundingRectangle, node)),
    }
}

pub const BOUNDING_RECTANGLE_NOT_ALL_ZEROS: RuleDefinition = RuleDefinition {
    info: RuleInfo {
        id: RuleId::BoundingRectangleNotAllZeros,
        description: "An on-screen element must not have a BoundingRectangle of all zeros",
        how_to_fix: "Report the element's actual screen rectangle, or mark it offscreen",
        standard: Standard::ObjectInformation,
        property_id: Some(PropertyId::BoundingRectangle),
    },
    condition: not_all_zeros_condition,
    evaluate: not_all_zeros_evaluate,
};

fn not_all_zeros_condition(_: &EngineConfig) -> Condition {
    on_screen()
        .and(properties::is_control_element().is_true())
        .and(properties::bounding_rectangle().not_null())
}

fn not_all_zeros_evaluate(node: &dyn Node, _: &EngineConfig) -> Result<EvaluationCode, RuleError> {
    let rect = require_rect(node)?;
    Ok(if rect.is_all_zeros() {
        EvaluationCode::Error
    } else {
        EvaluationCode::Pass
    })
}

pub const BOUNDING_RECTANGLE_CONTAINED_IN_PARENT: RuleDefinition = RuleDefinition {
    info: RuleInfo {
        id: RuleId::BoundingRectangleContainedInParent,
        description: "An element's BoundingRectangle must be contained within its parent's",
        how_to_fix: "Keep the element inside its parent's bounds, or make the parent scrollable",
        standard: Standard::ObjectInformation,
        property_id: Some(PropertyId::BoundingRectangle),
    },
    condition: contained_condition,
    evaluate: contained_evaluate,
};

fn contained_condition(_: &EngineConfig) -> Condition {
    control_type_in(&[ControlType::Window, ControlType::ToolTip, ControlType::Menu])
        .negate()
        .and(has_area())
        .and(parent(has_area()))
}

/// Child rectangle inside the parent's, widened by the margin on every side.
///
/// A parent that scrolls horizontally (vertically) may hold children
/// outside its horizontal (vertical) extent.
fn contained_evaluate(node: &dyn Node, config: &EngineConfig) -> Result<EvaluationCode, RuleError> {
    let rect = require_rect(node)?;
    let parent = node
        .parent()
        .ok_or_else(|| RuleError::missing_relative("parent", node))?;
    let bounds = require_rect(parent.as_ref())?.inflate(config.containment_margin);

    let horizontal = pattern_flag(parent.as_ref(), PatternPropertyId::ScrollHorizontallyScrollable)
        || (bounds.left <= rect.left && rect.right <= bounds.right);
    let vertical = pattern_flag(parent.as_ref(), PatternPropertyId::ScrollVerticallyScrollable)
        || (bounds.top <= rect.top && rect.bottom <= bounds.bottom);

    Ok(if horizontal && vertical {
        EvaluationCode::Pass
    } else {
        EvaluationCode::Error
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axcheck_core::{ElementSpec, ElementTree, Rect};
    use axcheck_engine::Rule;
    use std::sync::Arc;

    fn rule(definition: &RuleDefinition) -> Rule {
        Rule::new(definition, Arc::new(EngineConfig::default()))
    }

    fn control(rect: Option<Rect>) -> ElementSpec {
        let spec = ElementSpec::new(ControlType::Button).with_property(PropertyId::IsControlElement, true);
        match rect {
            Some(rect) => spec.with_rect(rect),
            None => spec,
        }
    }

    #[test]
    fn test_not_null() {
        let rule = rule(&BOUNDING_RECTANGLE_NOT_NULL);

        let tree = ElementTree::from_spec(&control(Some(Rect::new(0, 0, 10, 10)))).unwrap();
        assert_eq!(rule.run(tree.root().as_ref()), Some(Ok(EvaluationCode::Pass)));

        let tree = ElementTree::from_spec(&control(None)).unwrap();
        assert_eq!(rule.run(tree.root().as_ref()), Some(Ok(EvaluationCode::Error)));

        let offscreen = control(None).with_property(PropertyId::IsOffscreen, true);
        let tree = ElementTree::from_spec(&offscreen).unwrap();
        assert_eq!(rule.run(tree.root().as_ref()), None);
    }

    #[test]
    fn test_not_all_zeros() {
        let rule = rule(&BOUNDING_RECTANGLE_NOT_ALL_ZEROS);

        let tree = ElementTree::from_spec(&control(Some(Rect::default()))).unwrap();
        assert_eq!(rule.run(tree.root().as_ref()), Some(Ok(EvaluationCode::Error)));

        let tree = ElementTree::from_spec(&control(Some(Rect::new(1, 1, 2, 2)))).unwrap();
        assert_eq!(rule.run(tree.root().as_ref()), Some(Ok(EvaluationCode::Pass)));

        let tree = ElementTree::from_spec(&control(None)).unwrap();
        assert_eq!(rule.run(tree.root().as_ref()), None);
        assert!(matches!(
            rule.evaluate(tree.root().as_ref()),
            Err(RuleError::MissingProperty { .. })
        ));
    }

    #[test]
    fn test_contained_requires_parent() {
        let rule = rule(&BOUNDING_RECTANGLE_CONTAINED_IN_PARENT);
        let tree = ElementTree::from_spec(&control(Some(Rect::new(0, 0, 10, 10)))).unwrap();
        let root = tree.root();

        assert!(!rule.applies_to(root.as_ref()));
        assert_eq!(
            rule.evaluate(root.as_ref()),
            Err(RuleError::MissingRelative {
                relation: "parent",
                node: root.id(),
            })
        );
    }
}
