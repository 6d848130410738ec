//! Heading structure rules

use crate::helpers::require;
use axcheck_core::{ancestors, heading, EvaluationCode, Node, PropertyId, RuleId};
use axcheck_engine::property::properties;
use axcheck_engine::{any_ancestor, Condition, EngineConfig, RuleDefinition, RuleError, RuleInfo, Standard};

pub const HEADING_LEVEL_DESCENDS_WHEN_NESTED: RuleDefinition = RuleDefinition {
    info: RuleInfo {
        id: RuleId::HeadingLevelDescendsWhenNested,
        description: "A heading nested inside another heading must have a lower level",
        how_to_fix: "Raise the nested heading's level number above its enclosing heading's",
        standard: Standard::InfoAndRelationships,
        property_id: Some(PropertyId::HeadingLevel),
    },
    condition: descends_condition,
    evaluate: descends_evaluate,
};

fn is_heading() -> Condition {
    properties::heading_level().in_range(heading::LEVEL1, heading::LEVEL9)
}

fn descends_condition(_: &EngineConfig) -> Condition {
    is_heading().and(any_ancestor(is_heading()))
}

/// Compares against the nearest enclosing heading only.
fn descends_evaluate(node: &dyn Node, _: &EngineConfig) -> Result<EvaluationCode, RuleError> {
    let level = require(
        node.property(PropertyId::HeadingLevel).int(),
        PropertyId::HeadingLevel,
        node,
    )?;

    let enclosing = is_heading();
    let ancestor = ancestors(node)
        .find(|a| enclosing.matches(a.as_ref()))
        .ok_or_else(|| RuleError::missing_relative("heading ancestor", node))?;
    let ancestor_level = require(
        ancestor.property(PropertyId::HeadingLevel).int(),
        PropertyId::HeadingLevel,
        ancestor.as_ref(),
    )?;

    Ok(if ancestor_level < level {
        EvaluationCode::Pass
    } else {
        EvaluationCode::Error
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axcheck_core::{ControlType, ElementSpec, ElementTree};
    use axcheck_engine::Rule;
    use std::sync::Arc;

    fn heading_spec(level: i32) -> ElementSpec {
        ElementSpec::new(ControlType::Text)
            .with_property(PropertyId::HeadingLevel, heading::level(level).unwrap())
    }

    fn nested(outer: i32, inner: i32) -> ElementTree {
        let spec = heading_spec(outer)
            .with_child(ElementSpec::new(ControlType::Group).with_child(heading_spec(inner)));
        ElementTree::from_spec(&spec).unwrap()
    }

    fn innermost(tree: &ElementTree) -> axcheck_core::NodeRef {
        tree.root().children()[0].children()[0].clone()
    }

    #[test]
    fn test_nested_heading_levels() {
        let rule = Rule::new(&HEADING_LEVEL_DESCENDS_WHEN_NESTED, Arc::new(EngineConfig::default()));

        let tree = nested(1, 2);
        assert_eq!(rule.run(innermost(&tree).as_ref()), Some(Ok(EvaluationCode::Pass)));

        let tree = nested(2, 2);
        assert_eq!(rule.run(innermost(&tree).as_ref()), Some(Ok(EvaluationCode::Error)));

        let tree = nested(3, 1);
        assert_eq!(rule.run(innermost(&tree).as_ref()), Some(Ok(EvaluationCode::Error)));

        // The outer heading has no heading above it
        assert_eq!(rule.run(tree.root().as_ref()), None);
    }

    #[test]
    fn test_heading_none_is_not_a_heading() {
        let rule = Rule::new(&HEADING_LEVEL_DESCENDS_WHEN_NESTED, Arc::new(EngineConfig::default()));
        let spec = ElementSpec::new(ControlType::Group)
            .with_property(PropertyId::HeadingLevel, heading::NONE)
            .with_child(heading_spec(1));
        let tree = ElementTree::from_spec(&spec).unwrap();

        assert_eq!(rule.run(tree.root().children()[0].as_ref()), None);
    }
}
