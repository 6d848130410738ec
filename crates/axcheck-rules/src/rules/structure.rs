//! Control pattern and tree structure rules

use crate::helpers::{require_name, CHILDLESS_TYPES};
use axcheck_core::{ControlType, EvaluationCode, Node, PatternId, PropertyId, RuleId};
use axcheck_engine::property::properties;
use axcheck_engine::{
    any_child, control_type_in, control_type_is, parent, Condition, EngineConfig, RuleDefinition,
    RuleError, RuleInfo, Standard,
};

pub const HYPERLINK_SUPPORTS_INVOKE_PATTERN: RuleDefinition = RuleDefinition {
    info: RuleInfo {
        id: RuleId::HyperlinkSupportsInvokePattern,
        description: "A hyperlink must support the Invoke pattern",
        how_to_fix: "Implement the Invoke pattern so the link can be activated programmatically",
        standard: Standard::NameRoleValue,
        property_id: Some(PropertyId::IsInvokePatternAvailable),
    },
    condition: hyperlink_condition,
    evaluate: hyperlink_evaluate,
};

fn hyperlink_condition(_: &EngineConfig) -> Condition {
    control_type_is(ControlType::Hyperlink)
}

fn hyperlink_evaluate(node: &dyn Node, _: &EngineConfig) -> Result<EvaluationCode, RuleError> {
    Ok(if node.supports_pattern(PatternId::Invoke) {
        EvaluationCode::Pass
    } else {
        EvaluationCode::Error
    })
}

pub const COMBO_BOX_SHOULD_NOT_SUPPORT_SCROLL_PATTERN: RuleDefinition = RuleDefinition {
    info: RuleInfo {
        id: RuleId::ComboBoxShouldNotSupportScrollPattern,
        description: "A combo box should not support the Scroll pattern",
        how_to_fix: "Expose scrolling on the combo box's list, not on the combo box itself",
        standard: Standard::NameRoleValue,
        property_id: Some(PropertyId::IsScrollPatternAvailable),
    },
    condition: combo_box_condition,
    evaluate: combo_box_evaluate,
};

fn combo_box_condition(_: &EngineConfig) -> Condition {
    control_type_is(ControlType::ComboBox)
}

fn combo_box_evaluate(node: &dyn Node, _: &EngineConfig) -> Result<EvaluationCode, RuleError> {
    Ok(if node.supports_pattern(PatternId::Scroll) {
        EvaluationCode::Warning
    } else {
        EvaluationCode::Pass
    })
}

pub const CHILDREN_NOT_ALLOWED_IN_CONTENT_VIEW: RuleDefinition = RuleDefinition {
    info: RuleInfo {
        id: RuleId::ChildrenNotAllowedInContentView,
        description: "Elements of this control type must not have children in the content view",
        how_to_fix: "Remove the children from the content view or change the control type",
        standard: Standard::InfoAndRelationships,
        property_id: None,
    },
    condition: childless_condition,
    evaluate: childless_evaluate,
};

fn content_element() -> Condition {
    properties::is_content_element().is_true()
}

fn childless_condition(_: &EngineConfig) -> Condition {
    control_type_in(CHILDLESS_TYPES).and(content_element())
}

fn childless_evaluate(node: &dyn Node, _: &EngineConfig) -> Result<EvaluationCode, RuleError> {
    Ok(if any_child(content_element()).matches(node) {
        EvaluationCode::Error
    } else {
        EvaluationCode::Pass
    })
}

pub const PARENT_CHILD_SHOULD_NOT_HAVE_SAME_NAME_AND_TYPE: RuleDefinition = RuleDefinition {
    info: RuleInfo {
        id: RuleId::ParentChildShouldNotHaveSameNameAndType,
        description: "An element should not have the same Name and control type as its parent",
        how_to_fix: "Hide the redundant element from the control view, or give it a distinct Name",
        standard: Standard::InfoAndRelationships,
        property_id: Some(PropertyId::Name),
    },
    condition: same_as_parent_condition,
    evaluate: same_as_parent_evaluate,
};

fn same_as_parent_condition(_: &EngineConfig) -> Condition {
    properties::name()
        .not_white_space()
        .and(parent(properties::name().not_white_space()))
}

fn same_as_parent_evaluate(node: &dyn Node, _: &EngineConfig) -> Result<EvaluationCode, RuleError> {
    let name = require_name(node)?;
    let parent = node
        .parent()
        .ok_or_else(|| RuleError::missing_relative("parent", node))?;
    let parent_name = require_name(parent.as_ref())?;

    Ok(if name == parent_name && node.control_type() == parent.control_type() {
        EvaluationCode::Error
    } else {
        EvaluationCode::Pass
    })
}
