//! Keyboard focus rules

use crate::helpers::{not_disabled, on_screen, require, require_name, FOCUSABLE_TYPES};
use axcheck_core::{EvaluationCode, Node, PropertyId, RuleId};
use axcheck_engine::property::properties;
use axcheck_engine::{
    control_type_in, parent, sibling_count_including_self, Condition, EngineConfig,
    RuleDefinition, RuleError, RuleInfo, Standard,
};
use tracing::debug;

pub const IS_KEYBOARD_FOCUSABLE_SHOULD_BE_TRUE: RuleDefinition = RuleDefinition {
    info: RuleInfo {
        id: RuleId::IsKeyboardFocusableShouldBeTrue,
        description: "An enabled, on-screen interactive element should be keyboard focusable",
        how_to_fix: "Make the element reachable with the keyboard and report IsKeyboardFocusable as true",
        standard: Standard::Keyboard,
        property_id: Some(PropertyId::IsKeyboardFocusable),
    },
    condition: focusable_condition,
    evaluate: focusable_evaluate,
};

fn focusable_condition(_: &EngineConfig) -> Condition {
    control_type_in(FOCUSABLE_TYPES)
        .and(on_screen())
        .and(not_disabled())
        .and(properties::is_keyboard_focusable().exists())
}

fn focusable_evaluate(node: &dyn Node, _: &EngineConfig) -> Result<EvaluationCode, RuleError> {
    let focusable = require(
        node.property(PropertyId::IsKeyboardFocusable).bool(),
        PropertyId::IsKeyboardFocusable,
        node,
    )?;

    Ok(if focusable {
        EvaluationCode::Pass
    } else {
        EvaluationCode::Error
    })
}

pub const SIBLING_UNIQUE_AND_FOCUSABLE: RuleDefinition = RuleDefinition {
    info: RuleInfo {
        id: RuleId::SiblingUniqueAndFocusable,
        description: "Focusable siblings must not share the same Name and LocalizedControlType",
        how_to_fix: "Give each focusable sibling a distinct Name",
        standard: Standard::NameRoleValue,
        property_id: Some(PropertyId::Name),
    },
    condition: sibling_unique_condition,
    evaluate: sibling_unique_evaluate,
};

fn sibling_unique_condition(_: &EngineConfig) -> Condition {
    properties::is_keyboard_focusable()
        .is_true()
        .and(properties::name().not_white_space())
        .and(properties::localized_control_type().not_white_space())
        .and(parent(Condition::True))
}

/// Counts focusable children of the parent, this node included, that share
/// its name and localized control type.
///
/// A zero count means the parent does not list this node among its children
/// and there is nothing to compare against.
fn sibling_unique_evaluate(node: &dyn Node, _: &EngineConfig) -> Result<EvaluationCode, RuleError> {
    let name = require_name(node)?;
    let localized = require(
        node.property(PropertyId::LocalizedControlType).str(),
        PropertyId::LocalizedControlType,
        node,
    )?;

    let same = properties::is_keyboard_focusable()
        .is_true()
        .and(properties::name().is(name))
        .and(properties::localized_control_type().is(localized));
    let count = sibling_count_including_self(same).count(node);

    match count {
        0 => {
            debug!(node = %node.id(), "Node missing from its parent's children");
            Ok(EvaluationCode::RuleExecutionError)
        }
        1 => Ok(EvaluationCode::Pass),
        _ => Ok(EvaluationCode::Error),
    }
}
