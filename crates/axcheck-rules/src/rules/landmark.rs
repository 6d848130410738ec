//! Landmark rules

use axcheck_core::{landmark, ControlType, EvaluationCode, Node, PropertyId, RuleId};
use axcheck_engine::property::properties;
use axcheck_engine::{
    any_ancestor_until, control_type_is, parent, Condition, CountExpression,
    EngineConfig, RuleDefinition, RuleError, RuleInfo, Standard,
};
use tracing::warn;

/// Any landmark, built-in or custom
pub fn is_landmark() -> Condition {
    properties::landmark_type().exists()
}

pub fn is_main_landmark() -> Condition {
    properties::landmark_type().is(landmark::MAIN)
}

/// Banner landmarks are custom landmarks with a localized type of "banner"
pub fn is_banner_landmark() -> Condition {
    properties::landmark_type()
        .is(landmark::CUSTOM)
        .and(properties::localized_landmark_type().is_ignore_case("banner"))
}

pub const LANDMARK_ONE_MAIN: RuleDefinition = RuleDefinition {
    info: RuleInfo {
        id: RuleId::LandmarkOneMain,
        description: "A window should contain at most one main landmark",
        how_to_fix: "Mark only the primary content region as the main landmark",
        standard: Standard::InfoAndRelationships,
        property_id: Some(PropertyId::LandmarkType),
    },
    condition: one_main_condition,
    evaluate: one_main_evaluate,
};

fn main_landmark_count(config: &EngineConfig) -> CountExpression {
    match CountExpression::descendants_bounded(is_main_landmark(), config.descendant_count_limit) {
        Ok(expression) => expression,
        Err(e) => {
            warn!(error = %e, "Invalid descendant count limit; counting without a bound");
            CountExpression::descendants(is_main_landmark())
        }
    }
}

/// Top-level node with a main landmark among its first
/// `descendant_count_limit` descendants
fn one_main_condition(config: &EngineConfig) -> Condition {
    parent(Condition::True)
        .negate()
        .and(main_landmark_count(config).at_least(1))
}

/// Two matches settle the result even when the walk stopped early; fewer
/// than that from an incomplete walk cannot be trusted.
fn one_main_evaluate(node: &dyn Node, config: &EngineConfig) -> Result<EvaluationCode, RuleError> {
    Ok(match main_landmark_count(config).count_checked(node) {
        Ok(0) => EvaluationCode::RuleExecutionError,
        Ok(1) => EvaluationCode::Pass,
        Ok(_) => EvaluationCode::Error,
        Err(exceeded) if exceeded.matched > 1 => EvaluationCode::Error,
        Err(exceeded) => {
            warn!(node = %node.id(), %exceeded, "Main landmark count incomplete");
            EvaluationCode::RuleExecutionError
        }
    })
}

pub const LANDMARK_BANNER_IS_TOP_LEVEL: RuleDefinition = RuleDefinition {
    info: RuleInfo {
        id: RuleId::LandmarkBannerIsTopLevel,
        description: "A banner landmark must not be nested inside another landmark",
        how_to_fix: "Move the banner out of the enclosing landmark",
        standard: Standard::InfoAndRelationships,
        property_id: Some(PropertyId::LocalizedLandmarkType),
    },
    condition: banner_condition,
    evaluate: banner_evaluate,
};

fn banner_condition(_: &EngineConfig) -> Condition {
    is_banner_landmark()
}

/// Looks for an enclosing landmark up to the hosting window
fn banner_evaluate(node: &dyn Node, _: &EngineConfig) -> Result<EvaluationCode, RuleError> {
    let nested = any_ancestor_until(is_landmark(), control_type_is(ControlType::Window));

    Ok(if nested.matches(node) {
        EvaluationCode::Error
    } else {
        EvaluationCode::Pass
    })
}
