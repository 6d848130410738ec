//! Name property rules

use crate::helpers::{contains_private_use, control_type_words, name_required, require_name};
use axcheck_core::{EvaluationCode, Node, PropertyId, RuleId};
use axcheck_engine::property::properties;
use axcheck_engine::{Condition, EngineConfig, RuleDefinition, RuleError, RuleInfo, Standard};
use tracing::debug;

const fn name_info(id: RuleId, description: &'static str, how_to_fix: &'static str) -> RuleInfo {
    RuleInfo {
        id,
        description,
        how_to_fix,
        standard: Standard::NameRoleValue,
        property_id: Some(PropertyId::Name),
    }
}

pub const NAME_NOT_NULL: RuleDefinition = RuleDefinition {
    info: name_info(
        RuleId::NameNotNull,
        "An interactive element must have a Name property",
        "Give the element an accessible name, for example from its visible label",
    ),
    condition: not_null_condition,
    evaluate: not_null_evaluate,
};

fn not_null_condition(_: &EngineConfig) -> Condition {
    name_required()
}

fn not_null_evaluate(node: &dyn Node, _: &EngineConfig) -> Result<EvaluationCode, RuleError> {
    Ok(if node.property(PropertyId::Name).str().is_value() {
        EvaluationCode::Pass
    } else {
        EvaluationCode::Error
    })
}

pub const NAME_NOT_EMPTY: RuleDefinition = RuleDefinition {
    info: name_info(
        RuleId::NameNotEmpty,
        "An interactive element's Name must not be an empty string",
        "Set the Name to a short description of the element's purpose",
    ),
    condition: not_empty_condition,
    evaluate: not_empty_evaluate,
};

fn not_empty_condition(_: &EngineConfig) -> Condition {
    name_required().and(properties::name().not_null())
}

fn not_empty_evaluate(node: &dyn Node, _: &EngineConfig) -> Result<EvaluationCode, RuleError> {
    let name = require_name(node)?;
    Ok(if name.is_empty() {
        EvaluationCode::Error
    } else {
        EvaluationCode::Pass
    })
}

pub const NAME_NOT_WHITE_SPACE: RuleDefinition = RuleDefinition {
    info: name_info(
        RuleId::NameNotWhiteSpace,
        "An interactive element's Name must not be only whitespace",
        "Replace the whitespace Name with text that describes the element",
    ),
    condition: not_white_space_condition,
    evaluate: not_white_space_evaluate,
};

fn not_white_space_condition(_: &EngineConfig) -> Condition {
    name_required().and(properties::name().not_empty())
}

fn not_white_space_evaluate(node: &dyn Node, _: &EngineConfig) -> Result<EvaluationCode, RuleError> {
    let name = require_name(node)?;
    Ok(if name.trim().is_empty() {
        EvaluationCode::Error
    } else {
        EvaluationCode::Pass
    })
}

pub const NAME_REASONABLE_LENGTH: RuleDefinition = RuleDefinition {
    info: name_info(
        RuleId::NameReasonableLength,
        "An element's Name should be of reasonable length",
        "Shorten the Name; move longer descriptions to HelpText or FullDescription",
    ),
    condition: reasonable_length_condition,
    evaluate: reasonable_length_evaluate,
};

fn reasonable_length_condition(_: &EngineConfig) -> Condition {
    properties::name().not_empty()
}

fn reasonable_length_evaluate(node: &dyn Node, config: &EngineConfig) -> Result<EvaluationCode, RuleError> {
    let length = require_name(node)?.chars().count();
    if length > config.max_name_length {
        debug!(node = %node.id(), length, limit = config.max_name_length, "Name too long");
        return Ok(EvaluationCode::Error);
    }
    Ok(EvaluationCode::Pass)
}

pub const NAME_EXCLUDES_CONTROL_TYPE: RuleDefinition = RuleDefinition {
    info: name_info(
        RuleId::NameExcludesControlType,
        "An element's Name should not repeat its control type",
        "Remove the control type from the Name; assistive technology announces it already",
    ),
    condition: excludes_control_type_condition,
    evaluate: excludes_control_type_evaluate,
};

fn excludes_control_type_condition(_: &EngineConfig) -> Condition {
    properties::name()
        .not_white_space()
        .and(Condition::custom("ControlType.HasSpokenName", |node| {
            control_type_words(node.control_type()).is_some()
        }))
}

fn excludes_control_type_evaluate(node: &dyn Node, _: &EngineConfig) -> Result<EvaluationCode, RuleError> {
    let pattern = control_type_words(node.control_type())
        .ok_or_else(|| RuleError::invalid_value(PropertyId::ControlType, node))?;
    require_name(node)?;

    Ok(if properties::name().matches(pattern.clone()).matches(node) {
        EvaluationCode::Warning
    } else {
        EvaluationCode::Pass
    })
}

pub const NAME_EXCLUDES_PRIVATE_UNICODE_CHARACTERS: RuleDefinition = RuleDefinition {
    info: name_info(
        RuleId::NameExcludesPrivateUnicodeCharacters,
        "An element's Name must not contain private use Unicode characters",
        "Replace icon-font glyphs in the Name with words",
    ),
    condition: excludes_private_unicode_condition,
    evaluate: excludes_private_unicode_evaluate,
};

fn excludes_private_unicode_condition(_: &EngineConfig) -> Condition {
    properties::name().not_empty()
}

fn excludes_private_unicode_evaluate(node: &dyn Node, _: &EngineConfig) -> Result<EvaluationCode, RuleError> {
    Ok(if contains_private_use(require_name(node)?) {
        EvaluationCode::Error
    } else {
        EvaluationCode::Pass
    })
}
