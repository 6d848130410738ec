//! axcheck Rules
//!
//! The standard accessibility rule library. Every rule is a
//! [`RuleDefinition`] built only from the engine's public API:
//! - Bounding rectangle checks (null, all zeros, containment in the parent)
//! - Name checks (null, empty, whitespace, length, control type, private use characters)
//! - Keyboard focus and sibling uniqueness
//! - Heading nesting and landmark structure
//! - Control pattern and parent/child structure checks
//!
//! [`standard_registry`] builds all of them against one configuration.

pub mod helpers;
pub mod rules;

use axcheck_core::Result;
use axcheck_engine::{EngineConfig, RuleDefinition, RuleRegistry};

use rules::*;

static STANDARD_RULES: [RuleDefinition; 18] = [
    BOUNDING_RECTANGLE_NOT_NULL,
    BOUNDING_RECTANGLE_NOT_ALL_ZEROS,
    BOUNDING_RECTANGLE_CONTAINED_IN_PARENT,
    NAME_NOT_NULL,
    NAME_NOT_EMPTY,
    NAME_NOT_WHITE_SPACE,
    NAME_REASONABLE_LENGTH,
    NAME_EXCLUDES_CONTROL_TYPE,
    NAME_EXCLUDES_PRIVATE_UNICODE_CHARACTERS,
    IS_KEYBOARD_FOCUSABLE_SHOULD_BE_TRUE,
    SIBLING_UNIQUE_AND_FOCUSABLE,
    HEADING_LEVEL_DESCENDS_WHEN_NESTED,
    HYPERLINK_SUPPORTS_INVOKE_PATTERN,
    COMBO_BOX_SHOULD_NOT_SUPPORT_SCROLL_PATTERN,
    CHILDREN_NOT_ALLOWED_IN_CONTENT_VIEW,
    PARENT_CHILD_SHOULD_NOT_HAVE_SAME_NAME_AND_TYPE,
    LANDMARK_ONE_MAIN,
    LANDMARK_BANNER_IS_TOP_LEVEL,
];

/// Every standard rule, in evaluation order
pub fn standard_definitions() -> &'static [RuleDefinition] {
    &STANDARD_RULES
}

/// Registry holding every standard rule the configuration does not disable
pub fn standard_registry(config: EngineConfig) -> Result<RuleRegistry> {
    RuleRegistry::from_definitions(standard_definitions(), config)
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{standard_definitions, standard_registry};
    pub use axcheck_engine::prelude::*;
}
