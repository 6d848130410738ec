//! Rule definitions grouped by the property or structure they check

pub mod bounding_rectangle;
pub mod focus;
pub mod heading;
pub mod landmark;
pub mod name;
pub mod structure;

pub use bounding_rectangle::{
    BOUNDING_RECTANGLE_CONTAINED_IN_PARENT, BOUNDING_RECTANGLE_NOT_ALL_ZEROS,
    BOUNDING_RECTANGLE_NOT_NULL,
};
pub use focus::{IS_KEYBOARD_FOCUSABLE_SHOULD_BE_TRUE, SIBLING_UNIQUE_AND_FOCUSABLE};
pub use heading::HEADING_LEVEL_DESCENDS_WHEN_NESTED;
pub use landmark::{LANDMARK_BANNER_IS_TOP_LEVEL, LANDMARK_ONE_MAIN};
pub use name::{
    NAME_EXCLUDES_CONTROL_TYPE, NAME_EXCLUDES_PRIVATE_UNICODE_CHARACTERS, NAME_NOT_EMPTY,
    NAME_NOT_NULL, NAME_NOT_WHITE_SPACE, NAME_REASONABLE_LENGTH,
};
pub use structure::{
    CHILDREN_NOT_ALLOWED_IN_CONTENT_VIEW, COMBO_BOX_SHOULD_NOT_SUPPORT_SCROLL_PATTERN,
    HYPERLINK_SUPPORTS_INVOKE_PATTERN, PARENT_CHILD_SHOULD_NOT_HAVE_SAME_NAME_AND_TYPE,
};
