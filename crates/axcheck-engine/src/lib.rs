//! axcheck Engine
//!
//! Rule evaluation engine for UI accessibility trees.
//!
//! The engine is built in layers:
//! - [`property`]: atomic predicates over one node's properties
//! - [`relationship`]: predicates and counts over related nodes
//! - [`condition`]: the [`Condition`] algebra combining both
//! - [`rule`]: the rule contract (condition, evaluate, metadata)
//! - [`registry`]: an explicit list of rules built against one [`EngineConfig`]
//! - [`scanner`]: applies a registry to every node of a tree
//!
//! Conditions are immutable values and are safe to evaluate from many
//! threads at once.

pub mod condition;
pub mod config;
pub mod property;
pub mod registry;
pub mod relationship;
pub mod rule;
pub mod scanner;

pub use condition::{CompareOp, Condition};
pub use config::EngineConfig;
pub use property::{
    boolean, control_type_in, control_type_is, integer, pattern_boolean, rect, string, Predicate,
};
pub use registry::RuleRegistry;
pub use relationship::{
    ancestor, any_ancestor, any_ancestor_until, any_child, any_descendant, any_descendant_until,
    child_count, descendant_count, no_ancestor, no_ancestor_until, no_child, parent,
    sibling_count, sibling_count_including_self, CountComparison, CountExceeded, CountExpression,
    Relationship,
};
pub use rule::{ConditionBuilder, EvaluateFn, Rule, RuleDefinition, RuleError, RuleInfo, Standard};
pub use scanner::{NodeResults, RuleOutcome, RuleResult, ScanResults, Scanner};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::condition::Condition;
    pub use crate::config::EngineConfig;
    pub use crate::property::properties;
    pub use crate::property::{boolean, control_type_in, control_type_is, integer, string};
    pub use crate::relationship::{
        any_ancestor, any_child, child_count, descendant_count, no_child, parent, sibling_count,
    };
    pub use crate::registry::RuleRegistry;
    pub use crate::rule::{RuleDefinition, RuleError, RuleInfo, Standard};
    pub use crate::scanner::Scanner;
}
