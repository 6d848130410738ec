//! Rule contract
//!
//! A rule is an applicability [`Condition`], an evaluate function and fixed
//! metadata. Callers check the condition first and evaluate only nodes it
//! matches; `evaluate` does not re-check it. Evaluating a node the
//! condition rejected gives an unspecified code or a [`RuleError`].
//!
//! Evaluate has two ways to report trouble, and they mean different things:
//! - `Err(RuleError)` is a broken contract (a property the condition
//!   guarantees is missing, a required relative is gone). The host skips the
//!   rule for that node and keeps scanning.
//! - `Ok(EvaluationCode::RuleExecutionError)` means the node was usable but
//!   the rule could not compute a result for it. The host reports it.

use crate::condition::Condition;
use crate::config::EngineConfig;
use axcheck_core::{EvaluationCode, Node, NodeId, PropertyId, RuleId};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Builds a rule's applicability condition
pub type ConditionBuilder = fn(&EngineConfig) -> Condition;

/// Evaluates a rule against a node its condition matched
pub type EvaluateFn = fn(&dyn Node, &EngineConfig) -> Result<EvaluationCode, RuleError>;

/// Accessibility standard a rule enforces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Standard {
    /// WCAG 1.1.1 Non-text Content
    NonTextContent,
    /// WCAG 1.3.1 Info and Relationships
    InfoAndRelationships,
    /// WCAG 2.1.1 Keyboard
    Keyboard,
    /// WCAG 2.4.6 Headings and Labels
    HeadingsAndLabels,
    /// WCAG 4.1.2 Name, Role, Value
    NameRoleValue,
    /// Section 508 502.3.1 Object Information
    ObjectInformation,
}

impl Standard {
    /// Reference tag as printed in reports
    pub fn reference(self) -> &'static str {
        match self {
            Self::NonTextContent => "WCAG 1.1.1",
            Self::InfoAndRelationships => "WCAG 1.3.1",
            Self::Keyboard => "WCAG 2.1.1",
            Self::HeadingsAndLabels => "WCAG 2.4.6",
            Self::NameRoleValue => "WCAG 4.1.2",
            Self::ObjectInformation => "Section 508 502.3.1",
        }
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reference())
    }
}

/// Fixed metadata describing a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleInfo {
    pub id: RuleId,

    /// What the rule checks
    pub description: &'static str,

    /// Remediation guidance
    pub how_to_fix: &'static str,

    pub standard: Standard,

    /// Property the rule is about, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<PropertyId>,
}

/// Static description of a rule, as listed in a registry
#[derive(Debug, Clone, Copy)]
pub struct RuleDefinition {
    pub info: RuleInfo,
    pub condition: ConditionBuilder,
    pub evaluate: EvaluateFn,
}

/// Contract violations reported by a rule's evaluate function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum RuleError {
    #[error("no node to evaluate")]
    NullNode,

    #[error("property {property} is missing on node {node}")]
    MissingProperty { property: PropertyId, node: NodeId },

    #[error("{relation} of node {node} is missing")]
    MissingRelative {
        relation: &'static str,
        node: NodeId,
    },

    #[error("property {property} on node {node} has an unusable value")]
    InvalidValue { property: PropertyId, node: NodeId },
}

impl RuleError {
    pub fn missing_property(property: PropertyId, node: &dyn Node) -> Self {
        Self::MissingProperty {
            property,
            node: node.id(),
        }
    }

    pub fn missing_relative(relation: &'static str, node: &dyn Node) -> Self {
        Self::MissingRelative {
            relation,
            node: node.id(),
        }
    }

    pub fn invalid_value(property: PropertyId, node: &dyn Node) -> Self {
        Self::InvalidValue {
            property,
            node: node.id(),
        }
    }
}

/// A rule built against one configuration
#[derive(Clone)]
pub struct Rule {
    info: RuleInfo,
    condition: Condition,
    evaluate: EvaluateFn,
    config: Arc<EngineConfig>,
}

impl Rule {
    /// Build a rule from its definition, closing over `config`
    pub fn new(definition: &RuleDefinition, config: Arc<EngineConfig>) -> Self {
        Self {
            info: definition.info,
            condition: (definition.condition)(&config),
            evaluate: definition.evaluate,
            config,
        }
    }

    pub fn id(&self) -> RuleId {
        self.info.id
    }

    pub fn info(&self) -> &RuleInfo {
        &self.info
    }

    /// Applicability condition
    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    pub fn applies_to(&self, node: &dyn Node) -> bool {
        self.condition.matches(node)
    }

    /// Evaluate a node the condition matched
    pub fn evaluate(&self, node: &dyn Node) -> Result<EvaluationCode, RuleError> {
        (self.evaluate)(node, &self.config)
    }

    /// Evaluate an optional node; `None` is a contract violation
    pub fn evaluate_opt(&self, node: Option<&dyn Node>) -> Result<EvaluationCode, RuleError> {
        self.evaluate(node.ok_or(RuleError::NullNode)?)
    }

    /// Check the condition and evaluate when it matches
    pub fn run(&self, node: &dyn Node) -> Option<Result<EvaluationCode, RuleError>> {
        self.applies_to(node).then(|| self.evaluate(node))
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.info.id)
            .field("condition", &self.condition.to_string())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axcheck_core::{ControlType, ElementSpec, ElementTree};

    fn name_condition(_: &EngineConfig) -> Condition {
        Condition::custom("Name.Reported", |node| {
            node.property(PropertyId::Name).exists()
        })
    }

    fn name_evaluate(node: &dyn Node, config: &EngineConfig) -> Result<EvaluationCode, RuleError> {
        let name = node
            .name()
            .ok_or_else(|| RuleError::missing_property(PropertyId::Name, node))?;

        Ok(if name.chars().count() <= config.max_name_length {
            EvaluationCode::Pass
        } else {
            EvaluationCode::Error
        })
    }

    const DEFINITION: RuleDefinition = RuleDefinition {
        info: RuleInfo {
            id: RuleId::NameReasonableLength,
            description: "test rule",
            how_to_fix: "shorten the name",
            standard: Standard::NameRoleValue,
            property_id: Some(PropertyId::Name),
        },
        condition: name_condition,
        evaluate: name_evaluate,
    };

    #[test]
    fn test_rule_closes_over_config() {
        let config = EngineConfig {
            max_name_length: 3,
            ..EngineConfig::default()
        };
        let rule = Rule::new(&DEFINITION, Arc::new(config));
        let tree = ElementTree::from_spec(&ElementSpec::new(ControlType::Button).with_name("Cancel")).unwrap();

        assert_eq!(rule.id(), RuleId::NameReasonableLength);
        assert_eq!(rule.run(tree.root().as_ref()), Some(Ok(EvaluationCode::Error)));
    }

    #[test]
    fn test_run_skips_non_matching_nodes() {
        let rule = Rule::new(&DEFINITION, Arc::new(EngineConfig::default()));
        let tree = ElementTree::from_spec(&ElementSpec::new(ControlType::Button)).unwrap();
        assert_eq!(rule.run(tree.root().as_ref()), None);
    }

    #[test]
    fn test_contract_violation_is_an_error() {
        let rule = Rule::new(&DEFINITION, Arc::new(EngineConfig::default()));
        let tree = ElementTree::from_spec(
            &ElementSpec::new(ControlType::Button).with_null_property(PropertyId::Name),
        )
        .unwrap();
        let root = tree.root();

        assert!(rule.applies_to(root.as_ref()));
        assert_eq!(
            rule.evaluate(root.as_ref()),
            Err(RuleError::MissingProperty {
                property: PropertyId::Name,
                node: root.id(),
            })
        );
        assert_eq!(rule.evaluate_opt(None), Err(RuleError::NullNode));
    }
}
