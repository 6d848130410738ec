//! Condition algebra
//!
//! A [`Condition`] is a value describing a predicate over a node. Building a
//! condition never touches a tree; [`Condition::matches`] does. Conditions
//! hold no mutable state, so one value can be shared by any number of
//! threads evaluating different nodes.
//!
//! Composition is explicit: `a.and(b)`, `a.or(b)`, `a.negate()`. Both binary
//! combinators evaluate the left operand first and skip the right operand
//! when the left one decides the result. Put cheap property checks on the
//! left of expensive tree walks.

use crate::property::Predicate;
use crate::relationship::{CountComparison, Relationship};
use axcheck_core::Node;
use std::fmt;
use std::sync::Arc;

/// A composable predicate over a node
#[derive(Debug, Clone)]
pub enum Condition {
    True,
    False,
    /// Test of the node's own properties
    Atomic(Predicate),
    And(Arc<Condition>, Arc<Condition>),
    Or(Arc<Condition>, Arc<Condition>),
    Not(Arc<Condition>),
    /// Test of a node reached from this one (parent, children, ancestors, ...)
    Relation(Relationship),
    /// Number of related nodes compared against a literal
    Count(CountComparison),
}

impl Condition {
    /// Evaluate against a node
    pub fn matches(&self, node: &dyn Node) -> bool {
        match self {
            Self::True => true,
            Self::False => false,
            Self::Atomic(predicate) => predicate.matches(node),
            Self::And(left, right) => left.matches(node) && right.matches(node),
            Self::Or(left, right) => left.matches(node) || right.matches(node),
            Self::Not(inner) => !inner.matches(node),
            Self::Relation(relationship) => relationship.matches(node),
            Self::Count(comparison) => comparison.matches(node),
        }
    }

    /// Evaluate against an optional node; a missing node never matches
    pub fn matches_opt(&self, node: Option<&dyn Node>) -> bool {
        node.is_some_and(|n| self.matches(n))
    }

    /// Both this and `other`; `other` is skipped when this is false
    pub fn and(self, other: Condition) -> Condition {
        Self::And(Arc::new(self), Arc::new(other))
    }

    /// Either this or `other`; `other` is skipped when this is true
    pub fn or(self, other: Condition) -> Condition {
        Self::Or(Arc::new(self), Arc::new(other))
    }

    /// Logical negation
    pub fn negate(self) -> Condition {
        Self::Not(Arc::new(self))
    }

    /// Left-to-right conjunction of all conditions; `True` when empty
    pub fn all(conditions: impl IntoIterator<Item = Condition>) -> Condition {
        let mut iter = conditions.into_iter();
        match iter.next() {
            Some(first) => iter.fold(first, Condition::and),
            None => Self::True,
        }
    }

    /// Left-to-right disjunction of all conditions; `False` when empty
    pub fn any(conditions: impl IntoIterator<Item = Condition>) -> Condition {
        let mut iter = conditions.into_iter();
        match iter.next() {
            Some(first) => iter.fold(first, Condition::or),
            None => Self::False,
        }
    }

    /// Atomic predicate backed by a function
    pub fn custom<F>(name: impl Into<String>, f: F) -> Condition
    where
        F: Fn(&dyn Node) -> bool + Send + Sync + 'static,
    {
        Self::Atomic(Predicate::custom(name, f))
    }
}

impl From<Predicate> for Condition {
    fn from(predicate: Predicate) -> Self {
        Self::Atomic(predicate)
    }
}

impl From<Relationship> for Condition {
    fn from(relationship: Relationship) -> Self {
        Self::Relation(relationship)
    }
}

impl From<CountComparison> for Condition {
    fn from(comparison: CountComparison) -> Self {
        Self::Count(comparison)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => f.write_str("True"),
            Self::False => f.write_str("False"),
            Self::Atomic(predicate) => write!(f, "{}", predicate),
            Self::And(left, right) => write!(f, "({} & {})", left, right),
            Self::Or(left, right) => write!(f, "({} | {})", left, right),
            Self::Not(inner) => write!(f, "!{}", inner),
            Self::Relation(relationship) => write!(f, "{}", relationship),
            Self::Count(comparison) => write!(f, "{}", comparison),
        }
    }
}

/// Comparison operators for count expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    pub fn evaluate(&self, left: usize, right: usize) -> bool {
        match self {
            CompareOp::Eq => left == right,
            CompareOp::Ne => left != right,
            CompareOp::Lt => left < right,
            CompareOp::Le => left <= right,
            CompareOp::Gt => left > right,
            CompareOp::Ge => left >= right,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "==" | "=" => Some(CompareOp::Eq),
            "!=" | "<>" => Some(CompareOp::Ne),
            "<" => Some(CompareOp::Lt),
            "<=" => Some(CompareOp::Le),
            ">" => Some(CompareOp::Gt),
            ">=" => Some(CompareOp::Ge),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{boolean, string};
    use axcheck_core::{ControlType, ElementSpec, ElementTree, PropertyId};

    fn button(name: &str, focusable: bool) -> ElementTree {
        let spec = ElementSpec::new(ControlType::Button)
            .with_name(name)
            .with_focusable(focusable);
        ElementTree::from_spec(&spec).unwrap()
    }

    fn exploding() -> Condition {
        Condition::custom("Explodes", |_| panic!("right operand evaluated"))
    }

    #[test]
    fn test_false_and_skips_right_operand() {
        let tree = button("OK", true);
        assert!(!Condition::False.and(exploding()).matches(tree.root().as_ref()));
    }

    #[test]
    fn test_true_or_skips_right_operand() {
        let tree = button("OK", true);
        assert!(Condition::True.or(exploding()).matches(tree.root().as_ref()));
    }

    #[test]
    #[should_panic(expected = "right operand evaluated")]
    fn test_true_and_evaluates_right_operand() {
        let tree = button("OK", true);
        Condition::True.and(exploding()).matches(tree.root().as_ref());
    }

    #[test]
    fn test_identities() {
        let tree = button("OK", false);
        let node = tree.root();
        let focusable = boolean(PropertyId::IsKeyboardFocusable).is_true();

        assert_eq!(
            focusable.clone().and(Condition::True).matches(node.as_ref()),
            focusable.matches(node.as_ref())
        );
        assert_eq!(
            focusable.clone().or(Condition::False).matches(node.as_ref()),
            focusable.matches(node.as_ref())
        );
        assert!(!focusable.clone().and(Condition::False).matches(node.as_ref()));
        assert_eq!(
            focusable.clone().negate().negate().matches(node.as_ref()),
            focusable.matches(node.as_ref())
        );
    }

    #[test]
    fn test_all_and_any() {
        let tree = button("OK", true);
        let node = tree.root();

        assert!(Condition::all(Vec::new()).matches(node.as_ref()));
        assert!(!Condition::any(Vec::new()).matches(node.as_ref()));

        let named = string(PropertyId::Name).is("OK");
        let focusable = boolean(PropertyId::IsKeyboardFocusable).is_true();
        assert!(Condition::all([named.clone(), focusable.clone()]).matches(node.as_ref()));
        assert!(Condition::any([Condition::False, named]).matches(node.as_ref()));
    }

    #[test]
    fn test_matches_opt_none() {
        assert!(!Condition::True.matches_opt(None));
        assert!(!Condition::True.negate().matches_opt(None));

        let tree = button("OK", true);
        assert!(Condition::True.matches_opt(Some(tree.root().as_ref())));
    }

    #[test]
    fn test_display() {
        let condition = string(PropertyId::Name)
            .not_null()
            .and(boolean(PropertyId::IsOffscreen).is_false().negate());
        assert_eq!(condition.to_string(), "(Name.NotNull & !IsOffscreen == false)");
    }

    #[test]
    fn test_compare_op() {
        assert!(CompareOp::Le.evaluate(1, 1));
        assert!(!CompareOp::Lt.evaluate(1, 1));
        assert_eq!(CompareOp::parse(">="), Some(CompareOp::Ge));
        assert_eq!(CompareOp::parse("~"), None);
    }
}
