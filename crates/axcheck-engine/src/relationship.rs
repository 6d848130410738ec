//! Relationship operators and count expressions
//!
//! These evaluate an inner condition against nodes reached from the node
//! under test instead of the node itself.
//!
//! When the relation does not exist (no parent, no children, fewer ancestors
//! than asked for) existential operators are false and counts are zero.
//! The negative operators [`no_child`] and [`no_ancestor`] are false as well
//! in that case; use `any_child(c).negate()` for a test that is true on a
//! childless node.
//!
//! Ancestor walks and descendant searches accept a `stop` condition. At each
//! node the stop condition is checked first; a node matching `stop` ends the
//! walk (or prunes the subtree) and is never tested against the inner
//! condition.

use crate::condition::{CompareOp, Condition};
use axcheck_core::{ancestors, BoundedCounter, Node, NodeRef, Result};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A condition evaluated against related nodes
#[derive(Debug, Clone)]
pub enum Relationship {
    Parent(Arc<Condition>),
    /// The n-th ancestor; 1 is the parent
    Ancestor {
        generation: usize,
        condition: Arc<Condition>,
    },
    AnyChild(Arc<Condition>),
    NoChild(Arc<Condition>),
    AnyAncestor {
        condition: Arc<Condition>,
        stop: Arc<Condition>,
    },
    NoAncestor {
        condition: Arc<Condition>,
        stop: Arc<Condition>,
    },
    AnyDescendant {
        condition: Arc<Condition>,
        stop: Arc<Condition>,
    },
}

impl Relationship {
    pub fn matches(&self, node: &dyn Node) -> bool {
        match self {
            Self::Parent(condition) => node.parent().is_some_and(|p| condition.matches(p.as_ref())),

            Self::Ancestor {
                generation,
                condition,
            } => generation
                .checked_sub(1)
                .and_then(|skip| ancestors(node).nth(skip))
                .is_some_and(|a| condition.matches(a.as_ref())),

            Self::AnyChild(condition) => node
                .children()
                .iter()
                .any(|c| condition.matches(c.as_ref())),

            Self::NoChild(condition) => {
                let children = node.children();
                !children.is_empty() && !children.iter().any(|c| condition.matches(c.as_ref()))
            }

            Self::AnyAncestor { condition, stop } => walk_ancestors(node, condition, stop),

            Self::NoAncestor { condition, stop } => {
                node.parent().is_some() && !walk_ancestors(node, condition, stop)
            }

            Self::AnyDescendant { condition, stop } => {
                let mut stack: Vec<NodeRef> = node.children();
                stack.reverse();

                while let Some(current) = stack.pop() {
                    if stop.matches(current.as_ref()) {
                        continue;
                    }
                    if condition.matches(current.as_ref()) {
                        return true;
                    }
                    let mut children = current.children();
                    children.reverse();
                    stack.extend(children);
                }
                false
            }
        }
    }
}

fn walk_ancestors(node: &dyn Node, condition: &Condition, stop: &Condition) -> bool {
    for ancestor in ancestors(node) {
        if stop.matches(ancestor.as_ref()) {
            return false;
        }
        if condition.matches(ancestor.as_ref()) {
            return true;
        }
    }
    false
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parent(c) => write!(f, "Parent({})", c),
            Self::Ancestor {
                generation,
                condition,
            } => write!(f, "Ancestor({}, {})", generation, condition),
            Self::AnyChild(c) => write!(f, "AnyChild({})", c),
            Self::NoChild(c) => write!(f, "NoChild({})", c),
            Self::AnyAncestor { condition, stop } => write_with_stop(f, "AnyAncestor", condition, stop),
            Self::NoAncestor { condition, stop } => write_with_stop(f, "NoAncestor", condition, stop),
            Self::AnyDescendant { condition, stop } => {
                write_with_stop(f, "AnyDescendant", condition, stop)
            }
        }
    }
}

fn write_with_stop(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    condition: &Condition,
    stop: &Condition,
) -> fmt::Result {
    match stop {
        Condition::False => write!(f, "{}({})", name, condition),
        _ => write!(f, "{}({}, stop: {})", name, condition, stop),
    }
}

/// Parent exists and matches `condition`
pub fn parent(condition: Condition) -> Condition {
    Relationship::Parent(Arc::new(condition)).into()
}

/// The `generation`-th ancestor exists and matches; `ancestor(1, c)` is
/// `parent(c)`. Generation 0 never matches.
pub fn ancestor(generation: usize, condition: Condition) -> Condition {
    Relationship::Ancestor {
        generation,
        condition: Arc::new(condition),
    }
    .into()
}

/// At least one child matches
pub fn any_child(condition: Condition) -> Condition {
    Relationship::AnyChild(Arc::new(condition)).into()
}

/// The node has children and none of them match
pub fn no_child(condition: Condition) -> Condition {
    Relationship::NoChild(Arc::new(condition)).into()
}

/// Some ancestor matches, walking to the root
pub fn any_ancestor(condition: Condition) -> Condition {
    any_ancestor_until(condition, Condition::False)
}

/// Some ancestor below the first one matching `stop` matches
pub fn any_ancestor_until(condition: Condition, stop: Condition) -> Condition {
    Relationship::AnyAncestor {
        condition: Arc::new(condition),
        stop: Arc::new(stop),
    }
    .into()
}

/// The node has a parent and no ancestor matches, walking to the root
pub fn no_ancestor(condition: Condition) -> Condition {
    no_ancestor_until(condition, Condition::False)
}

/// The node has a parent and no ancestor below the first one matching
/// `stop` matches
pub fn no_ancestor_until(condition: Condition, stop: Condition) -> Condition {
    Relationship::NoAncestor {
        condition: Arc::new(condition),
        stop: Arc::new(stop),
    }
    .into()
}

/// Some descendant matches
pub fn any_descendant(condition: Condition) -> Condition {
    any_descendant_until(condition, Condition::False)
}

/// Some descendant matches, without entering subtrees rooted at nodes that
/// match `stop`
pub fn any_descendant_until(condition: Condition, stop: Condition) -> Condition {
    Relationship::AnyDescendant {
        condition: Arc::new(condition),
        stop: Arc::new(stop),
    }
    .into()
}

/// Number of related nodes matching a condition
#[derive(Debug, Clone)]
pub enum CountExpression {
    Children(Arc<Condition>),
    Siblings {
        condition: Arc<Condition>,
        include_self: bool,
    },
    Descendants {
        condition: Arc<Condition>,
        guard: Option<BoundedCounter>,
    },
}

impl CountExpression {
    /// Count matching children
    pub fn children(condition: Condition) -> Self {
        Self::Children(Arc::new(condition))
    }

    /// Count matching siblings, not counting the node itself
    pub fn siblings(condition: Condition) -> Self {
        Self::Siblings {
            condition: Arc::new(condition),
            include_self: false,
        }
    }

    /// Count matching children of the node's parent, the node included
    pub fn siblings_including_self(condition: Condition) -> Self {
        Self::Siblings {
            condition: Arc::new(condition),
            include_self: true,
        }
    }

    /// Count all matching descendants
    pub fn descendants(condition: Condition) -> Self {
        Self::Descendants {
            condition: Arc::new(condition),
            guard: None,
        }
    }

    /// Count matching descendants among the first `limit` visited in
    /// depth-first order
    pub fn descendants_bounded(condition: Condition, limit: usize) -> Result<Self> {
        Ok(Self::Descendants {
            condition: Arc::new(condition),
            guard: Some(BoundedCounter::new(limit)?),
        })
    }

    /// Evaluate the count for `node`. A bounded descendant count that hits
    /// its limit returns the matches seen so far.
    pub fn count(&self, node: &dyn Node) -> usize {
        match self {
            Self::Children(condition) => node
                .children()
                .iter()
                .filter(|c| condition.matches(c.as_ref()))
                .count(),

            Self::Siblings {
                condition,
                include_self,
            } => {
                let Some(parent) = node.parent() else {
                    return 0;
                };
                let id = node.id();
                parent
                    .children()
                    .iter()
                    .filter(|s| *include_self || s.id() != id)
                    .filter(|s| condition.matches(s.as_ref()))
                    .count()
            }

            Self::Descendants { condition, guard } => {
                count_descendants(node, condition, guard.as_ref()).0
            }
        }
    }

    /// Evaluate the count for `node`, failing if a bounded descendant count
    /// reached its limit with nodes still unvisited
    pub fn count_checked(&self, node: &dyn Node) -> std::result::Result<usize, CountExceeded> {
        match self {
            Self::Descendants {
                condition,
                guard: Some(guard),
            } => match count_descendants(node, condition, Some(guard)) {
                (matched, false) => Ok(matched),
                (matched, true) => Err(CountExceeded {
                    matched,
                    limit: guard.upper_bound(),
                }),
            },
            _ => Ok(self.count(node)),
        }
    }

    pub fn compare(self, op: CompareOp, value: usize) -> Condition {
        Condition::Count(CountComparison {
            expression: self,
            op,
            value,
        })
    }

    pub fn less_than(self, value: usize) -> Condition {
        self.compare(CompareOp::Lt, value)
    }

    pub fn at_most(self, value: usize) -> Condition {
        self.compare(CompareOp::Le, value)
    }

    pub fn exactly(self, value: usize) -> Condition {
        self.compare(CompareOp::Eq, value)
    }

    pub fn at_least(self, value: usize) -> Condition {
        self.compare(CompareOp::Ge, value)
    }

    pub fn greater_than(self, value: usize) -> Condition {
        self.compare(CompareOp::Gt, value)
    }
}

impl fmt::Display for CountExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Children(c) => write!(f, "ChildCount({})", c),
            Self::Siblings {
                condition,
                include_self: false,
            } => write!(f, "SiblingCount({})", condition),
            Self::Siblings {
                condition,
                include_self: true,
            } => write!(f, "SiblingCountWithSelf({})", condition),
            Self::Descendants { condition, .. } => write!(f, "DescendantCount({})", condition),
        }
    }
}

/// A count expression compared against a literal
#[derive(Debug, Clone)]
pub struct CountComparison {
    pub expression: CountExpression,
    pub op: CompareOp,
    pub value: usize,
}

impl CountComparison {
    /// Compare the count against the literal.
    ///
    /// A bounded count that stops early only gives a lower bound, so it
    /// matches only when every count at or above that bound would.
    pub fn matches(&self, node: &dyn Node) -> bool {
        match self.expression.count_checked(node) {
            Ok(count) => self.op.evaluate(count, self.value),
            Err(exceeded) => match self.op {
                CompareOp::Gt | CompareOp::Ge => self.op.evaluate(exceeded.matched, self.value),
                CompareOp::Ne => exceeded.matched > self.value,
                CompareOp::Eq | CompareOp::Lt | CompareOp::Le => false,
            },
        }
    }
}

/// A bounded count reached its visit limit before the subtree was exhausted
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("count stopped at the limit of {limit} visited nodes with {matched} matches so far")]
pub struct CountExceeded {
    /// Matches among the visited nodes; a lower bound on the full count
    pub matched: usize,
    pub limit: usize,
}

/// Pre-order count of matching descendants. Returns the count and whether
/// the guard stopped the walk early.
fn count_descendants(
    node: &dyn Node,
    condition: &Condition,
    guard: Option<&BoundedCounter>,
) -> (usize, bool) {
    let mut guard = guard.cloned();
    if let Some(g) = guard.as_mut() {
        g.reset();
    }

    let mut matched = 0;
    let mut stack: Vec<NodeRef> = node.children();
    stack.reverse();

    while let Some(current) = stack.pop() {
        if let Some(g) = guard.as_mut() {
            if !g.try_increment() {
                debug!(
                    node = %node.id(),
                    limit = g.upper_bound(),
                    matched,
                    "Descendant count stopped at visit limit"
                );
                return (matched, true);
            }
        }
        if condition.matches(current.as_ref()) {
            matched += 1;
        }
        stack.extend(current.children().into_iter().rev());
    }
    (matched, false)
}

impl fmt::Display for CountComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.expression, self.op.symbol(), self.value)
    }
}

pub fn child_count(condition: Condition) -> CountExpression {
    CountExpression::children(condition)
}

pub fn sibling_count(condition: Condition) -> CountExpression {
    CountExpression::siblings(condition)
}

pub fn sibling_count_including_self(condition: Condition) -> CountExpression {
    CountExpression::siblings_including_self(condition)
}

pub fn descendant_count(condition: Condition) -> CountExpression {
    CountExpression::descendants(condition)
}
