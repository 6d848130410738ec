//! Scan runner
//!
//! Applies every registered rule to every node of a tree:
//! - Visits nodes depth-first, capped at `max_nodes`
//! - Checks each rule's condition before evaluating it
//! - Skips a rule for a node when evaluate reports a contract violation
//! - Evaluates nodes on the rayon pool when configured
//! - Aggregates per-node and whole-scan status
//!
//! Result order is depth-first node order, then registry rule order, whether
//! or not the scan ran in parallel.

use crate::registry::RuleRegistry;
use crate::rule::RuleError;
use axcheck_core::{
    aggregate_codes, Aggregate, BoundedCounter, ControlType, EvaluationCode, Node, NodeId, NodeRef,
    RuleId,
};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Outcome of one rule on one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RuleOutcome {
    Evaluated { code: EvaluationCode },
    Failed { error: RuleError },
}

/// Result of one rule whose condition matched one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleResult {
    pub rule: RuleId,
    pub node: NodeId,
    pub outcome: RuleOutcome,
}

impl RuleResult {
    pub fn code(&self) -> Option<EvaluationCode> {
        match &self.outcome {
            RuleOutcome::Evaluated { code } => Some(*code),
            RuleOutcome::Failed { .. } => None,
        }
    }
}

/// All rule results for one node
#[derive(Debug, Clone, Serialize)]
pub struct NodeResults {
    pub node: NodeId,
    pub control_type: ControlType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub results: Vec<RuleResult>,
}

impl NodeResults {
    /// Codes of the rules that evaluated successfully
    pub fn codes(&self) -> impl Iterator<Item = EvaluationCode> + '_ {
        self.results.iter().filter_map(RuleResult::code)
    }

    /// Aggregated status of this node
    pub fn status(&self) -> Aggregate {
        aggregate_codes(self.codes())
    }

    pub fn failures(&self) -> impl Iterator<Item = &RuleResult> {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, RuleOutcome::Failed { .. }))
    }
}

/// Results of a whole scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanResults {
    pub nodes: Vec<NodeResults>,

    /// Whether the node limit cut the scan short
    pub truncated: bool,

    pub elapsed_us: u64,
}

impl ScanResults {
    /// Aggregated status across every evaluated rule
    pub fn status(&self) -> Aggregate {
        aggregate_codes(self.nodes.iter().flat_map(NodeResults::codes))
    }

    /// Number of evaluations per code
    pub fn counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for code in self.nodes.iter().flat_map(NodeResults::codes) {
            *counts.entry(code.to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of rule evaluations that reported a contract violation
    pub fn failure_count(&self) -> usize {
        self.nodes.iter().map(|n| n.failures().count()).sum()
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeResults> {
        self.nodes.iter().find(|n| n.node == id)
    }
}

/// Runs a registry over trees
#[derive(Debug, Clone)]
pub struct Scanner {
    registry: Arc<RuleRegistry>,
}

impl Scanner {
    pub fn new(registry: Arc<RuleRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Scan `root` and everything below it
    pub fn scan(&self, root: &NodeRef) -> ScanResults {
        let start = Instant::now();
        let config = self.registry.config();
        info!(
            root = %root.id(),
            rules = self.registry.len(),
            parallel = config.parallel,
            "Starting scan"
        );

        let (nodes, truncated) = self.collect_nodes(root);

        let results: Vec<NodeResults> = if config.parallel {
            nodes.par_iter().map(|n| self.scan_node(n.as_ref())).collect()
        } else {
            nodes.iter().map(|n| self.scan_node(n.as_ref())).collect()
        };

        let scan = ScanResults {
            nodes: results,
            truncated,
            elapsed_us: saturating_micros(start.elapsed()),
        };

        info!(
            nodes = scan.nodes.len(),
            status = %scan.status().status(),
            failures = scan.failure_count(),
            elapsed_us = scan.elapsed_us,
            "Scan complete"
        );
        scan
    }

    /// Apply every rule to one node
    pub fn scan_node(&self, node: &dyn Node) -> NodeResults {
        let mut results = Vec::new();

        for rule in self.registry.rules() {
            if !rule.applies_to(node) {
                continue;
            }

            let outcome = match rule.evaluate(node) {
                Ok(code) => {
                    debug!(rule = %rule.id(), node = %node.id(), %code, "Rule evaluated");
                    RuleOutcome::Evaluated { code }
                }
                Err(error) => {
                    warn!(rule = %rule.id(), node = %node.id(), %error, "Rule evaluation failed; skipping");
                    RuleOutcome::Failed { error }
                }
            };

            results.push(RuleResult {
                rule: rule.id(),
                node: node.id(),
                outcome,
            });
        }

        NodeResults {
            node: node.id(),
            control_type: node.control_type(),
            name: node.name().map(str::to_string),
            results,
        }
    }

    fn collect_nodes(&self, root: &NodeRef) -> (Vec<NodeRef>, bool) {
        let max_nodes = self.registry.config().max_nodes;
        let mut guard = match BoundedCounter::new(max_nodes) {
            Ok(guard) => Some(guard),
            Err(error) => {
                warn!(%error, "Invalid node limit; scanning without a cap");
                None
            }
        };
        let mut nodes = Vec::new();
        let mut stack = vec![Arc::clone(root)];
        let mut truncated = false;

        while let Some(current) = stack.pop() {
            if let Some(g) = guard.as_mut() {
                if !g.try_increment() {
                    warn!(limit = max_nodes, "Node limit reached; scan truncated");
                    truncated = true;
                    break;
                }
            }
            let children = current.children();
            stack.extend(children.into_iter().rev());
            nodes.push(current);
        }

        (nodes, truncated)
    }
}

fn saturating_micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::config::EngineConfig;
    use crate::property::{control_type_is, properties};
    use crate::rule::{RuleDefinition, RuleInfo, Standard};
    use axcheck_core::{ElementSpec, ElementTree, PropertyId, ScanStatus};

    fn buttons(_: &EngineConfig) -> Condition {
        control_type_is(ControlType::Button)
    }

    fn name_required(node: &dyn Node, _: &EngineConfig) -> Result<EvaluationCode, RuleError> {
        match node.property(PropertyId::Name) {
            axcheck_core::PropertyLookup::Present(_) => Ok(EvaluationCode::Pass),
            axcheck_core::PropertyLookup::Null => {
                Err(RuleError::missing_property(PropertyId::Name, node))
            }
            axcheck_core::PropertyLookup::Absent => Ok(EvaluationCode::Error),
        }
    }

    fn focusable(_: &EngineConfig) -> Condition {
        properties::is_keyboard_focusable().is_true()
    }

    fn open(_: &dyn Node, _: &EngineConfig) -> Result<EvaluationCode, RuleError> {
        Ok(EvaluationCode::Open)
    }

    fn info(id: RuleId) -> RuleInfo {
        RuleInfo {
            id,
            description: "",
            how_to_fix: "",
            standard: Standard::NameRoleValue,
            property_id: None,
        }
    }

    fn registry(config: EngineConfig) -> Arc<RuleRegistry> {
        let definitions = [
            RuleDefinition {
                info: info(RuleId::NameNotNull),
                condition: buttons,
                evaluate: name_required,
            },
            RuleDefinition {
                info: info(RuleId::IsKeyboardFocusableShouldBeTrue),
                condition: focusable,
                evaluate: open,
            },
        ];
        Arc::new(RuleRegistry::from_definitions(&definitions, config).unwrap())
    }

    fn tree() -> ElementTree {
        let spec = ElementSpec::new(ControlType::Window)
            .with_id(1)
            .with_child(ElementSpec::new(ControlType::Button).with_id(2).with_name("OK"))
            .with_child(
                ElementSpec::new(ControlType::Button)
                    .with_id(3)
                    .with_null_property(PropertyId::Name)
                    .with_focusable(true),
            )
            .with_child(ElementSpec::new(ControlType::Button).with_id(4));
        ElementTree::from_spec(&spec).unwrap()
    }

    #[test]
    fn test_scan_collects_results_in_order() {
        for parallel in [false, true] {
            let config = EngineConfig {
                parallel,
                ..EngineConfig::default()
            };
            let scanner = Scanner::new(registry(config));
            let results = scanner.scan(&tree().root());

            let ids: Vec<u64> = results.nodes.iter().map(|n| n.node.0).collect();
            assert_eq!(ids, vec![1, 2, 3, 4]);
            assert!(results.nodes[0].results.is_empty());
            assert_eq!(results.nodes[1].status().status(), ScanStatus::Pass);
            assert_eq!(results.nodes[3].status().status(), ScanStatus::Fail);
            assert_eq!(results.status().status(), ScanStatus::Fail);
            assert!(!results.truncated);
        }
    }

    #[test]
    fn test_failed_rule_is_skipped_and_scan_continues() {
        let scanner = Scanner::new(registry(EngineConfig::default()));
        let results = scanner.scan(&tree().root());

        let node = results.node(NodeId(3)).unwrap();
        assert_eq!(node.results.len(), 2);
        assert!(matches!(
            node.results[0].outcome,
            RuleOutcome::Failed {
                error: RuleError::MissingProperty { .. }
            }
        ));
        assert_eq!(node.results[1].code(), Some(EvaluationCode::Open));
        assert_eq!(node.status().status(), ScanStatus::Uncertain);
        assert_eq!(results.failure_count(), 1);
    }

    #[test]
    fn test_node_limit_truncates() {
        let config = EngineConfig {
            max_nodes: 2,
            ..EngineConfig::default()
        };
        let scanner = Scanner::new(registry(config));
        let results = scanner.scan(&tree().root());

        assert!(results.truncated);
        assert_eq!(results.nodes.len(), 2);
    }

    #[test]
    fn test_empty_scan_has_no_result() {
        let scanner = Scanner::new(registry(EngineConfig::default()));
        let lone = ElementTree::from_spec(&ElementSpec::new(ControlType::Pane)).unwrap();
        let results = scanner.scan(&lone.root());

        assert_eq!(results.status(), Aggregate::Empty);
        assert_eq!(results.status().status(), ScanStatus::NoResult);
    }

    #[test]
    fn test_elapsed_saturates() {
        assert_eq!(saturating_micros(Duration::from_millis(3)), 3_000);
        assert_eq!(saturating_micros(Duration::MAX), u64::MAX);
    }
}
