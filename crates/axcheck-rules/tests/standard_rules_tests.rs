//! Standard rules run through the registry and scanner

use axcheck_core::{
    landmark, ControlType, ElementSpec, ElementTree, EvaluationCode, Node, NodeId, NodeRef,
    PatternPropertyId, PropertyId, PropertyLookup, RuleId, ScanStatus,
};
use axcheck_engine::{EngineConfig, Rule, RuleOutcome, Scanner};
use axcheck_rules::rules::{LANDMARK_BANNER_IS_TOP_LEVEL, LANDMARK_ONE_MAIN, SIBLING_UNIQUE_AND_FOCUSABLE};
use axcheck_rules::standard_registry;
use std::sync::Arc;

fn rule(definition: &axcheck_engine::RuleDefinition) -> Rule {
    Rule::new(definition, Arc::new(EngineConfig::default()))
}

/// Wraps a node but reports a parent that does not list it as a child
struct Orphan {
    inner: NodeRef,
    parent: NodeRef,
}

impl Node for Orphan {
    fn id(&self) -> NodeId {
        self.inner.id()
    }

    fn control_type(&self) -> ControlType {
        self.inner.control_type()
    }

    fn property(&self, id: PropertyId) -> PropertyLookup<'_> {
        self.inner.property(id)
    }

    fn pattern_property(&self, id: PatternPropertyId) -> PropertyLookup<'_> {
        self.inner.pattern_property(id)
    }

    fn parent(&self) -> Option<NodeRef> {
        Some(Arc::clone(&self.parent))
    }

    fn children(&self) -> Vec<NodeRef> {
        self.inner.children()
    }
}

fn focusable_button(name: &str) -> ElementSpec {
    ElementSpec::new(ControlType::Button)
        .with_name(name)
        .with_property(PropertyId::LocalizedControlType, "button")
        .with_focusable(true)
}

#[test]
fn test_sibling_count_of_zero_is_an_execution_error() {
    let detached = ElementTree::from_spec(&focusable_button("OK").with_id(10)).unwrap();
    let other = ElementTree::from_spec(
        &ElementSpec::new(ControlType::Pane).with_child(focusable_button("Cancel")),
    )
    .unwrap();

    let orphan = Orphan {
        inner: detached.root(),
        parent: other.root(),
    };

    let rule = rule(&SIBLING_UNIQUE_AND_FOCUSABLE);
    assert_eq!(rule.run(&orphan), Some(Ok(EvaluationCode::RuleExecutionError)));
}

fn main_region() -> ElementSpec {
    ElementSpec::new(ControlType::Group).with_property(PropertyId::LandmarkType, landmark::MAIN)
}

#[test]
fn test_landmark_one_main() {
    let rule = rule(&LANDMARK_ONE_MAIN);

    let one = ElementTree::from_spec(&ElementSpec::new(ControlType::Window).with_child(main_region()))
        .unwrap();
    assert_eq!(rule.run(one.root().as_ref()), Some(Ok(EvaluationCode::Pass)));

    let two = ElementTree::from_spec(
        &ElementSpec::new(ControlType::Window)
            .with_child(main_region())
            .with_child(ElementSpec::new(ControlType::Pane).with_child(main_region())),
    )
    .unwrap();
    assert_eq!(rule.run(two.root().as_ref()), Some(Ok(EvaluationCode::Error)));

    let none = ElementTree::from_spec(&ElementSpec::new(ControlType::Window)).unwrap();
    assert_eq!(rule.run(none.root().as_ref()), None);
}

fn one_main_with_limit(limit: usize) -> Rule {
    Rule::new(
        &LANDMARK_ONE_MAIN,
        Arc::new(EngineConfig {
            descendant_count_limit: limit,
            ..EngineConfig::default()
        }),
    )
}

fn window_with(children: impl IntoIterator<Item = ElementSpec>) -> ElementTree {
    ElementTree::from_spec(&ElementSpec::new(ControlType::Window).with_children(children)).unwrap()
}

fn panes(n: usize) -> Vec<ElementSpec> {
    (0..n).map(|_| ElementSpec::new(ControlType::Pane)).collect()
}

#[test]
fn test_landmark_one_main_incomplete_count_is_execution_error() {
    // Pre-order visits the pane, the nested main, then the second main; a
    // limit of 2 stops before the second one
    let spec = ElementSpec::new(ControlType::Window)
        .with_child(ElementSpec::new(ControlType::Pane).with_child(main_region()))
        .with_child(main_region());
    let tree = ElementTree::from_spec(&spec).unwrap();

    assert_eq!(
        one_main_with_limit(2).run(tree.root().as_ref()),
        Some(Ok(EvaluationCode::RuleExecutionError))
    );
    assert_eq!(
        rule(&LANDMARK_ONE_MAIN).run(tree.root().as_ref()),
        Some(Ok(EvaluationCode::Error))
    );
}

#[test]
fn test_landmark_one_main_second_main_past_limit() {
    let mut children = panes(5);
    children.extend([main_region(), main_region()]);
    let tree = window_with(children);

    assert_eq!(
        one_main_with_limit(6).run(tree.root().as_ref()),
        Some(Ok(EvaluationCode::RuleExecutionError))
    );
    assert_eq!(
        one_main_with_limit(7).run(tree.root().as_ref()),
        Some(Ok(EvaluationCode::Error))
    );
}

#[test]
fn test_landmark_one_main_two_found_before_limit() {
    let mut children = vec![main_region(), main_region()];
    children.extend(panes(5));
    let tree = window_with(children);

    assert_eq!(
        one_main_with_limit(3).run(tree.root().as_ref()),
        Some(Ok(EvaluationCode::Error))
    );
}

#[test]
fn test_landmark_one_main_not_applied_past_limit() {
    let mut children = panes(6);
    children.push(main_region());
    let tree = window_with(children);

    let narrow = one_main_with_limit(6);
    assert!(!narrow.applies_to(tree.root().as_ref()));
    assert_eq!(narrow.run(tree.root().as_ref()), None);

    assert_eq!(
        one_main_with_limit(7).run(tree.root().as_ref()),
        Some(Ok(EvaluationCode::Pass))
    );
}

fn banner() -> ElementSpec {
    ElementSpec::new(ControlType::Group)
        .with_property(PropertyId::LandmarkType, landmark::CUSTOM)
        .with_property(PropertyId::LocalizedLandmarkType, "banner")
}

#[test]
fn test_banner_is_top_level() {
    let rule = rule(&LANDMARK_BANNER_IS_TOP_LEVEL);

    let top = ElementTree::from_spec(&ElementSpec::new(ControlType::Window).with_child(banner()))
        .unwrap();
    assert_eq!(
        rule.run(top.root().children()[0].as_ref()),
        Some(Ok(EvaluationCode::Pass))
    );

    let nested = ElementTree::from_spec(
        &ElementSpec::new(ControlType::Window).with_child(main_region().with_child(banner())),
    )
    .unwrap();
    let banner_node = nested.root().children()[0].children()[0].clone();
    assert_eq!(rule.run(banner_node.as_ref()), Some(Ok(EvaluationCode::Error)));
}

#[test]
fn test_banner_walk_stops_at_hosting_window() {
    let rule = rule(&LANDMARK_BANNER_IS_TOP_LEVEL);

    // A landmark outside the hosting window does not count
    let spec = main_region().with_child(ElementSpec::new(ControlType::Window).with_child(banner()));
    let tree = ElementTree::from_spec(&spec).unwrap();
    let banner_node = tree.root().children()[0].children()[0].clone();

    assert_eq!(rule.run(banner_node.as_ref()), Some(Ok(EvaluationCode::Pass)));
}

fn dialog() -> ElementSpec {
    ElementSpec::new(ControlType::Window)
        .with_name("Settings")
        .with_property(PropertyId::IsControlElement, true)
        .with_rect(axcheck_core::Rect::new(0, 0, 400, 300))
        .with_children([
            focusable_button("OK").with_rect(axcheck_core::Rect::new(10, 250, 90, 290)),
            focusable_button("Cancel").with_rect(axcheck_core::Rect::new(100, 250, 190, 290)),
            ElementSpec::new(ControlType::Button)
                .with_id(100)
                .with_property(PropertyId::LocalizedControlType, "button")
                .with_focusable(true)
                .with_rect(axcheck_core::Rect::new(200, 250, 290, 290)),
        ])
}

#[test]
fn test_full_scan() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    for parallel in [false, true] {
        let config = EngineConfig {
            parallel,
            ..EngineConfig::default()
        };
        let scanner = Scanner::new(Arc::new(standard_registry(config).unwrap()));
        let tree = ElementTree::from_spec(&dialog()).unwrap();
        let results = scanner.scan(&tree.root());

        assert_eq!(results.nodes.len(), 4);
        assert_eq!(results.failure_count(), 0);
        assert_eq!(results.status().status(), ScanStatus::Fail);

        let ok = &results.nodes[1];
        assert_eq!(ok.status().status(), ScanStatus::Pass);
        assert!(ok.results.iter().any(|r| r.rule == RuleId::SiblingUniqueAndFocusable));

        let unnamed = results.node(NodeId(100)).unwrap();
        assert_eq!(unnamed.status().status(), ScanStatus::Fail);
        let name_result = unnamed
            .results
            .iter()
            .find(|r| r.rule == RuleId::NameNotNull)
            .unwrap();
        assert_eq!(
            name_result.outcome,
            RuleOutcome::Evaluated {
                code: EvaluationCode::Error
            }
        );
    }
}

#[test]
fn test_scan_from_json_snapshot() {
    let json = r#"{
        "control_type": "Window",
        "properties": { "Name": "Main" },
        "children": [
            {
                "control_type": "Hyperlink",
                "properties": { "Name": "Docs", "IsInvokePatternAvailable": true }
            },
            {
                "control_type": "ComboBox",
                "properties": { "Name": "Size", "IsScrollPatternAvailable": true }
            }
        ]
    }"#;

    let tree = ElementTree::from_json(json).unwrap();
    let scanner = Scanner::new(Arc::new(standard_registry(EngineConfig::default()).unwrap()));
    let results = scanner.scan(&tree.root());

    let combo = &results.nodes[2];
    let warning = combo
        .results
        .iter()
        .find(|r| r.rule == RuleId::ComboBoxShouldNotSupportScrollPattern)
        .unwrap();
    assert_eq!(warning.code(), Some(EvaluationCode::Warning));
    assert_eq!(results.status().status(), ScanStatus::Uncertain);

    let rendered = serde_json::to_value(&results).unwrap();
    assert_eq!(rendered["nodes"].as_array().unwrap().len(), 3);
}
