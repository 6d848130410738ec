//! Shared fixtures for engine tests
//!
//! Provides small trees built from [`ElementSpec`] and a [`MockNode`]
//! provider that counts property reads, for checking how much of a tree a
//! condition touches.

#![allow(dead_code)]

use axcheck_core::{
    ControlType, ElementSpec, ElementTree, Node, NodeId, NodeRef, PatternPropertyId, PropertyId,
    PropertyLookup, PropertyValue,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Weak};

/// Window (1)
/// ├── Group (2)
/// │   ├── Button "A" focusable (3)
/// │   ├── Button "B" (4)
/// │   └── Button "C" focusable (5)
/// └── List (6)
///     └── ListItem (7)
///         └── Text "leaf" (8)
pub fn sample_tree() -> ElementTree {
    let spec = ElementSpec::new(ControlType::Window)
        .with_name("Main")
        .with_child(
            ElementSpec::new(ControlType::Group)
                .with_child(button("A").with_focusable(true))
                .with_child(button("B").with_focusable(false))
                .with_child(button("C").with_focusable(true)),
        )
        .with_child(
            ElementSpec::new(ControlType::List).with_child(
                ElementSpec::new(ControlType::ListItem)
                    .with_child(ElementSpec::new(ControlType::Text).with_name("leaf")),
            ),
        );
    ElementTree::from_spec(&spec).expect("valid fixture")
}

pub fn button(name: &str) -> ElementSpec {
    ElementSpec::new(ControlType::Button).with_name(name)
}

/// A chain of `depth` nested groups under a window
pub fn chain(depth: usize) -> ElementTree {
    let mut spec = ElementSpec::new(ControlType::Text);
    for _ in 0..depth {
        spec = ElementSpec::new(ControlType::Group).with_child(spec);
    }
    ElementTree::from_spec(&ElementSpec::new(ControlType::Window).with_child(spec))
        .expect("valid fixture")
}

/// A window with `n` buttons
pub fn wide(n: usize) -> ElementTree {
    let spec = ElementSpec::new(ControlType::Window)
        .with_children((0..n).map(|i| button(&format!("b{}", i))));
    ElementTree::from_spec(&spec).expect("valid fixture")
}

pub fn node(tree: &ElementTree, id: u64) -> NodeRef {
    tree.find(NodeId(id)).expect("node in fixture")
}

/// Provider that records how often its properties are read
pub struct MockNode {
    id: NodeId,
    control_type: ControlType,
    properties: HashMap<PropertyId, PropertyValue>,
    parent: Weak<MockNode>,
    children: Vec<Arc<MockNode>>,
    reads: AtomicU32,
}

impl MockNode {
    /// A parent with one child per entry of `child_types`
    pub fn family(parent_type: ControlType, child_types: &[ControlType]) -> Arc<MockNode> {
        Arc::new_cyclic(|weak| MockNode {
            id: NodeId(1),
            control_type: parent_type,
            properties: HashMap::new(),
            parent: Weak::new(),
            children: child_types
                .iter()
                .enumerate()
                .map(|(i, &control_type)| {
                    Arc::new(MockNode {
                        id: NodeId(i as u64 + 2),
                        control_type,
                        properties: HashMap::from([(
                            PropertyId::Name,
                            PropertyValue::String(format!("child {}", i)),
                        )]),
                        parent: weak.clone(),
                        children: Vec::new(),
                        reads: AtomicU32::new(0),
                    })
                })
                .collect(),
            reads: AtomicU32::new(0),
        })
    }

    pub fn child(&self, index: usize) -> Arc<MockNode> {
        Arc::clone(&self.children[index])
    }

    /// Property reads on this node so far
    pub fn reads(&self) -> u32 {
        self.reads.load(Ordering::Relaxed)
    }
}

impl Node for MockNode {
    fn id(&self) -> NodeId {
        self.id
    }

    fn control_type(&self) -> ControlType {
        self.control_type
    }

    fn property(&self, id: PropertyId) -> PropertyLookup<'_> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        match self.properties.get(&id) {
            Some(value) => PropertyLookup::Present(value),
            None => PropertyLookup::Absent,
        }
    }

    fn pattern_property(&self, _id: PatternPropertyId) -> PropertyLookup<'_> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        PropertyLookup::Absent
    }

    fn parent(&self) -> Option<NodeRef> {
        self.parent.upgrade().map(|p| p as NodeRef)
    }

    fn children(&self) -> Vec<NodeRef> {
        self.children.iter().map(|c| Arc::clone(c) as NodeRef).collect()
    }
}

/// Route engine logs through the test harness output
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("axcheck=debug")
        .try_init();
}
