//! In-memory element tree
//!
//! [`ElementTree`] owns its nodes through `Arc` links from parent to child;
//! each child keeps a weak link back to its parent. Trees are built from an
//! [`ElementSpec`] description, either in code or from a JSON/YAML snapshot.

use crate::error::{Error, Result};
use crate::node::{Node, NodeRef};
use crate::types::{ControlType, NodeId, PatternPropertyId, PropertyId};
use crate::value::{PropertyLookup, PropertyValue, Rect};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Weak};
use tracing::debug;

/// Description of one element and its subtree.
///
/// A property mapped to `None` is reported as present-but-null; a property
/// missing from the map is reported as absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementSpec {
    /// Explicit identity; assigned in depth-first order when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    pub control_type: ControlType,

    #[serde(default)]
    pub properties: BTreeMap<PropertyId, Option<PropertyValue>>,

    #[serde(default)]
    pub patterns: BTreeMap<PatternPropertyId, Option<PropertyValue>>,

    #[serde(default)]
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    pub fn new(control_type: ControlType) -> Self {
        Self {
            id: None,
            control_type,
            properties: BTreeMap::new(),
            patterns: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_property(mut self, id: PropertyId, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(id, Some(value.into()));
        self
    }

    /// Report the property as present with no value
    pub fn with_null_property(mut self, id: PropertyId) -> Self {
        self.properties.insert(id, None);
        self
    }

    pub fn with_pattern_property(
        mut self,
        id: PatternPropertyId,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.patterns.insert(id, Some(value.into()));
        self
    }

    pub fn with_name(self, name: &str) -> Self {
        self.with_property(PropertyId::Name, name)
    }

    pub fn with_rect(self, rect: Rect) -> Self {
        self.with_property(PropertyId::BoundingRectangle, rect)
    }

    pub fn with_focusable(self, focusable: bool) -> Self {
        self.with_property(PropertyId::IsKeyboardFocusable, focusable)
    }

    pub fn with_child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = ElementSpec>) -> Self {
        self.children.extend(children);
        self
    }

    fn count(&self) -> usize {
        1 + self.children.iter().map(ElementSpec::count).sum::<usize>()
    }
}

/// A node of an [`ElementTree`]
#[derive(Debug)]
pub struct Element {
    id: NodeId,
    control_type: ControlType,
    properties: BTreeMap<PropertyId, Option<PropertyValue>>,
    patterns: BTreeMap<PatternPropertyId, Option<PropertyValue>>,
    parent: Weak<Element>,
    children: Vec<Arc<Element>>,
}

impl Node for Element {
    fn id(&self) -> NodeId {
        self.id
    }

    fn control_type(&self) -> ControlType {
        self.control_type
    }

    fn property(&self, id: PropertyId) -> PropertyLookup<'_> {
        lookup(&self.properties, &id)
    }

    fn pattern_property(&self, id: PatternPropertyId) -> PropertyLookup<'_> {
        lookup(&self.patterns, &id)
    }

    fn parent(&self) -> Option<NodeRef> {
        self.parent.upgrade().map(|p| p as NodeRef)
    }

    fn children(&self) -> Vec<NodeRef> {
        self.children
            .iter()
            .map(|c| Arc::clone(c) as NodeRef)
            .collect()
    }
}

fn lookup<'a, K: Ord>(
    map: &'a BTreeMap<K, Option<PropertyValue>>,
    key: &K,
) -> PropertyLookup<'a> {
    match map.get(key) {
        Some(Some(value)) => PropertyLookup::Present(value),
        Some(None) => PropertyLookup::Null,
        None => PropertyLookup::Absent,
    }
}

/// An owned, immutable element tree
#[derive(Debug, Clone)]
pub struct ElementTree {
    root: Arc<Element>,
    len: usize,
}

impl ElementTree {
    /// Build a tree from a specification
    pub fn from_spec(spec: &ElementSpec) -> Result<Self> {
        let mut builder = Builder {
            next_id: 1,
            seen: HashSet::with_capacity(spec.count()),
            duplicate: None,
        };
        let root = builder.build(spec, Weak::new());

        if let Some(id) = builder.duplicate {
            return Err(Error::snapshot(format!("duplicate node id {}", id)));
        }

        let len = builder.seen.len();
        debug!(nodes = len, "Built element tree");
        Ok(Self { root, len })
    }

    /// Build a tree from a JSON snapshot
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: ElementSpec = serde_json::from_str(json)?;
        Self::from_spec(&spec)
    }

    /// Build a tree from a YAML snapshot
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let spec: ElementSpec = serde_yaml::from_str(yaml)?;
        Self::from_spec(&spec)
    }

    /// Load a snapshot file; `.yaml`/`.yml` files are read as YAML, anything
    /// else as JSON
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Root node
    pub fn root(&self) -> NodeRef {
        Arc::clone(&self.root) as NodeRef
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Find a node by identity
    pub fn find(&self, id: NodeId) -> Option<NodeRef> {
        let mut stack = vec![Arc::clone(&self.root)];
        while let Some(current) = stack.pop() {
            if current.id == id {
                return Some(current as NodeRef);
            }
            stack.extend(current.children.iter().cloned());
        }
        None
    }
}

struct Builder {
    next_id: u64,
    seen: HashSet<u64>,
    duplicate: Option<u64>,
}

impl Builder {
    fn build(&mut self, spec: &ElementSpec, parent: Weak<Element>) -> Arc<Element> {
        let id = match spec.id {
            Some(id) => id,
            None => {
                while self.seen.contains(&self.next_id) {
                    self.next_id += 1;
                }
                self.next_id
            }
        };
        if !self.seen.insert(id) && self.duplicate.is_none() {
            self.duplicate = Some(id);
        }

        Arc::new_cyclic(|me| Element {
            id: NodeId(id),
            control_type: spec.control_type,
            properties: spec.properties.clone(),
            patterns: spec.patterns.clone(),
            parent,
            children: spec
                .children
                .iter()
                .map(|child| self.build(child, me.clone()))
                .collect(),
        })
    }
}
