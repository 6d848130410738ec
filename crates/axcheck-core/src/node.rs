//! Read-only node interface consumed by the engine
//!
//! A provider (a live platform tree, a snapshot loader, a test fixture)
//! implements [`Node`]. The engine only reads through this trait; nothing
//! here offers a way to change the tree.

use crate::types::{ControlType, NodeId, PatternId, PatternPropertyId, PropertyId};
use crate::value::{PropertyLookup, Rect};
use std::sync::Arc;

/// Shared handle to a node, used for tree-relative traversal
pub type NodeRef = Arc<dyn Node>;

/// One item in an accessibility tree
pub trait Node: Send + Sync {
    /// Identity of this node within the current scan
    fn id(&self) -> NodeId;

    /// Control type of this node
    fn control_type(&self) -> ControlType;

    /// Look up a property by identifier
    fn property(&self, id: PropertyId) -> PropertyLookup<'_>;

    /// Look up a property exposed through a control pattern
    fn pattern_property(&self, id: PatternPropertyId) -> PropertyLookup<'_>;

    /// Parent node, if any
    fn parent(&self) -> Option<NodeRef>;

    /// Children in order
    fn children(&self) -> Vec<NodeRef>;

    fn name(&self) -> Option<&str> {
        self.property(PropertyId::Name).str().ok()
    }

    fn bounding_rectangle(&self) -> Option<Rect> {
        self.property(PropertyId::BoundingRectangle).rect().ok()
    }

    fn is_keyboard_focusable(&self) -> bool {
        self.flag(PropertyId::IsKeyboardFocusable)
    }

    fn is_offscreen(&self) -> bool {
        self.flag(PropertyId::IsOffscreen)
    }

    fn is_enabled(&self) -> bool {
        self.flag(PropertyId::IsEnabled)
    }

    fn is_content_element(&self) -> bool {
        self.flag(PropertyId::IsContentElement)
    }

    fn is_control_element(&self) -> bool {
        self.flag(PropertyId::IsControlElement)
    }

    /// Whether the node reports the pattern as available
    fn supports_pattern(&self, pattern: PatternId) -> bool {
        self.flag(pattern.availability_property())
    }

    /// Read a boolean property, treating anything but `true` as false
    fn flag(&self, id: PropertyId) -> bool {
        self.property(id).bool().ok().unwrap_or(false)
    }
}

/// Walk the ancestors of `node`, nearest first
pub fn ancestors(node: &dyn Node) -> Ancestors {
    Ancestors {
        next: node.parent(),
    }
}

/// Iterator over ancestors, nearest first
pub struct Ancestors {
    next: Option<NodeRef>,
}

impl Iterator for Ancestors {
    type Item = NodeRef;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}

/// Collect `node` and all of its descendants in depth-first pre-order
pub fn depth_first(node: &NodeRef) -> Vec<NodeRef> {
    let mut out = Vec::new();
    let mut stack = vec![Arc::clone(node)];

    while let Some(current) = stack.pop() {
        let children = current.children();
        stack.extend(children.into_iter().rev());
        out.push(current);
    }

    out
}
