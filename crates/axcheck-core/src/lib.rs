//! axcheck Core
//!
//! Core types shared across the axcheck accessibility rule engine.
//!
//! This crate provides:
//! - The read-only [`Node`] interface the engine evaluates against
//! - Property, control type and pattern identifiers with typed lookups
//! - An in-memory [`ElementTree`] provider built from snapshots
//! - Evaluation codes and status aggregation
//! - The [`BoundedCounter`] guard for capping traversal cost
//! - Error types and result handling

pub mod error;
pub mod guard;
pub mod node;
pub mod status;
pub mod tree;
pub mod types;
pub mod value;

pub use error::{Error, Result};
pub use guard::BoundedCounter;
pub use node::{ancestors, depth_first, Ancestors, Node, NodeRef};
pub use status::{aggregate, aggregate_codes, Aggregate, EvaluationCode, ScanStatus};
pub use tree::{Element, ElementSpec, ElementTree};
pub use types::{
    heading, landmark, ControlType, NodeId, PatternId, PatternPropertyId, PropertyId, RuleId,
};
pub use value::{PropertyLookup, PropertyValue, Rect, TypedRead};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::node::{Node, NodeRef};
    pub use crate::status::{EvaluationCode, ScanStatus};
    pub use crate::tree::{ElementSpec, ElementTree};
    pub use crate::types::{ControlType, PatternPropertyId, PropertyId, RuleId};
    pub use crate::value::{PropertyValue, Rect};
}
