//! Caseway Process
//!
//! This crate provides the immutable process graph used by the navigator.
//! A [`ProcessGraph`] is built once from a [`caseway_config::ProcessDef`],
//! validated, and then shared read-only between concurrent navigations.
//!
//! Key differences from `caseway-config`:
//! - Node and flow ids are checked for uniqueness
//! - Every flow endpoint resolves to a node
//! - Incoming/outgoing flow lists are derived from the flow list
//! - At most one default flow leaves any node

mod error;
mod graph;
mod node;

pub use error::ProcessError;
pub use graph::ProcessGraph;
pub use node::{Node, NodeKind, SequenceFlow, TaskExtension};
