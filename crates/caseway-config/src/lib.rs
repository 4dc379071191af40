//! Caseway Config
//!
//! This crate contains the serializable process definition types for caseway.
//! These types describe a process before it is loaded into an immutable
//! `ProcessGraph` by `caseway-process`.
//!
//! Definitions can be loaded from:
//! - JSON files (`.json`)
//! - YAML files (`.yaml` / `.yml`)
//!
//! Incoming and outgoing flow lists are not part of the definition; the graph
//! loader derives them from the flow list so they cannot disagree with it.

mod error;
mod flow;
mod node;
mod process;

pub use error::ConfigError;
pub use flow::FlowDef;
pub use node::{NodeDef, NodeKindDef};
pub use process::ProcessDef;
