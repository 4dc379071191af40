//! Error types for process navigation.

use caseway_gateway::FilterError;
use thiserror::Error;

/// Errors that can occur while finding the next task.
///
/// None of these are transient; retrying with the same input gives the same
/// answer.
#[derive(Debug, Error)]
pub enum NavigationError {
  /// The caller supplied a node id that is not in the process.
  #[error("node '{0}' not found in process")]
  NodeNotFound(String),

  /// A gateway filtered out every outgoing flow.
  #[error("No next element selected from {origin}: gateway '{gateway}' left no outgoing flow")]
  ZeroPaths { origin: String, gateway: String },

  /// More than one flow remained after filtering and default resolution.
  #[error(
    "Multiple next elements found from {origin}. Please supply action and filters or define a default flow."
  )]
  MultiplePaths {
    origin: String,
    /// The gateway (or node) where the ambiguity was found.
    node_id: String,
    /// Ids of the flows still in contention.
    candidates: Vec<String>,
  },

  /// A chain of gateways led back to a gateway already visited.
  #[error("cycle detected navigating from {origin}: gateway '{gateway}' reached twice")]
  CycleDetected { origin: String, gateway: String },

  /// A gateway filter failed.
  #[error("gateway filter failed: {0}")]
  Filter(#[from] FilterError),

  /// Navigation was cancelled while a filter was running.
  #[error("navigation cancelled")]
  Cancelled,
}

impl NavigationError {
  /// True for the errors caused by gateway ambiguity rather than a broken
  /// definition or caller.
  pub fn is_ambiguity(&self) -> bool {
    matches!(
      self,
      NavigationError::ZeroPaths { .. } | NavigationError::MultiplePaths { .. }
    )
  }
}
