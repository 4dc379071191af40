use serde::{Deserialize, Serialize};

/// Task metadata carried through the graph untouched.
///
/// The navigator never routes on this; it exists for the collaborators that
/// render tasks and authorize actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskExtension {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub task_type: Option<String>,
  #[serde(default)]
  pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
  StartEvent,
  Task(TaskExtension),
  Gateway,
  EndEvent,
}

impl NodeKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      NodeKind::StartEvent => "start_event",
      NodeKind::Task(_) => "task",
      NodeKind::Gateway => "gateway",
      NodeKind::EndEvent => "end_event",
    }
  }
}

/// A point in the process graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
  pub id: String,
  pub name: Option<String>,
  /// Incoming flow ids, in definition order.
  pub incoming: Vec<String>,
  /// Outgoing flow ids, in definition order.
  pub outgoing: Vec<String>,
  #[serde(flatten)]
  pub kind: NodeKind,
}

impl Node {
  pub fn is_task(&self) -> bool {
    matches!(self.kind, NodeKind::Task(_))
  }

  pub fn is_gateway(&self) -> bool {
    matches!(self.kind, NodeKind::Gateway)
  }

  pub fn is_start_event(&self) -> bool {
    matches!(self.kind, NodeKind::StartEvent)
  }

  pub fn is_end_event(&self) -> bool {
    matches!(self.kind, NodeKind::EndEvent)
  }

  /// Task metadata, if this node is a task.
  pub fn task_extension(&self) -> Option<&TaskExtension> {
    match &self.kind {
      NodeKind::Task(extension) => Some(extension),
      _ => None,
    }
  }
}

/// A directed edge between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceFlow {
  pub id: String,
  pub source: String,
  pub target: String,
  pub is_default: bool,
  /// Opaque to the navigator; gateway filters may interpret it.
  pub condition: Option<String>,
}
