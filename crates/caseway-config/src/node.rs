use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDef {
  pub id: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(flatten)]
  pub kind: NodeKindDef,
}

impl NodeDef {
  pub fn start_event(id: impl Into<String>) -> Self {
    Self::with_kind(id, NodeKindDef::StartEvent)
  }

  pub fn end_event(id: impl Into<String>) -> Self {
    Self::with_kind(id, NodeKindDef::EndEvent)
  }

  pub fn gateway(id: impl Into<String>) -> Self {
    Self::with_kind(id, NodeKindDef::Gateway)
  }

  pub fn task(id: impl Into<String>, task_type: impl Into<String>) -> Self {
    Self::with_kind(
      id,
      NodeKindDef::Task {
        task_type: Some(task_type.into()),
        actions: Vec::new(),
      },
    )
  }

  /// Set the human-readable name.
  pub fn named(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }

  /// Add permitted actions. Ignored for anything but tasks.
  pub fn with_actions<I, S>(mut self, new_actions: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    if let NodeKindDef::Task { actions, .. } = &mut self.kind {
      actions.extend(new_actions.into_iter().map(Into::into));
    }
    self
  }

  fn with_kind(id: impl Into<String>, kind: NodeKindDef) -> Self {
    Self {
      id: id.into(),
      name: None,
      kind,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKindDef {
  /// Where a process instance begins.
  StartEvent,
  /// A step a case worker or the applicant performs.
  Task {
    /// Platform task type, e.g. "data", "confirmation", "signing".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    task_type: Option<String>,
    /// Action tokens permitted while the task is active.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    actions: Vec<String>,
  },
  /// Exclusive decision point.
  Gateway,
  EndEvent,
}
