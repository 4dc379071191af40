use serde::{Deserialize, Serialize};

/// A directed sequence flow between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowDef {
  pub id: String,
  pub source: String,
  pub target: String,
  /// Marks the flow taken when a gateway cannot otherwise decide.
  #[serde(default, skip_serializing_if = "is_false")]
  pub is_default: bool,
  /// Opaque label for gateway filters, e.g. an action name.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub condition: Option<String>,
}

impl FlowDef {
  pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      source: source.into(),
      target: target.into(),
      is_default: false,
      condition: None,
    }
  }

  /// Mark this flow as the default of its source node.
  pub fn default_flow(mut self) -> Self {
    self.is_default = true;
    self
  }

  pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
    self.condition = Some(condition.into());
    self
  }
}

fn is_false(value: &bool) -> bool {
  !*value
}
