use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
  #[error("node not found: {0}")]
  NodeNotFound(String),

  #[error("sequence flow not found: {0}")]
  FlowNotFound(String),

  #[error("duplicate node id: {node_id}")]
  DuplicateNode { node_id: String },

  #[error("duplicate sequence flow id: {flow_id}")]
  DuplicateFlow { flow_id: String },

  #[error("sequence flow '{flow_id}' references unknown node '{node_id}'")]
  DanglingFlow { flow_id: String, node_id: String },

  #[error("node '{node_id}' has more than one default flow: {flow_ids:?}")]
  MultipleDefaults {
    node_id: String,
    flow_ids: Vec<String>,
  },
}
