use std::collections::HashMap;

use caseway_config::{NodeKindDef, ProcessDef};
use tracing::debug;

use crate::error::ProcessError;
use crate::node::{Node, NodeKind, SequenceFlow, TaskExtension};

/// Immutable process graph for traversal.
///
/// Built once with [`ProcessGraph::from_def`]; every accessor is a pure read.
#[derive(Debug, Clone)]
pub struct ProcessGraph {
  process_id: String,
  name: Option<String>,
  nodes: HashMap<String, Node>,
  /// Node ids in definition order.
  node_order: Vec<String>,
  flows: HashMap<String, SequenceFlow>,
  /// Flow ids in definition order.
  flow_order: Vec<String>,
}

impl ProcessGraph {
  /// Build and validate a graph from a process definition.
  pub fn from_def(def: ProcessDef) -> Result<Self, ProcessError> {
    let mut nodes: HashMap<String, Node> = HashMap::with_capacity(def.nodes.len());
    let mut node_order = Vec::with_capacity(def.nodes.len());

    for node_def in def.nodes {
      if nodes.contains_key(&node_def.id) {
        return Err(ProcessError::DuplicateNode {
          node_id: node_def.id,
        });
      }

      let kind = match node_def.kind {
        NodeKindDef::StartEvent => NodeKind::StartEvent,
        NodeKindDef::Task { task_type, actions } => {
          NodeKind::Task(TaskExtension { task_type, actions })
        }
        NodeKindDef::Gateway => NodeKind::Gateway,
        NodeKindDef::EndEvent => NodeKind::EndEvent,
      };

      node_order.push(node_def.id.clone());
      nodes.insert(
        node_def.id.clone(),
        Node {
          id: node_def.id,
          name: node_def.name,
          incoming: Vec::new(),
          outgoing: Vec::new(),
          kind,
        },
      );
    }

    let mut flows: HashMap<String, SequenceFlow> = HashMap::with_capacity(def.flows.len());
    let mut flow_order = Vec::with_capacity(def.flows.len());

    for flow_def in def.flows {
      if flows.contains_key(&flow_def.id) {
        return Err(ProcessError::DuplicateFlow {
          flow_id: flow_def.id,
        });
      }

      for endpoint in [&flow_def.source, &flow_def.target] {
        if !nodes.contains_key(endpoint) {
          return Err(ProcessError::DanglingFlow {
            flow_id: flow_def.id.clone(),
            node_id: endpoint.clone(),
          });
        }
      }

      // Both endpoints were checked above
      if let Some(source) = nodes.get_mut(&flow_def.source) {
        source.outgoing.push(flow_def.id.clone());
      }
      if let Some(target) = nodes.get_mut(&flow_def.target) {
        target.incoming.push(flow_def.id.clone());
      }

      flow_order.push(flow_def.id.clone());
      flows.insert(
        flow_def.id.clone(),
        SequenceFlow {
          id: flow_def.id,
          source: flow_def.source,
          target: flow_def.target,
          is_default: flow_def.is_default,
          condition: flow_def.condition,
        },
      );
    }

    for node_id in &node_order {
      let defaults: Vec<String> = nodes[node_id]
        .outgoing
        .iter()
        .filter(|flow_id| flows[*flow_id].is_default)
        .cloned()
        .collect();
      if defaults.len() > 1 {
        return Err(ProcessError::MultipleDefaults {
          node_id: node_id.clone(),
          flow_ids: defaults,
        });
      }
    }

    debug!(
      process_id = %def.process_id,
      nodes = node_order.len(),
      flows = flow_order.len(),
      "process_graph_loaded"
    );

    Ok(Self {
      process_id: def.process_id,
      name: def.name,
      nodes,
      node_order,
      flows,
      flow_order,
    })
  }

  pub fn process_id(&self) -> &str {
    &self.process_id
  }

  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }

  /// Get a node by ID.
  pub fn node(&self, node_id: &str) -> Result<&Node, ProcessError> {
    self
      .nodes
      .get(node_id)
      .ok_or_else(|| ProcessError::NodeNotFound(node_id.to_string()))
  }

  /// Get a sequence flow by ID.
  pub fn flow(&self, flow_id: &str) -> Result<&SequenceFlow, ProcessError> {
    self
      .flows
      .get(flow_id)
      .ok_or_else(|| ProcessError::FlowNotFound(flow_id.to_string()))
  }

  /// All nodes, in definition order.
  pub fn nodes(&self) -> impl Iterator<Item = &Node> {
    self.node_order.iter().map(|id| &self.nodes[id])
  }

  /// All sequence flows, in definition order.
  pub fn flows(&self) -> impl Iterator<Item = &SequenceFlow> {
    self.flow_order.iter().map(|id| &self.flows[id])
  }

  /// Outgoing flows of a node in stored order. Empty for unknown nodes.
  pub fn outgoing_flows(&self, node_id: &str) -> Vec<&SequenceFlow> {
    self.resolve_flows(self.nodes.get(node_id).map(|n| n.outgoing.as_slice()))
  }

  /// Incoming flows of a node in stored order. Empty for unknown nodes.
  pub fn incoming_flows(&self, node_id: &str) -> Vec<&SequenceFlow> {
    self.resolve_flows(self.nodes.get(node_id).map(|n| n.incoming.as_slice()))
  }

  /// The node a flow points at.
  pub fn target_node(&self, flow: &SequenceFlow) -> Result<&Node, ProcessError> {
    self.node(&flow.target)
  }

  /// The default flow leaving a node, if one is marked.
  pub fn default_flow(&self, node_id: &str) -> Option<&SequenceFlow> {
    self
      .outgoing_flows(node_id)
      .into_iter()
      .find(|flow| flow.is_default)
  }

  pub fn start_event_ids(&self) -> Vec<&str> {
    self.ids_where(Node::is_start_event)
  }

  pub fn task_ids(&self) -> Vec<&str> {
    self.ids_where(Node::is_task)
  }

  pub fn gateway_ids(&self) -> Vec<&str> {
    self.ids_where(Node::is_gateway)
  }

  pub fn end_event_ids(&self) -> Vec<&str> {
    self.ids_where(Node::is_end_event)
  }

  pub fn is_task(&self, node_id: &str) -> bool {
    self.nodes.get(node_id).is_some_and(Node::is_task)
  }

  pub fn is_gateway(&self, node_id: &str) -> bool {
    self.nodes.get(node_id).is_some_and(Node::is_gateway)
  }

  pub fn is_start_event(&self, node_id: &str) -> bool {
    self.nodes.get(node_id).is_some_and(Node::is_start_event)
  }

  pub fn is_end_event(&self, node_id: &str) -> bool {
    self.nodes.get(node_id).is_some_and(Node::is_end_event)
  }

  /// Task metadata for a task node; `None` for other kinds or unknown ids.
  pub fn task_extension(&self, node_id: &str) -> Option<&TaskExtension> {
    self.nodes.get(node_id).and_then(Node::task_extension)
  }

  fn resolve_flows(&self, flow_ids: Option<&[String]>) -> Vec<&SequenceFlow> {
    flow_ids
      .unwrap_or(&[])
      .iter()
      .filter_map(|id| self.flows.get(id))
      .collect()
  }

  fn ids_where(&self, predicate: impl Fn(&Node) -> bool) -> Vec<&str> {
    self
      .nodes()
      .filter(|node| predicate(node))
      .map(|node| node.id.as_str())
      .collect()
  }
}
