//! Process navigator implementation.

use std::collections::HashSet;
use std::sync::Arc;

use caseway_gateway::{CaseData, GatewayContext, GatewayFilterRegistry, GatewayStrategy};
use caseway_process::{Node, ProcessGraph, SequenceFlow};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::error::NavigationError;

/// Finds the next task a case moves to.
///
/// Gateways are resolved transparently: starting from a node, the navigator
/// follows flows through any chain of gateways until it reaches a task, an
/// end event, or a node with no way forward. The graph and the registry are
/// immutable, so one navigator can serve any number of concurrent calls.
#[derive(Debug, Clone)]
pub struct ProcessNavigator {
  graph: Arc<ProcessGraph>,
  registry: Arc<GatewayFilterRegistry>,
}

impl ProcessNavigator {
  pub fn new(graph: Arc<ProcessGraph>, registry: Arc<GatewayFilterRegistry>) -> Self {
    Self { graph, registry }
  }

  pub fn graph(&self) -> &ProcessGraph {
    &self.graph
  }

  pub fn registry(&self) -> &GatewayFilterRegistry {
    &self.registry
  }

  /// Find the next task, end event, or start event after `current_node_id`.
  ///
  /// Returns `Ok(None)` when the node has no outgoing flows. The returned
  /// node is never a gateway. `cancel` is observed while gateway filters run.
  #[instrument(
    name = "navigator_next_task",
    skip(self, case, cancel),
    fields(
      process_id = %self.graph.process_id(),
      instance_id = %case.instance_id,
    )
  )]
  pub async fn get_next_task(
    &self,
    case: &CaseData,
    current_node_id: &str,
    action: Option<&str>,
    cancel: &CancellationToken,
  ) -> Result<Option<Node>, NavigationError> {
    debug!(origin = %current_node_id, action = ?action, "navigation_started");

    let result = self.walk(case, current_node_id, action, cancel).await;

    match &result {
      Ok(Some(node)) => {
        info!(
          origin = %current_node_id,
          next = %node.id,
          kind = node.kind.as_str(),
          "navigation_completed"
        );
      }
      Ok(None) => {
        info!(origin = %current_node_id, "navigation_completed_without_next");
      }
      Err(e) => {
        warn!(origin = %current_node_id, error = %e, "navigation_failed");
      }
    }

    result.map(|node| node.cloned())
  }

  /// Same as [`get_next_task`](Self::get_next_task) for callers that never
  /// cancel.
  pub async fn get_next_task_uncancellable(
    &self,
    case: &CaseData,
    current_node_id: &str,
    action: Option<&str>,
  ) -> Result<Option<Node>, NavigationError> {
    self
      .get_next_task(case, current_node_id, action, &CancellationToken::new())
      .await
  }

  /// Follow flows from `origin` until a non-gateway node is reached.
  async fn walk(
    &self,
    case: &CaseData,
    origin: &str,
    action: Option<&str>,
    cancel: &CancellationToken,
  ) -> Result<Option<&Node>, NavigationError> {
    let mut current = self
      .graph
      .node(origin)
      .map_err(|_| NavigationError::NodeNotFound(origin.to_string()))?;

    let mut visited: HashSet<&str> = HashSet::new();
    if current.is_gateway() {
      visited.insert(current.id.as_str());
    }

    loop {
      let flows = self.graph.outgoing_flows(&current.id);
      if flows.is_empty() {
        return Ok(None);
      }

      let chosen = self
        .select_flow(current, flows, case, origin, action, cancel)
        .await?;

      let target = self
        .graph
        .target_node(chosen)
        .map_err(|_| NavigationError::NodeNotFound(chosen.target.clone()))?;

      if !target.is_gateway() {
        return Ok(Some(target));
      }

      if !visited.insert(target.id.as_str()) {
        return Err(NavigationError::CycleDetected {
          origin: origin.to_string(),
          gateway: target.id.clone(),
        });
      }

      debug!(from = %current.id, gateway_id = %target.id, flow_id = %chosen.id, "entering_gateway");
      current = target;
    }
  }

  /// Pick exactly one of `flows` leaving `current`.
  async fn select_flow<'g>(
    &self,
    current: &Node,
    flows: Vec<&'g SequenceFlow>,
    case: &CaseData,
    origin: &str,
    action: Option<&str>,
    cancel: &CancellationToken,
  ) -> Result<&'g SequenceFlow, NavigationError> {
    if let [only] = flows.as_slice() {
      return Ok(*only);
    }

    let mut candidates = flows.clone();

    if current.is_gateway()
      && let GatewayStrategy::Custom(filter) = self.registry.resolve(&current.id)
    {
      let context = GatewayContext::new(&current.id, origin, action);
      let offered: Vec<SequenceFlow> = flows.iter().map(|flow| (*flow).clone()).collect();

      let kept = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
          warn!(gateway_id = %current.id, "navigation cancelled during gateway filter");
          return Err(NavigationError::Cancelled);
        }
        result = filter.filter(offered, case, &context) => result?,
      };

      candidates = retain_offered(&flows, &kept);
      debug!(
        gateway_id = %current.id,
        returned = kept.len(),
        candidates = ?flow_ids(&candidates),
        "gateway_filtered"
      );
    }

    if candidates.len() > 1
      && let Some(default) = single_default(&flows)
      && candidates.iter().any(|flow| flow.id == default.id)
    {
      debug!(gateway_id = %current.id, flow_id = %default.id, "default_flow_selected");
      candidates = vec![default];
    }

    match candidates.as_slice() {
      [chosen] => {
        debug!(gateway_id = %current.id, flow_id = %chosen.id, "gateway_resolved");
        Ok(*chosen)
      }
      [] => Err(NavigationError::ZeroPaths {
        origin: origin.to_string(),
        gateway: current.id.clone(),
      }),
      _ => Err(NavigationError::MultiplePaths {
        origin: origin.to_string(),
        node_id: current.id.clone(),
        candidates: flow_ids(&candidates)
          .into_iter()
          .map(str::to_string)
          .collect(),
      }),
    }
  }
}

/// The flows from `offered` that a filter kept, in offered order.
///
/// Flows a filter made up are dropped.
fn retain_offered<'g>(offered: &[&'g SequenceFlow], kept: &[SequenceFlow]) -> Vec<&'g SequenceFlow> {
  let kept_ids: HashSet<&str> = kept.iter().map(|flow| flow.id.as_str()).collect();
  offered
    .iter()
    .filter(|flow| kept_ids.contains(flow.id.as_str()))
    .copied()
    .collect()
}

/// The default flow, when exactly one of `flows` is marked default.
fn single_default<'g>(flows: &[&'g SequenceFlow]) -> Option<&'g SequenceFlow> {
  let mut defaults = flows.iter().filter(|flow| flow.is_default);
  match (defaults.next(), defaults.next()) {
    (Some(default), None) => Some(*default),
    _ => None,
  }
}

fn flow_ids<'a>(flows: &[&'a SequenceFlow]) -> Vec<&'a str> {
  flows.iter().map(|flow| flow.id.as_str()).collect()
}
