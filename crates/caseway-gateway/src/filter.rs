use async_trait::async_trait;
use caseway_process::SequenceFlow;

use crate::case::CaseData;
use crate::error::FilterError;

/// Per-gateway information handed to a filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayContext {
  /// The gateway being resolved.
  pub gateway_id: String,
  /// The node the whole navigation request started from.
  pub originating_node_id: String,
  /// Action token supplied by the caller, if any.
  pub action: Option<String>,
}

impl GatewayContext {
  pub fn new(
    gateway_id: impl Into<String>,
    originating_node_id: impl Into<String>,
    action: Option<&str>,
  ) -> Self {
    Self {
      gateway_id: gateway_id.into(),
      originating_node_id: originating_node_id.into(),
      action: action.map(str::to_string),
    }
  }
}

/// Narrows the outgoing flows of one gateway.
///
/// Implementations return the flows that remain viable. Returning the input
/// unchanged, a subset, or nothing are all valid; flows that were not in the
/// input are ignored by the navigator. Filters must not mutate the case.
#[async_trait]
pub trait GatewayFilter: Send + Sync {
  /// Id of the gateway this filter is registered for.
  fn gateway_id(&self) -> &str;

  async fn filter(
    &self,
    flows: Vec<SequenceFlow>,
    case: &CaseData,
    context: &GatewayContext,
  ) -> Result<Vec<SequenceFlow>, FilterError>;
}
