//! Ready-made gateway filters.
//!
//! - [`DataValuesFilter`] routes on a value stored on the case
//! - [`ActionConditionFilter`] routes on the caller's action token
//! - [`FlowIdFilter`] routes to a fixed set of flows

use std::collections::HashSet;

use async_trait::async_trait;
use caseway_process::SequenceFlow;
use tracing::trace;

use crate::case::CaseData;
use crate::error::FilterError;
use crate::filter::{GatewayContext, GatewayFilter};

/// Keeps the flow whose id equals `case.data_values[key]`.
///
/// When the key is not set on the case, no flow is kept.
#[derive(Debug, Clone)]
pub struct DataValuesFilter {
  gateway_id: String,
  key: String,
}

impl DataValuesFilter {
  pub fn new(gateway_id: impl Into<String>, key: impl Into<String>) -> Self {
    Self {
      gateway_id: gateway_id.into(),
      key: key.into(),
    }
  }
}

#[async_trait]
impl GatewayFilter for DataValuesFilter {
  fn gateway_id(&self) -> &str {
    &self.gateway_id
  }

  async fn filter(
    &self,
    flows: Vec<SequenceFlow>,
    case: &CaseData,
    _context: &GatewayContext,
  ) -> Result<Vec<SequenceFlow>, FilterError> {
    let Some(chosen) = case.data_value(&self.key) else {
      trace!(gateway_id = %self.gateway_id, key = %self.key, "data value not set");
      return Ok(Vec::new());
    };

    Ok(flows.into_iter().filter(|flow| flow.id == chosen).collect())
  }
}

/// Keeps the flows whose condition label equals the action token.
///
/// Without an action, only flows that carry no condition are kept.
#[derive(Debug, Clone)]
pub struct ActionConditionFilter {
  gateway_id: String,
}

impl ActionConditionFilter {
  pub fn new(gateway_id: impl Into<String>) -> Self {
    Self {
      gateway_id: gateway_id.into(),
    }
  }
}

#[async_trait]
impl GatewayFilter for ActionConditionFilter {
  fn gateway_id(&self) -> &str {
    &self.gateway_id
  }

  async fn filter(
    &self,
    flows: Vec<SequenceFlow>,
    _case: &CaseData,
    context: &GatewayContext,
  ) -> Result<Vec<SequenceFlow>, FilterError> {
    let action = context.action.as_deref();
    Ok(
      flows
        .into_iter()
        .filter(|flow| flow.condition.as_deref() == action)
        .collect(),
    )
  }
}

/// Keeps a fixed set of flows, regardless of the case.
#[derive(Debug, Clone)]
pub struct FlowIdFilter {
  gateway_id: String,
  flow_ids: HashSet<String>,
}

impl FlowIdFilter {
  pub fn new<I, S>(gateway_id: impl Into<String>, flow_ids: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      gateway_id: gateway_id.into(),
      flow_ids: flow_ids.into_iter().map(Into::into).collect(),
    }
  }
}

#[async_trait]
impl GatewayFilter for FlowIdFilter {
  fn gateway_id(&self) -> &str {
    &self.gateway_id
  }

  async fn filter(
    &self,
    flows: Vec<SequenceFlow>,
    _case: &CaseData,
    _context: &GatewayContext,
  ) -> Result<Vec<SequenceFlow>, FilterError> {
    Ok(
      flows
        .into_iter()
        .filter(|flow| self.flow_ids.contains(&flow.id))
        .collect(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn flow(id: &str, condition: Option<&str>) -> SequenceFlow {
    SequenceFlow {
      id: id.to_string(),
      source: "Gateway1".to_string(),
      target: format!("{}-target", id),
      is_default: false,
      condition: condition.map(str::to_string),
    }
  }

  fn flows() -> Vec<SequenceFlow> {
    vec![
      flow("Flow3", Some("confirm")),
      flow("Flow4", Some("reject")),
      flow("Flow5", None),
    ]
  }

  fn ids(flows: &[SequenceFlow]) -> Vec<&str> {
    flows.iter().map(|f| f.id.as_str()).collect()
  }

  #[tokio::test]
  async fn test_data_values_filter_selects_matching_flow() {
    let filter = DataValuesFilter::new("Gateway1", "choose");
    let case = CaseData::new("1337/abc").with_value("choose", "Flow4");
    let context = GatewayContext::new("Gateway1", "Task1", None);

    let result = filter.filter(flows(), &case, &context).await.unwrap();
    assert_eq!(ids(&result), vec!["Flow4"]);
  }

  #[tokio::test]
  async fn test_data_values_filter_missing_key_keeps_nothing() {
    let filter = DataValuesFilter::new("Gateway1", "choose");
    let context = GatewayContext::new("Gateway1", "Task1", None);

    let result = filter
      .filter(flows(), &CaseData::default(), &context)
      .await
      .unwrap();
    assert!(result.is_empty());
  }

  #[tokio::test]
  async fn test_action_condition_filter() {
    let filter = ActionConditionFilter::new("Gateway1");
    let case = CaseData::default();

    let with_action = GatewayContext::new("Gateway1", "Task1", Some("reject"));
    let result = filter.filter(flows(), &case, &with_action).await.unwrap();
    assert_eq!(ids(&result), vec!["Flow4"]);

    let without_action = GatewayContext::new("Gateway1", "Task1", None);
    let result = filter.filter(flows(), &case, &without_action).await.unwrap();
    assert_eq!(ids(&result), vec!["Flow5"]);
  }

  #[tokio::test]
  async fn test_flow_id_filter_keeps_order_of_input() {
    let filter = FlowIdFilter::new("Gateway1", ["Flow5", "Flow3"]);
    let context = GatewayContext::new("Gateway1", "Task1", None);

    let result = filter
      .filter(flows(), &CaseData::default(), &context)
      .await
      .unwrap();
    assert_eq!(ids(&result), vec!["Flow3", "Flow5"]);
  }
}
