//! Cancellation of navigations while a gateway filter is running.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use caseway_navigator::{CaseData, FilterError, GatewayContext, GatewayFilter, NavigationError};
use caseway_process::SequenceFlow;
use tokio_util::sync::CancellationToken;

use common::navigator;

/// A filter backed by a lookup that never answers.
struct StalledLookup {
  calls: Arc<AtomicUsize>,
}

#[async_trait]
impl GatewayFilter for StalledLookup {
  fn gateway_id(&self) -> &str {
    "Gateway1"
  }

  async fn filter(
    &self,
    _flows: Vec<SequenceFlow>,
    _case: &CaseData,
    _context: &GatewayContext,
  ) -> Result<Vec<SequenceFlow>, FilterError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    std::future::pending::<()>().await;
    unreachable!("pending never resolves")
  }
}

/// A filter backed by a slow lookup.
struct SlowLookup;

#[async_trait]
impl GatewayFilter for SlowLookup {
  fn gateway_id(&self) -> &str {
    "Gateway1"
  }

  async fn filter(
    &self,
    flows: Vec<SequenceFlow>,
    _case: &CaseData,
    _context: &GatewayContext,
  ) -> Result<Vec<SequenceFlow>, FilterError> {
    tokio::time::sleep(Duration::from_millis(20)).await;
    Ok(flows.into_iter().filter(|f| f.id == "Flow4").collect())
  }
}

#[tokio::test]
async fn test_already_cancelled_token_stops_at_filter() {
  let calls = Arc::new(AtomicUsize::new(0));
  let navigator = navigator(
    "simple-gateway-with-join-gateway",
    vec![Arc::new(StalledLookup {
      calls: calls.clone(),
    })],
  );
  let cancel = CancellationToken::new();
  cancel.cancel();

  let err = navigator
    .get_next_task(&CaseData::default(), "Task1", None, &cancel)
    .await
    .unwrap_err();

  assert!(matches!(err, NavigationError::Cancelled));
  assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_cancel_while_filter_is_pending() {
  let calls = Arc::new(AtomicUsize::new(0));
  let navigator = navigator(
    "simple-gateway-with-join-gateway",
    vec![Arc::new(StalledLookup {
      calls: calls.clone(),
    })],
  );
  let cancel = CancellationToken::new();

  let canceller = {
    let cancel = cancel.clone();
    tokio::spawn(async move {
      tokio::time::sleep(Duration::from_millis(10)).await;
      cancel.cancel();
    })
  };

  let err = navigator
    .get_next_task(&CaseData::default(), "Task1", None, &cancel)
    .await
    .unwrap_err();
  canceller.await.unwrap();

  assert!(matches!(err, NavigationError::Cancelled));
  assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_cancellation_is_not_checked_without_filters() {
  let navigator = navigator("simple-gateway-default", vec![]);
  let cancel = CancellationToken::new();
  cancel.cancel();

  let next = navigator
    .get_next_task(&CaseData::default(), "Task1", None, &cancel)
    .await
    .unwrap()
    .unwrap();

  assert_eq!(next.id, "Task2");
}

#[tokio::test]
async fn test_slow_filter_completes_when_not_cancelled() {
  let navigator = navigator(
    "simple-gateway-with-join-gateway",
    vec![Arc::new(SlowLookup)],
  );
  let cancel = CancellationToken::new();

  let next = navigator
    .get_next_task(&CaseData::default(), "Task1", None, &cancel)
    .await
    .unwrap()
    .unwrap();

  assert_eq!(next.id, "EndEvent");
}
