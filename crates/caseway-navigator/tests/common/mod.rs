//! Shared helpers for navigator integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use caseway_config::ProcessDef;
use caseway_gateway::{GatewayFilter, GatewayFilterRegistry};
use caseway_navigator::ProcessNavigator;
use caseway_process::ProcessGraph;

fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(format!("{}.json", name))
}

/// Load a process definition from `tests/fixtures/{name}.json`.
pub fn fixture(name: &str) -> ProcessDef {
  ProcessDef::from_path(fixture_path(name)).expect("failed to load fixture")
}

/// Build a navigator over a definition with the given filters registered.
pub fn navigator_for(def: ProcessDef, filters: Vec<Arc<dyn GatewayFilter>>) -> ProcessNavigator {
  let graph = ProcessGraph::from_def(def).expect("fixture should be a valid process");
  let registry = GatewayFilterRegistry::new(filters).expect("filters should not collide");
  ProcessNavigator::new(Arc::new(graph), Arc::new(registry))
}

/// Build a navigator over a named fixture.
pub fn navigator(name: &str, filters: Vec<Arc<dyn GatewayFilter>>) -> ProcessNavigator {
  navigator_for(fixture(name), filters)
}
