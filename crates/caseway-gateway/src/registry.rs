use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::RegistryError;
use crate::filter::GatewayFilter;

/// How a gateway's candidate flows are narrowed.
#[derive(Clone)]
pub enum GatewayStrategy {
  /// No filter registered; only the default flow can break a tie.
  BuiltinDefault,
  /// A host-supplied filter.
  Custom(Arc<dyn GatewayFilter>),
}

impl fmt::Debug for GatewayStrategy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GatewayStrategy::BuiltinDefault => f.write_str("BuiltinDefault"),
      GatewayStrategy::Custom(filter) => f.debug_tuple("Custom").field(&filter.gateway_id()).finish(),
    }
  }
}

/// Immutable mapping from gateway id to its filter.
///
/// Registering two filters for the same gateway id is rejected when the
/// registry is built.
#[derive(Clone, Default)]
pub struct GatewayFilterRegistry {
  filters: HashMap<String, Arc<dyn GatewayFilter>>,
}

impl GatewayFilterRegistry {
  /// Build a registry from a list of filters.
  pub fn new(
    filters: impl IntoIterator<Item = Arc<dyn GatewayFilter>>,
  ) -> Result<Self, RegistryError> {
    let mut map: HashMap<String, Arc<dyn GatewayFilter>> = HashMap::new();

    for filter in filters {
      let gateway_id = filter.gateway_id().to_string();
      if map.contains_key(&gateway_id) {
        return Err(RegistryError::DuplicateGateway { gateway_id });
      }
      debug!(gateway_id = %gateway_id, "gateway_filter_registered");
      map.insert(gateway_id, filter);
    }

    Ok(Self { filters: map })
  }

  /// A registry with no filters; every gateway uses its default flow.
  pub fn empty() -> Self {
    Self::default()
  }

  pub fn builder() -> GatewayFilterRegistryBuilder {
    GatewayFilterRegistryBuilder::default()
  }

  /// Look up the strategy for a gateway.
  pub fn resolve(&self, gateway_id: &str) -> GatewayStrategy {
    match self.filters.get(gateway_id) {
      Some(filter) => GatewayStrategy::Custom(filter.clone()),
      None => GatewayStrategy::BuiltinDefault,
    }
  }

  pub fn contains(&self, gateway_id: &str) -> bool {
    self.filters.contains_key(gateway_id)
  }

  /// Registered gateway ids, sorted.
  pub fn gateway_ids(&self) -> Vec<&str> {
    let mut ids: Vec<&str> = self.filters.keys().map(String::as_str).collect();
    ids.sort_unstable();
    ids
  }

  pub fn len(&self) -> usize {
    self.filters.len()
  }

  pub fn is_empty(&self) -> bool {
    self.filters.is_empty()
  }
}

impl fmt::Debug for GatewayFilterRegistry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("GatewayFilterRegistry")
      .field("gateways", &self.gateway_ids())
      .finish()
  }
}

/// Collects filters before freezing them into a [`GatewayFilterRegistry`].
#[derive(Default)]
pub struct GatewayFilterRegistryBuilder {
  filters: Vec<Arc<dyn GatewayFilter>>,
}

impl GatewayFilterRegistryBuilder {
  pub fn register(self, filter: impl GatewayFilter + 'static) -> Self {
    self.register_arc(Arc::new(filter))
  }

  pub fn register_arc(mut self, filter: Arc<dyn GatewayFilter>) -> Self {
    self.filters.push(filter);
    self
  }

  pub fn build(self) -> Result<GatewayFilterRegistry, RegistryError> {
    GatewayFilterRegistry::new(self.filters)
  }
}
