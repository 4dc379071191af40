//! Error types for gateway filtering.

use thiserror::Error;

/// Errors raised while building a [`crate::GatewayFilterRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
  /// Two filters were registered for the same gateway.
  #[error("more than one filter registered for gateway '{gateway_id}'")]
  DuplicateGateway { gateway_id: String },
}

/// A filter could not decide, e.g. because a data lookup failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("filter for gateway '{gateway_id}' failed: {message}")]
pub struct FilterError {
  pub gateway_id: String,
  pub message: String,
}

impl FilterError {
  pub fn new(gateway_id: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      gateway_id: gateway_id.into(),
      message: message.into(),
    }
  }
}
