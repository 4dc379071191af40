use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Read-only view of the case being navigated.
///
/// The navigator forwards this to gateway filters untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseData {
  #[serde(default)]
  pub instance_id: String,
  /// Flat string values set on the case, e.g. choices made in a form.
  #[serde(default)]
  pub data_values: BTreeMap<String, String>,
  /// Arbitrary case payload.
  #[serde(default)]
  pub data: serde_json::Value,
}

impl CaseData {
  pub fn new(instance_id: impl Into<String>) -> Self {
    Self {
      instance_id: instance_id.into(),
      ..Self::default()
    }
  }

  pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.data_values.insert(key.into(), value.into());
    self
  }

  pub fn with_data(mut self, data: serde_json::Value) -> Self {
    self.data = data;
    self
  }

  pub fn data_value(&self, key: &str) -> Option<&str> {
    self.data_values.get(key).map(String::as_str)
  }
}
