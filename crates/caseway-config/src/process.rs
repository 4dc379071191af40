use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::flow::FlowDef;
use crate::node::NodeDef;

/// A process definition as written by a process designer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDef {
  pub process_id: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  pub nodes: Vec<NodeDef>,
  #[serde(default)]
  pub flows: Vec<FlowDef>,
}

impl ProcessDef {
  pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
    Ok(serde_json::from_str(content)?)
  }

  pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
  }

  /// Read a definition from disk. `.yaml` and `.yml` files are parsed as
  /// YAML, everything else as JSON.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
      Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
      _ => Self::from_json_str(&content),
    }
  }
}
