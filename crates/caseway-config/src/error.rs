use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading a process definition.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// The definition file could not be read.
  #[error("failed to read process definition '{path}': {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The definition is not valid JSON for a `ProcessDef`.
  #[error("invalid JSON process definition: {0}")]
  Json(#[from] serde_json::Error),

  /// The definition is not valid YAML for a `ProcessDef`.
  #[error("invalid YAML process definition: {0}")]
  Yaml(#[from] serde_yaml::Error),
}
