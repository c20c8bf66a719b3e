use std::io;

use thiserror::Error;

/// Error type for manifest/config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Manifest error: {0}")]
  Manifest(String),

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("Serde error: {0}")]
  Serde(#[from] serde_json::Error),

  #[error("TOML error: {0}")]
  Toml(#[from] toml::de::Error),
}
