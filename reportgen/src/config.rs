use std::{
  fs,
  path::{Path, PathBuf},
};

use color_eyre::eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{cli::Cli, error::ConfigError};

fn default_output_dir() -> PathBuf {
  PathBuf::from("report")
}

/// One source-to-output conversion job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportEntry {
  /// Path to the Markdown source file.
  pub source: PathBuf,

  /// Page title shown in the header banner and `<title>`.
  pub title: String,

  /// Optional one-line description shown under the title. When absent, the
  /// lead paragraph of the document is used instead.
  #[serde(default)]
  pub description: Option<String>,
}

/// Configuration for a conversion run: the output directory plus the
/// ordered manifest of reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
  /// Output directory for generated HTML files.
  #[serde(default = "default_output_dir")]
  pub output_dir: PathBuf,

  /// Ordered list of reports to convert.
  #[serde(default)]
  pub reports: Vec<ReportEntry>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      output_dir: default_output_dir(),
      reports:    Vec::new(),
    }
  }
}

impl Config {
  /// Create a new configuration from a manifest file.
  /// Only TOML and JSON are supported for the time being.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read, has no recognized
  /// extension, or fails to parse.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    match path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase)
      .as_deref()
    {
      Some("toml") => Ok(toml::from_str(&content)?),
      Some("json") => Ok(serde_json::from_str(&content)?),
      _ => {
        Err(ConfigError::Manifest(format!(
          "Unsupported manifest format: {}",
          path.display()
        )))
      },
    }
  }

  /// Load the manifest named by the CLI and merge CLI overrides into it.
  ///
  /// # Errors
  ///
  /// Returns an error if the manifest file is missing or unparsable.
  pub fn load(cli: &Cli) -> Result<Self> {
    if !cli.config.exists() {
      return Err(color_eyre::eyre::eyre!(
        "Manifest file does not exist: {}",
        cli.config.display()
      ));
    }

    let mut config = Self::from_file(&cli.config).wrap_err_with(|| {
      format!("Failed to load manifest from {}", cli.config.display())
    })?;

    config.merge_with_cli(cli);

    if config.reports.is_empty() {
      log::warn!("Manifest contains no reports: {}", cli.config.display());
    }

    Ok(config)
  }

  /// Merge CLI arguments into this config, prioritizing CLI values when
  /// present.
  pub fn merge_with_cli(&mut self, cli: &Cli) {
    if let Some(output_dir) = &cli.output_dir {
      self.output_dir.clone_from(output_dir);
    }
  }
}
