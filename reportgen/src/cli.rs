use std::path::PathBuf;

use clap::Parser;

/// Command line interface for reportgen.
///
/// Running with no flags loads `reports.toml` from the current directory
/// and converts the entire manifest.
#[derive(Parser, Debug)]
#[command(author, version, about = "reportgen: research report HTML publisher")]
pub struct Cli {
  /// Path to the manifest file (TOML or JSON)
  #[arg(short = 'c', long = "config", default_value = "reports.toml")]
  pub config: PathBuf,

  /// Override the output directory from the manifest
  #[arg(short, long)]
  pub output_dir: Option<PathBuf>,

  /// Enable verbose debug logging
  #[arg(short, long)]
  pub verbose: bool,
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
