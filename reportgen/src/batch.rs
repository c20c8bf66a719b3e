//! The batch driver: iterate the manifest, convert each report, and keep
//! going when a single entry fails.
use std::{fs, path::PathBuf};

use color_eyre::eyre::{Context as _, Result};
use log::{error, info, warn};
use reportgen_markdown::{
  MarkdownOptions,
  MarkdownProcessor,
  normalize,
  utils as markdown_utils,
};

use crate::{
  config::{Config, ReportEntry},
  html::template,
};

/// Outcome tallies for one conversion run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
  /// Entries converted and written.
  pub converted: usize,
  /// Entries skipped because the source file does not exist.
  pub missing: usize,
  /// Entries that failed while reading, rendering or writing.
  pub failed: usize,
}

impl BatchSummary {
  /// Total number of manifest entries attempted.
  #[must_use]
  pub const fn attempted(self) -> usize {
    self.converted + self.missing + self.failed
  }
}

/// Convert every report in the manifest, in order.
///
/// A failure in one entry is logged and counted; it never aborts the run.
/// The only fatal error is failing to create the output directory.
///
/// # Errors
///
/// Returns an error if the output directory cannot be created.
pub fn run(config: &Config) -> Result<BatchSummary> {
  fs::create_dir_all(&config.output_dir).wrap_err_with(|| {
    format!(
      "Failed to create output directory: {}",
      config.output_dir.display()
    )
  })?;
  info!("Output directory: {}", config.output_dir.display());

  let processor = MarkdownProcessor::new(MarkdownOptions::default());
  let mut summary = BatchSummary::default();

  info!("🚀 Converting {} research reports...", config.reports.len());

  for entry in &config.reports {
    let file_name = entry.source.file_name().map_or_else(
      || entry.source.display().to_string(),
      |name| name.to_string_lossy().into_owned(),
    );

    if !entry.source.exists() {
      warn!("❌ Missing source: {}", entry.source.display());
      summary.missing += 1;
      continue;
    }

    info!("📖 Processing: {file_name}");

    match convert_entry(config, &processor, entry) {
      Ok(output_path) => {
        info!("✅ Converted: {file_name} → {}", output_path.display());
        summary.converted += 1;
      },
      Err(e) => {
        error!("❌ Failed: {file_name}: {e:#}");
        summary.failed += 1;
      },
    }
  }

  info!(
    "✨ Finished: {} converted, {} missing, {} failed",
    summary.converted, summary.missing, summary.failed
  );

  Ok(summary)
}

/// Convert a single manifest entry and write the output file.
///
/// Output filename is the source filename with its extension swapped for
/// `.html`.
fn convert_entry(
  config: &Config,
  processor: &MarkdownProcessor,
  entry: &ReportEntry,
) -> anyhow::Result<PathBuf> {
  let raw = anyhow::Context::with_context(fs::read_to_string(&entry.source), || {
    format!("Failed to read markdown file: {}", entry.source.display())
  })?;

  let normalized = normalize::strip_internal_links(&raw);
  let result = processor.render(&normalized);

  let description = entry
    .description
    .clone()
    .or_else(|| markdown_utils::extract_lead_paragraph(&normalized));

  let html = template::render(&entry.title, description.as_deref(), &result.html)?;

  let output_name = entry
    .source
    .file_stem()
    .map_or_else(|| PathBuf::from("report"), PathBuf::from)
    .with_extension("html");
  let output_path = config.output_dir.join(output_name);

  anyhow::Context::with_context(fs::write(&output_path, html), || {
    format!("Failed to write output HTML: {}", output_path.display())
  })?;

  Ok(output_path)
}
