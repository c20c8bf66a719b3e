#![allow(clippy::expect_used, reason = "Panics are fine inside tests.")]
use std::{fs, path::PathBuf};

use reportgen::{
  batch,
  config::{Config, ReportEntry},
};
use tempfile::TempDir;

fn entry(source: PathBuf, title: &str) -> ReportEntry {
  ReportEntry {
    source,
    title: title.to_string(),
    description: None,
  }
}

#[test]
fn end_to_end_conversion_of_a_report() {
  let tmp = TempDir::new().expect("tempdir");
  let source = tmp.path().join("momentum.md");
  fs::write(
    &source,
    "# Title\n\nSome [link](other.md) here.\n\n| a | b |\n|---|---|\n| 1 | \
     2 |\n",
  )
  .expect("write source");

  let config = Config {
    output_dir: tmp.path().join("out"),
    reports:    vec![entry(source, "動能研究")],
  };

  let summary = batch::run(&config).expect("batch should run");
  assert_eq!(summary.converted, 1);
  assert_eq!(summary.attempted(), 1);

  let html = fs::read_to_string(tmp.path().join("out/momentum.html"))
    .expect("output file should exist");

  assert!(html.contains("<h1 id=\"title\">"));
  assert!(html.contains("[相關檔案]"));
  assert!(!html.contains("other.md"));
  assert!(html.contains("<table>"));
  assert_eq!(html.matches("<th>").count(), 2);
  assert_eq!(html.matches("<td>").count(), 2);
}

#[test]
fn missing_source_is_skipped_and_batch_continues() {
  let tmp = TempDir::new().expect("tempdir");
  let present = tmp.path().join("present.md");
  fs::write(&present, "# Present\n\nBody.\n").expect("write source");

  let config = Config {
    output_dir: tmp.path().join("out"),
    reports:    vec![
      entry(tmp.path().join("nope.md"), "Missing"),
      entry(present, "Present"),
    ],
  };

  let summary = batch::run(&config).expect("batch should run");
  assert_eq!(summary.missing, 1);
  assert_eq!(summary.converted, 1);
  assert_eq!(summary.failed, 0);

  assert!(!tmp.path().join("out/nope.html").exists());
  assert!(tmp.path().join("out/present.html").exists());
}

#[test]
fn unreadable_entry_fails_in_isolation() {
  let tmp = TempDir::new().expect("tempdir");

  let broken = tmp.path().join("broken.md");
  // Invalid UTF-8, so read_to_string fails for this entry only
  fs::write(&broken, [0xff, 0xfe, 0x00, 0x80]).expect("write source");

  let good = tmp.path().join("good.md");
  fs::write(&good, "# Good\n\nFine.\n").expect("write source");

  let config = Config {
    output_dir: tmp.path().join("out"),
    reports:    vec![entry(broken, "Broken"), entry(good, "Good")],
  };

  let summary = batch::run(&config).expect("batch should run");
  assert_eq!(summary.failed, 1);
  assert_eq!(summary.converted, 1);

  assert!(!tmp.path().join("out/broken.html").exists());
  let html = fs::read_to_string(tmp.path().join("out/good.html"))
    .expect("output file should exist");
  assert!(html.contains("<h1 id=\"good\">"));
}

#[test]
fn manifest_description_beats_lead_paragraph() {
  let tmp = TempDir::new().expect("tempdir");
  let source = tmp.path().join("desc.md");
  fs::write(&source, "# T\n\nLead paragraph here.\n").expect("write source");

  let config = Config {
    output_dir: tmp.path().join("out"),
    reports:    vec![ReportEntry {
      source:      source.clone(),
      title:       "T".to_string(),
      description: Some("Explicit description".to_string()),
    }],
  };

  batch::run(&config).expect("batch should run");
  let html = fs::read_to_string(tmp.path().join("out/desc.html"))
    .expect("output file should exist");

  assert!(html.contains("Explicit description"));

  // Without a manifest description, the lead paragraph is the subtitle
  let config = Config {
    output_dir: tmp.path().join("out2"),
    reports:    vec![entry(source, "T")],
  };
  batch::run(&config).expect("batch should run");
  let html = fs::read_to_string(tmp.path().join("out2/desc.html"))
    .expect("output file should exist");

  assert!(html.contains("Lead paragraph here."));
}

#[test]
fn rerunning_the_batch_reproduces_identical_output() {
  let tmp = TempDir::new().expect("tempdir");
  let source = tmp.path().join("stable.md");
  fs::write(&source, "# Stable\n\nSame input, same output.\n")
    .expect("write source");

  let config = Config {
    output_dir: tmp.path().join("out"),
    reports:    vec![entry(source, "Stable")],
  };

  batch::run(&config).expect("first run");
  let first = fs::read_to_string(tmp.path().join("out/stable.html"))
    .expect("output file should exist");

  batch::run(&config).expect("second run");
  let second = fs::read_to_string(tmp.path().join("out/stable.html"))
    .expect("output file should exist");

  // Only the embedded generation date can vary between runs; within one
  // day the files are byte-identical
  assert_eq!(first, second);
}

#[test]
fn empty_manifest_still_succeeds() {
  let tmp = TempDir::new().expect("tempdir");
  let config = Config {
    output_dir: tmp.path().join("out"),
    reports:    Vec::new(),
  };

  let summary = batch::run(&config).expect("batch should run");
  assert_eq!(summary.attempted(), 0);
  assert!(tmp.path().join("out").is_dir());
}
