#![allow(clippy::expect_used, reason = "Panics are fine inside tests.")]
use reportgen_markdown::normalize::{
  self,
  INTERNAL_LINK_PLACEHOLDER,
};

#[test]
fn strip_internal_links_replaces_md_links() {
  let source = "Intro.\n\nSee [the full plan](weekly_plan.md) for details.";
  let result = normalize::strip_internal_links(source);

  assert!(!result.contains("weekly_plan.md"));
  assert!(!result.contains("the full plan"));
  assert!(result.contains(INTERNAL_LINK_PLACEHOLDER));
}

#[test]
fn strip_internal_links_handles_multiple_links_per_line() {
  let source = "[a](x.md) and [b](y.md) and [c](z.md)";
  let result = normalize::strip_internal_links(source);

  assert!(!result.contains(".md)"));
  assert_eq!(result.matches(INTERNAL_LINK_PLACEHOLDER).count(), 3);
}

#[test]
fn strip_internal_links_handles_relative_paths() {
  let source = "See [notes](../planning/2026/notes.md).";
  let result = normalize::strip_internal_links(source);

  assert!(!result.contains("notes.md"));
  assert!(result.contains(INTERNAL_LINK_PLACEHOLDER));
}

#[test]
fn strip_internal_links_leaves_other_links_alone() {
  let source =
    "[external](https://example.com/page.html) and [image](chart.png)";
  let result = normalize::strip_internal_links(source);

  assert_eq!(result, source);
}

#[test]
fn strip_internal_links_with_custom_extension() {
  let source = "[plan](plan.markdown) stays, [other](other.md) stays too";
  let result =
    normalize::strip_internal_links_with_extension(source, "markdown")
      .expect("pattern should compile");

  assert!(!result.contains("plan.markdown"));
  assert!(result.contains("other.md"));
  assert!(result.contains(INTERNAL_LINK_PLACEHOLDER));
}

#[test]
fn collapse_fence_info_rewrites_opening_fences_only() {
  let source = "```rust\nfn main() {}\n```\n\ntext\n\n```\nplain\n```\n";
  let result = normalize::collapse_fence_info(source, "python");

  // Both opening fences get the fixed tag; closing fences stay bare
  assert_eq!(result.matches("```python").count(), 2);
  assert_eq!(result.matches("```").count(), 4);
  assert!(!result.contains("```rust"));
}

#[test]
fn collapse_fence_info_preserves_code_content() {
  let source = "```js\nconst x = 1;\n```\n";
  let result = normalize::collapse_fence_info(source, "python");

  assert!(result.contains("const x = 1;"));
}
