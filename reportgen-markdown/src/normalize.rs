//! Content normalization applied to raw Markdown before rendering.
//!
//! Reports link freely to sibling planning documents that are never
//! published. [`strip_internal_links`] replaces those cross-links with an
//! inert placeholder label so generated pages carry no dangling references.
use std::sync::LazyLock;

use regex::Regex;

use crate::utils::{self, UtilResult};

/// Placeholder label substituted for links into unpublished markdown files.
pub const INTERNAL_LINK_PLACEHOLDER: &str = "[相關檔案]";

static INTERNAL_MD_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\[.*?\]\(.*?\.md\)").unwrap_or_else(|e| {
    log::error!(
      "Failed to compile INTERNAL_MD_LINK_RE regex: {e}\n Falling back to \
       never matching regex."
    );
    utils::never_matching_regex()
  })
});

/// Replace every Markdown link whose target ends in `.md` with
/// [`INTERNAL_LINK_PLACEHOLDER`]. The link text is discarded.
#[must_use]
pub fn strip_internal_links(content: &str) -> String {
  INTERNAL_MD_LINK_RE
    .replace_all(content, INTERNAL_LINK_PLACEHOLDER)
    .into_owned()
}

/// Like [`strip_internal_links`], but for an arbitrary markup-file
/// extension (without the leading dot).
///
/// # Errors
///
/// Returns an error if the extension produces an invalid pattern.
pub fn strip_internal_links_with_extension(
  content: &str,
  extension: &str,
) -> UtilResult<String> {
  let pattern =
    format!(r"\[.*?\]\(.*?\.{}\)", regex::escape(extension.trim_matches('.')));
  let re = Regex::new(&pattern)?;
  Ok(re.replace_all(content, INTERNAL_LINK_PLACEHOLDER).into_owned())
}

/// Rewrite the info string of every *opening* code fence to a fixed
/// language tag.
///
/// Legacy cosmetic normalization carried over from an earlier driver
/// variant. It is lossy: already-tagged blocks lose their original
/// language. Closing fences are left untouched. Off by default; nothing in
/// the conversion pipeline depends on it.
#[must_use]
pub fn collapse_fence_info(content: &str, language: &str) -> String {
  let mut out = String::with_capacity(content.len());
  let mut in_fence = false;

  for line in content.lines() {
    let trimmed = line.trim_start();
    if trimmed.starts_with("```") {
      if in_fence {
        // Closing fence: emit as-is
        out.push_str(line);
        in_fence = false;
      } else {
        let indent = &line[..line.len() - trimmed.len()];
        out.push_str(indent);
        out.push_str("```");
        out.push_str(language);
        in_fence = true;
      }
    } else {
      out.push_str(line);
    }
    out.push('\n');
  }

  out
}
