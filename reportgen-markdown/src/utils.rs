//! Shared helpers for markdown text handling.
use regex::Regex;

/// Error type for utility operations.
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
  #[error("Regex compilation failed: {0}")]
  RegexError(#[from] regex::Error),
}

/// Result type for utility operations.
pub type UtilResult<T> = Result<T, UtilError>;

/// Slugify a string for use as an anchor ID.
/// Converts to lowercase, replaces non-alphanumeric characters with dashes,
/// and trims leading/trailing dashes.
#[must_use]
pub fn slugify(text: &str) -> String {
  text
    .to_lowercase()
    .replace(|c: char| !c.is_alphanumeric() && c != '-' && c != '_', "-")
    .trim_matches('-')
    .to_string()
}

/// Extract a short lead paragraph from raw markdown.
///
/// Returns the first non-empty line that is neither a heading nor a
/// `**`-emphasized line. Used as a subtitle fallback when a report carries
/// no explicit description.
#[must_use]
pub fn extract_lead_paragraph(content: &str) -> Option<String> {
  content
    .lines()
    .map(str::trim)
    .find(|line| {
      !line.is_empty() && !line.starts_with('#') && !line.starts_with("**")
    })
    .map(str::to_string)
}

/// Create a regex that never matches anything.
///
/// This is used as a fallback pattern when a regex fails to compile. It will
/// never match any input, which is safer than a trivial pattern like `^$`
/// which would match empty strings.
///
/// # Panics
///
/// Panics if the fallback regex pattern `r"^\b$"` fails to compile, which
/// should never happen.
#[must_use]
#[allow(clippy::unwrap_used, reason = "Patterns are guaranteed to be valid")]
pub fn never_matching_regex() -> Regex {
  // Asserts something impossible, so it can never match
  Regex::new(r"[^\s\S]").unwrap_or_else(|_| Regex::new(r"^\b$").unwrap())
}
