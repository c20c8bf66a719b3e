//! Types for the reportgen-markdown public API.
use serde::{Deserialize, Serialize};

/// Represents a heading in a Markdown document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
  /// Heading text (inline content, no markdown formatting).
  pub text:  String,
  /// Heading level (1-6).
  pub level: u8,
  /// Generated or explicit anchor ID for the heading.
  pub id:    String,
}

/// Result of Markdown processing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarkdownResult {
  /// Rendered HTML fragment.
  pub html: String,

  /// Extracted headings (for `ToC`, navigation, etc).
  pub headers: Vec<Header>,

  /// Title of the document, if found (first H1).
  pub title: Option<String>,
}
