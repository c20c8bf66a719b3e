//! # reportgen-markdown
//!
//! Markdown processing for the research report publisher: a content
//! normalizer that strips links to unpublished internal documents, and a
//! renderer that turns the normalized Markdown into an HTML fragment with
//! a fixed extension set.
//!
//! ## Quick Start
//!
//! ```rust
//! use reportgen_markdown::{MarkdownOptions, MarkdownProcessor, normalize};
//!
//! let source = "# 動能策略\n\nSee [the plan](plan.md).";
//! let normalized = normalize::strip_internal_links(source);
//!
//! let processor = MarkdownProcessor::new(MarkdownOptions::default());
//! let result = processor.render(&normalized);
//!
//! assert!(result.html.contains("[相關檔案]"));
//! assert_eq!(result.title.as_deref(), Some("動能策略"));
//! ```
//!
//! ## Extension set
//!
//! - pipe tables
//! - fenced code blocks with a `highlight` class hook (no tokenization)
//! - heading anchor ids with permalink affordances, `[TOC]` generation
//! - footnotes
//! - attribute lists (`{: #id .class}` on headings and paragraphs)
//! - definition lists
//! - abbreviations (`*[ABBR]: expansion`)

pub mod extensions;
pub mod normalize;
mod processor;
mod types;
pub mod utils;

pub use crate::{
  processor::{MarkdownOptions, MarkdownOptionsBuilder, MarkdownProcessor},
  types::{Header, MarkdownResult},
};
