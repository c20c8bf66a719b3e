//! The Markdown renderer.
//!
//! [`MarkdownProcessor`] converts normalized Markdown into an HTML fragment
//! with a fixed, enumerated set of extensions: pipe tables, fenced code
//! blocks (plain `<pre><code>` with a CSS class hook, no tokenization),
//! heading anchors with permalinks, `[TOC]` generation, footnotes,
//! attribute lists, definition lists and abbreviations. The extension set
//! is fixed per call site, not user-configurable at runtime.
use std::{collections::HashMap, sync::LazyLock};

use comrak::{
  Arena,
  format_html,
  nodes::{AstNode, NodeHeading, NodeValue},
  options::Options,
  parse_document,
};
use regex::Regex;

use crate::{
  extensions,
  types::{Header, MarkdownResult},
  utils,
};

/// The rendered form of a literal `[TOC]` paragraph in the source.
const TOC_MARKER: &str = "<p>[TOC]</p>";

/// Options for configuring the Markdown renderer.
#[derive(Debug, Clone)]
#[allow(
  clippy::struct_excessive_bools,
  reason = "Config struct with related boolean flags"
)]
pub struct MarkdownOptions {
  /// Pipe-delimited tables.
  pub tables: bool,

  /// Footnote markers rendered as linked references.
  pub footnotes: bool,

  /// Term/definition pairs rendered as `<dl>` lists.
  pub definition_lists: bool,

  /// Trailing `{: ...}` annotations attach attributes to the preceding
  /// block.
  pub attribute_lists: bool,

  /// `*[ABBR]: expansion` definitions wrap later occurrences in `<abbr>`.
  pub abbreviations: bool,

  /// Append a permalink anchor to every heading.
  pub heading_permalinks: bool,

  /// Title attribute for the permalink anchor.
  pub permalink_title: Option<String>,

  /// Render soft line breaks as `<br>`.
  pub hard_breaks: bool,
}

impl Default for MarkdownOptions {
  fn default() -> Self {
    Self {
      tables:             true,
      footnotes:          true,
      definition_lists:   true,
      attribute_lists:    true,
      abbreviations:      true,
      heading_permalinks: true,
      permalink_title:    Some("連結到此標題".to_string()),
      hard_breaks:        false,
    }
  }
}

/// Builder for constructing [`MarkdownOptions`] with method chaining.
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptionsBuilder {
  options: MarkdownOptions,
}

impl MarkdownOptionsBuilder {
  /// Create a new builder with the default extension set.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Enable or disable pipe tables.
  #[must_use]
  pub const fn tables(mut self, enabled: bool) -> Self {
    self.options.tables = enabled;
    self
  }

  /// Enable or disable footnotes.
  #[must_use]
  pub const fn footnotes(mut self, enabled: bool) -> Self {
    self.options.footnotes = enabled;
    self
  }

  /// Enable or disable definition lists.
  #[must_use]
  pub const fn definition_lists(mut self, enabled: bool) -> Self {
    self.options.definition_lists = enabled;
    self
  }

  /// Enable or disable attribute lists.
  #[must_use]
  pub const fn attribute_lists(mut self, enabled: bool) -> Self {
    self.options.attribute_lists = enabled;
    self
  }

  /// Enable or disable abbreviation expansion.
  #[must_use]
  pub const fn abbreviations(mut self, enabled: bool) -> Self {
    self.options.abbreviations = enabled;
    self
  }

  /// Enable or disable heading permalink anchors.
  #[must_use]
  pub const fn heading_permalinks(mut self, enabled: bool) -> Self {
    self.options.heading_permalinks = enabled;
    self
  }

  /// Set the permalink anchor title.
  #[must_use]
  pub fn permalink_title<S: Into<String>>(mut self, title: Option<S>) -> Self {
    self.options.permalink_title = title.map(Into::into);
    self
  }

  /// Enable or disable hard line breaks.
  #[must_use]
  pub const fn hard_breaks(mut self, enabled: bool) -> Self {
    self.options.hard_breaks = enabled;
    self
  }

  /// Build the final [`MarkdownOptions`].
  #[must_use]
  pub fn build(self) -> MarkdownOptions {
    self.options
  }
}

/// Main Markdown renderer.
#[derive(Debug, Clone)]
pub struct MarkdownProcessor {
  options: MarkdownOptions,
}

impl MarkdownProcessor {
  /// Create a new `MarkdownProcessor` with the given options.
  #[must_use]
  pub const fn new(options: MarkdownOptions) -> Self {
    Self { options }
  }

  /// Access processor options.
  #[must_use]
  pub const fn options(&self) -> &MarkdownOptions {
    &self.options
  }

  /// Render Markdown to an HTML fragment, extracting headings and title.
  #[must_use]
  pub fn render(&self, markdown: &str) -> MarkdownResult {
    let (source, abbrs) = if self.options.abbreviations {
      extensions::collect_abbreviations(markdown)
    } else {
      (markdown.to_string(), Vec::new())
    };

    let (headers, title) = self.extract_headers(&source);
    let mut html = self.convert_to_html(&source);

    html = self.assign_heading_anchors(&html, &headers);

    if self.options.attribute_lists {
      html = extensions::apply_paragraph_attrs(&html);
    }

    html = extensions::mark_code_blocks(&html);

    if !abbrs.is_empty() {
      html = extensions::apply_abbreviations(&html, &abbrs);
    }

    if html.contains(TOC_MARKER) {
      html = html.replace(TOC_MARKER, &extensions::toc_html(&headers));
    }

    MarkdownResult {
      html,
      headers,
      title,
    }
  }

  /// Extract headings and title from the markdown content.
  ///
  /// Every heading receives a unique, stable anchor id: an explicit
  /// trailing `{#id}` annotation when present, otherwise the slugified
  /// heading text, deduplicated with a numeric suffix.
  #[must_use]
  pub fn extract_headers(&self, content: &str) -> (Vec<Header>, Option<String>) {
    let arena = Arena::new();
    let options = self.comrak_options();
    let root = parse_document(&arena, content, &options);

    let mut headers = Vec::new();
    let mut found_title = None;
    let mut seen_ids: HashMap<String, usize> = HashMap::new();

    for node in root.descendants() {
      if let NodeValue::Heading(NodeHeading { level, .. }) =
        &node.data.borrow().value
      {
        let raw_text = extract_inline_text(node);

        let (text, explicit_id) =
          match extensions::split_trailing_attrs(raw_text.trim_end()) {
            Some((clean, attrs)) => (clean, attrs.id),
            None => (raw_text.trim_end().to_string(), None),
          };

        let id = explicit_id.unwrap_or_else(|| {
          let slug = utils::slugify(&text);
          let count = seen_ids.entry(slug.clone()).or_insert(0);
          let unique = if *count == 0 {
            slug
          } else {
            format!("{slug}-{count}")
          };
          *count += 1;
          unique
        });

        if *level == 1 && found_title.is_none() {
          found_title = Some(text.clone());
        }
        headers.push(Header {
          text,
          level: *level,
          id,
        });
      }
    }

    (headers, found_title)
  }

  /// Convert markdown to HTML using comrak and the configured options.
  fn convert_to_html(&self, content: &str) -> String {
    let arena = Arena::new();
    let options = self.comrak_options();
    let root = parse_document(&arena, content, &options);

    let mut html_output = String::new();
    format_html(root, &options, &mut html_output).unwrap_or_default();
    html_output
  }

  /// Assign anchor ids (and permalink affordances) to rendered headings.
  ///
  /// Headings appear in the HTML in the same order they were extracted, so
  /// the two sequences are zipped positionally. Trailing annotation text
  /// left in the rendered heading is stripped here.
  fn assign_heading_anchors(&self, html: &str, headers: &[Header]) -> String {
    static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
      Regex::new(r"(?s)<h([1-6])>(.*?)</h[1-6]>").unwrap_or_else(|e| {
        log::error!("Failed to compile HEADING_RE regex: {e}");
        utils::never_matching_regex()
      })
    });

    let mut index = 0;
    HEADING_RE
      .replace_all(html, |caps: &regex::Captures| {
        let Some(header) = headers.get(index) else {
          return caps[0].to_string();
        };
        index += 1;

        let level = &caps[1];
        let inner = caps[2].trim_end();

        let (clean_inner, attr_text) =
          match extensions::split_trailing_attrs(inner) {
            Some((clean, attrs)) => (clean, attrs.to_attr_text()),
            None => (inner.to_string(), String::new()),
          };

        let permalink = if self.options.heading_permalinks {
          let title_attr = self
            .options
            .permalink_title
            .as_ref()
            .map_or_else(String::new, |t| format!(" title=\"{t}\""));
          format!(
            "<a class=\"headerlink\" href=\"#{}\"{title_attr}>\u{b6}</a>",
            header.id
          )
        } else {
          String::new()
        };

        format!(
          "<h{level} id=\"{}\"{attr_text}>{clean_inner}{permalink}</h{level}>",
          header.id
        )
      })
      .into_owned()
  }

  /// Build comrak options from [`MarkdownOptions`].
  fn comrak_options(&self) -> Options<'_> {
    let mut options = Options::default();
    options.extension.table = self.options.tables;
    options.extension.footnotes = self.options.footnotes;
    options.extension.description_lists = self.options.definition_lists;
    // Anchor ids are assigned in a dedicated pass
    options.extension.header_ids = None;
    options.render.r#unsafe = true;
    options.render.hardbreaks = self.options.hard_breaks;
    options
  }
}

/// Extract all inline text from a heading node.
fn extract_inline_text<'a>(node: &'a AstNode<'a>) -> String {
  let mut text = String::new();
  for child in node.children() {
    match &child.data.borrow().value {
      NodeValue::Text(t) => text.push_str(t),
      NodeValue::Code(t) => text.push_str(&t.literal),
      NodeValue::Link(..)
      | NodeValue::Emph
      | NodeValue::Strong
      | NodeValue::Strikethrough => {
        text.push_str(&extract_inline_text(child));
      },
      _ => {},
    }
  }
  text
}
