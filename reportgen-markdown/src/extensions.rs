//! Post-render extension passes over the HTML fragment.
//!
//! Everything here is element-local and regex-shaped: attribute-list
//! annotations, abbreviation expansion, the `highlight` class hook for code
//! blocks, and table-of-contents markup built from extracted headings.
use std::{fmt::Write as _, sync::LazyLock};

use regex::Regex;

use crate::{types::Header, utils};

/// Attributes parsed from a trailing `{: ...}` (or `{#id}`) annotation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AttrList {
  pub id:      Option<String>,
  pub classes: Vec<String>,
  pub pairs:   Vec<(String, String)>,
}

impl AttrList {
  /// Parse the inside of an annotation, e.g. `: #id .class key=value`.
  fn parse(body: &str) -> Self {
    let mut attrs = Self::default();
    for token in body.trim_start_matches(':').split_whitespace() {
      if let Some(id) = token.strip_prefix('#') {
        if !id.is_empty() {
          attrs.id = Some(id.to_string());
        }
      } else if let Some(class) = token.strip_prefix('.') {
        if !class.is_empty() {
          attrs.classes.push(class.to_string());
        }
      } else if let Some((key, value)) = token.split_once('=') {
        attrs
          .pairs
          .push((key.to_string(), value.trim_matches('"').to_string()));
      }
    }
    attrs
  }

  /// Render as HTML attribute text (leading space included), without an
  /// `id` — the caller decides which id wins.
  #[must_use]
  pub fn to_attr_text(&self) -> String {
    let mut out = String::new();
    if !self.classes.is_empty() {
      let _ = write!(out, " class=\"{}\"", self.classes.join(" "));
    }
    for (key, value) in &self.pairs {
      let _ = write!(out, " {key}=\"{value}\"");
    }
    out
  }
}

static TRAILING_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\s*\{(:[^{}]*|#[A-Za-z0-9_-]+)\}\s*$").unwrap_or_else(|e| {
    log::error!("Failed to compile TRAILING_ATTR_RE regex: {e}");
    utils::never_matching_regex()
  })
});

/// Split a trailing attribute annotation off a text fragment.
///
/// Recognizes the full form `{: #id .class key=value}` and the `{#id}`
/// shorthand. Returns the text without the annotation plus the parsed
/// attributes, or `None` when no annotation is present.
#[must_use]
pub fn split_trailing_attrs(text: &str) -> Option<(String, AttrList)> {
  let m = TRAILING_ATTR_RE.find(text)?;
  let body = text[m.start()..m.end()]
    .trim()
    .trim_start_matches('{')
    .trim_end_matches('}');
  let attrs = AttrList::parse(body);
  Some((text[..m.start()].trim_end().to_string(), attrs))
}

static PARAGRAPH_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?s)<p>(.*?)</p>").unwrap_or_else(|e| {
    log::error!("Failed to compile PARAGRAPH_RE regex: {e}");
    utils::never_matching_regex()
  })
});

/// Attach attribute-list annotations found on the final line of a
/// paragraph to the `<p>` element itself.
#[must_use]
pub fn apply_paragraph_attrs(html: &str) -> String {
  PARAGRAPH_RE
    .replace_all(html, |caps: &regex::Captures| {
      let inner = &caps[1];
      match split_trailing_attrs(inner) {
        Some((clean, attrs)) => {
          let id_attr = attrs
            .id
            .as_ref()
            .map_or_else(String::new, |id| format!(" id=\"{id}\""));
          format!("<p{id_attr}{}>{clean}</p>", attrs.to_attr_text())
        },
        None => caps[0].to_string(),
      }
    })
    .into_owned()
}

static ABBR_DEF_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?m)^\*\[([^\]]+)\]:[ \t]*(.*)[ \t]*$").unwrap_or_else(|e| {
    log::error!("Failed to compile ABBR_DEF_RE regex: {e}");
    utils::never_matching_regex()
  })
});

/// Collect `*[ABBR]: expansion` definition lines and strip them from the
/// source. Later definitions of the same abbreviation win.
#[must_use]
pub fn collect_abbreviations(content: &str) -> (String, Vec<(String, String)>) {
  let mut abbrs: Vec<(String, String)> = Vec::new();

  for caps in ABBR_DEF_RE.captures_iter(content) {
    let term = caps[1].trim().to_string();
    let expansion = caps[2].trim().to_string();
    if let Some(existing) = abbrs.iter_mut().find(|(t, _)| *t == term) {
      existing.1 = expansion;
    } else {
      abbrs.push((term, expansion));
    }
  }

  let stripped = ABBR_DEF_RE.replace_all(content, "").into_owned();
  (stripped, abbrs)
}

/// Wrap occurrences of defined abbreviations in `<abbr>` elements.
///
/// Only text outside of tags and outside `<code>`/`<pre>` content is
/// rewritten.
#[must_use]
pub fn apply_abbreviations(html: &str, abbrs: &[(String, String)]) -> String {
  if abbrs.is_empty() {
    return html.to_string();
  }

  let patterns: Vec<(Regex, String)> = abbrs
    .iter()
    .filter_map(|(term, expansion)| {
      let pattern = format!(r"\b{}\b", regex::escape(term));
      match Regex::new(&pattern) {
        Ok(re) => {
          let title = expansion
            .replace('&', "&amp;")
            .replace('"', "&quot;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
          Some((re, format!("<abbr title=\"{title}\">{term}</abbr>")))
        },
        Err(e) => {
          log::warn!("Skipping abbreviation {term}: {e}");
          None
        },
      }
    })
    .collect();

  let mut out = String::with_capacity(html.len());
  let mut rest = html;
  let mut code_depth = 0_usize;

  while let Some(tag_start) = rest.find('<') {
    let text = &rest[..tag_start];
    if code_depth == 0 {
      let mut replaced = text.to_string();
      for (re, replacement) in &patterns {
        replaced = re.replace_all(&replaced, replacement.as_str()).into_owned();
      }
      out.push_str(&replaced);
    } else {
      out.push_str(text);
    }

    let Some(tag_len) = rest[tag_start..].find('>') else {
      out.push_str(&rest[tag_start..]);
      return out;
    };
    let tag = &rest[tag_start..=tag_start + tag_len];
    if tag.starts_with("<code") || tag.starts_with("<pre") {
      code_depth += 1;
    } else if tag.starts_with("</code") || tag.starts_with("</pre") {
      code_depth = code_depth.saturating_sub(1);
    }
    out.push_str(tag);
    rest = &rest[tag_start + tag_len + 1..];
  }

  if code_depth == 0 {
    let mut replaced = rest.to_string();
    for (re, replacement) in &patterns {
      replaced = re.replace_all(&replaced, replacement.as_str()).into_owned();
    }
    out.push_str(&replaced);
  } else {
    out.push_str(rest);
  }

  out
}

/// Add the `highlight` class hook to fenced code blocks. No tokenization
/// happens; styling is left entirely to the stylesheet.
#[must_use]
pub fn mark_code_blocks(html: &str) -> String {
  html.replace("<pre><code", "<pre class=\"highlight\"><code")
}

/// Generate a nested table-of-contents list from extracted headings.
///
/// Only h1-h3 are included.
#[must_use]
pub fn toc_html(headers: &[Header]) -> String {
  let mut toc = String::from("<div class=\"toc\">");
  let mut depth = 0_u8;

  for header in headers {
    if header.level > 3 {
      continue;
    }

    if header.level > depth {
      while depth < header.level {
        toc.push_str("<ul>");
        depth += 1;
      }
    } else {
      toc.push_str("</li>");
      while depth > header.level {
        toc.push_str("</ul></li>");
        depth -= 1;
      }
    }

    let _ = write!(
      toc,
      "<li><a href=\"#{}\">{}</a>",
      header.id,
      header.text.trim()
    );
  }

  if depth > 0 {
    toc.push_str("</li>");
    while depth > 1 {
      toc.push_str("</ul></li>");
      depth -= 1;
    }
    toc.push_str("</ul>");
  }

  toc.push_str("</div>");
  toc
}
