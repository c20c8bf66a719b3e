//! Shell assembly: wrap a rendered HTML fragment in the fixed document
//! template (head, inline CSS, header banner, content panel, footer).
use anyhow::Result;
use tera::Tera;

// Template constant - the single owner of the page shell and its CSS
const DEFAULT_TEMPLATE: &str = include_str!("../../templates/default.html");

/// Site tagline shown in `<title>` and the header subtitle.
const SITE_TAGLINE: &str = "量化交易研究報告";

/// Fixed footer attribution line.
const FOOTER_ATTRIBUTION: &str =
  "© 2026 Charlie's Quantitative Trading Research Hub";

/// Fixed footer disclaimer notice.
const FOOTER_DISCLAIMER: &str = "⚠️ 免責聲明：研究內容僅供學術參考，不構成任\
                                 何投資建議。投資有風險，請謹慎評估。";

/// Assemble a complete, self-contained HTML document.
///
/// `title` and `description` are escaped before interpolation; `content`
/// is the renderer's own output and is embedded verbatim. The subtitle
/// carries the generation date, not the authoring date of the source.
///
/// # Errors
///
/// Returns an error if the embedded template fails to parse or render.
pub fn render(
  title: &str,
  description: Option<&str>,
  content: &str,
) -> Result<String> {
  render_with_date(
    title,
    description,
    content,
    &jiff::Zoned::now().strftime("%Y-%m-%d").to_string(),
  )
}

/// [`render`] with an explicit generation date, for deterministic output.
///
/// # Errors
///
/// Returns an error if the embedded template fails to parse or render.
pub fn render_with_date(
  title: &str,
  description: Option<&str>,
  content: &str,
  date: &str,
) -> Result<String> {
  let mut tera = Tera::default();
  tera.add_raw_template("default", DEFAULT_TEMPLATE)?;

  let mut context = tera::Context::new();
  context.insert("title", &html_escape::encode_text(title));
  context.insert("tagline", SITE_TAGLINE);
  context.insert("date", date);
  context
    .insert("description", &description.map(|d| html_escape::encode_text(d)));
  context.insert("content", content);
  context.insert("attribution", FOOTER_ATTRIBUTION);
  context.insert("disclaimer", FOOTER_DISCLAIMER);

  let html = tera.render("default", &context)?;
  Ok(html)
}
