//! Markdown to HTML conversion for Quill.
//!
//! Wraps `pulldown-cmark` with the GFM extensions enabled (tables,
//! strikethrough, task lists). Conversion is textual: a markdown fragment in,
//! an HTML fragment out, with no knowledge of other documents or of the
//! layout the fragment ends up in.

use pulldown_cmark::{Options, Parser, html::push_html};

/// Render a markdown body to an HTML fragment.
///
/// Raw HTML blocks pass through unchanged, as CommonMark requires.
#[must_use]
pub fn render_markdown(source: &str) -> String {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(source, options);

    let mut html = String::with_capacity(source.len() * 2);
    push_html(&mut html, parser);
    html
}
