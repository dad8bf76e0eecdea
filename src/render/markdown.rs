//! Markdown to HTML conversion with front matter support.
//!
//! Uses pulldown-cmark with GFM extensions (tables, strikethrough, task
//! lists, footnotes). The renderer is reused across pages; it remembers the
//! front matter of the last conversion until [`MarkdownRenderer::reset`].

use super::{
    MAIN_CONTENT, PageMetadata,
    front_matter::{self, FrontMatter},
};
use crate::log;
use pulldown_cmark::{Options, Parser, html::push_html};

/// Reusable Markdown converter.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: Options,
    meta: FrontMatter,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_FOOTNOTES,
            meta: FrontMatter::default(),
        }
    }

    /// Convert a page to HTML, keeping its front matter for [`Self::meta`].
    ///
    /// The front matter block is not part of the returned HTML. Trailing
    /// newlines are trimmed.
    pub fn convert(&mut self, text: &str) -> String {
        let (meta, body) = front_matter::split(text);
        self.meta = meta;

        let parser = Parser::new_ext(&body, self.options);
        let mut html = String::with_capacity(body.len() * 2);
        push_html(&mut html, parser);

        let len = html.trim_end_matches('\n').len();
        html.truncate(len);
        html
    }

    /// Front matter of the last conversion.
    pub fn meta(&self) -> &FrontMatter {
        &self.meta
    }

    /// Forget everything from the last conversion.
    pub fn reset(&mut self) {
        self.meta.clear();
    }
}

/// Render a page into its metadata mapping.
///
/// The result holds one entry per front matter field (first value only) plus
/// `main_content` with the body HTML. `renderer` is reset afterwards.
pub fn render_markdown(text: &str, renderer: &mut MarkdownRenderer) -> PageMetadata {
    let html = renderer.convert(text);

    let mut page = PageMetadata::new();
    for (key, values) in renderer.meta().iter() {
        if key == MAIN_CONTENT {
            log!("warn"; "front matter field `{MAIN_CONTENT}` is reserved for the page body, ignored");
            continue;
        }
        if values.len() > 1 {
            log!("warn"; "front matter field `{key}` has {} values, only the first is used", values.len());
        }
        if let Some(first) = values.first() {
            page.insert(key.to_owned(), first.clone());
        }
    }
    page.insert(MAIN_CONTENT.to_owned(), html);

    renderer.reset();
    page
}
