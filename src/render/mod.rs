//! Page rendering pipeline.
//!
//! ```text
//! page text ──► render_markdown() ──► PageMetadata ─┐
//!                                                   ├─► merge_context() ──► Template::substitute() ──► html
//!                               SiteConfig ─────────┘        (config wins)
//! ```

pub mod front_matter;
pub mod markdown;
pub mod template;

pub use markdown::{MarkdownRenderer, render_markdown};
pub use template::{Template, TemplateError};

use crate::{config::SiteConfig, log};
use std::collections::BTreeMap;

/// Key holding the HTML of the page body.
pub const MAIN_CONTENT: &str = "main_content";

/// Front matter fields of one page plus `main_content`.
pub type PageMetadata = BTreeMap<String, String>;

/// Everything a template can reference for one page.
pub type PageContext = BTreeMap<String, String>;

/// Layer the site config over a page's metadata.
///
/// For a key present in both, the config value wins. `main_content` always
/// keeps the page body.
pub fn merge_context(page: PageMetadata, config: &SiteConfig) -> PageContext {
    let mut context = page;
    for (key, value) in config.text_entries() {
        if key == MAIN_CONTENT {
            log!("warn"; "config key `{MAIN_CONTENT}` is reserved for the page body, ignored");
            continue;
        }
        context.insert(key.to_owned(), value);
    }
    context
}

/// Render one page's Markdown source into the final HTML document.
pub fn render_page(
    text: &str,
    renderer: &mut MarkdownRenderer,
    template: &Template,
    config: &SiteConfig,
) -> Result<String, TemplateError> {
    let page = render_markdown(text, renderer);
    let context = merge_context(page, config);
    template.substitute(&context)
}
