//! Built-in names for the site layout.
//!
//! None of these are configurable: a site is always a working directory
//! with `config.json`, `pages/` and `output/` at its top level.

use std::path::PathBuf;

pub fn config_file() -> PathBuf {
    "config.json".into()
}

pub fn pages() -> PathBuf {
    "pages".into()
}

pub fn output() -> PathBuf {
    "output".into()
}

/// Template picked up by `--init` without prompting.
pub fn template() -> PathBuf {
    "template.html".into()
}

/// Extension of page sources.
pub const PAGE_EXT: &str = ".md";

/// Extension of rendered pages.
pub const OUTPUT_EXT: &str = ".html";

/// Key holding the template location in `config.json`.
pub const TEMPLATE_KEY: &str = "template";
