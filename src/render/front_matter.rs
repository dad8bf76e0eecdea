//! Front matter: `key: value` lines at the top of a page.
//!
//! ```text
//! title: Hello
//! tag: rust
//! tag: web            <- repeated key, second value
//!     more            <- indented continuation, third value of `tag`
//!
//! First paragraph of the page body.
//! ```
//!
//! The block may be wrapped in `---` lines. It ends at the first blank
//! line, at a `---`/`...` line, or at the first line that is neither a
//! field nor a continuation (that line stays in the body).

use regex::Regex;
use std::{collections::BTreeMap, sync::LazyLock};

static RE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ ]{0,3}(?P<key>[A-Za-z0-9_-]+):\s*(?P<value>.*)$").unwrap());

static RE_BEGIN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-{3}(?:\s.*)?$").unwrap());

static RE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:-{3}|\.{3})(?:\s.*)?$").unwrap());

static RE_CONTINUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[ ]{4,}|[ ]{0,3}\t)(?P<value>.*)$").unwrap());

/// Fields parsed from a page's front matter.
///
/// Keys are lowercase; each key keeps all of its values in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    fields: BTreeMap<String, Vec<String>>,
}

impl FrontMatter {
    /// Each key with all of its values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[cfg(test)]
    pub fn values(&self, key: &str) -> Option<&[String]> {
        self.fields.get(key).map(Vec::as_slice)
    }

    fn push(&mut self, key: &str, value: &str) {
        self.fields
            .entry(key.to_owned())
            .or_default()
            .push(value.to_owned());
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }
}

/// Split page source into its front matter and the remaining Markdown body.
///
/// Line endings are normalized to `\n` first.
pub fn split(text: &str) -> (FrontMatter, String) {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines = text.split('\n').peekable();
    let mut meta = FrontMatter::default();
    let mut key: Option<String> = None;

    if lines.peek().is_some_and(|line| RE_BEGIN.is_match(line)) {
        lines.next();
    }

    while let Some(&line) = lines.peek() {
        if line.trim().is_empty() || RE_END.is_match(line) {
            lines.next();
            break;
        }

        if let Some(caps) = RE_FIELD.captures(line) {
            let name = caps["key"].to_lowercase();
            meta.push(&name, caps["value"].trim());
            key = Some(name);
        } else if let (Some(name), Some(caps)) = (&key, RE_CONTINUATION.captures(line)) {
            meta.push(name, caps["value"].trim());
        } else {
            break;
        }
        lines.next();
    }

    let body = lines.collect::<Vec<_>>().join("\n");
    (meta, body)
}
