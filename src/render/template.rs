//! Flat `${name}` template substitution.
//!
//! A template is literal text with two kinds of `$` constructs:
//!
//! | Syntax    | Meaning                                  |
//! |-----------|------------------------------------------|
//! | `${name}` | value of `name` from the page context    |
//! | `$$`      | a literal `$`                            |
//!
//! `name` is `[_A-Za-z][_A-Za-z0-9]*`. Any other `$` is rejected when the
//! template is parsed, so substitution itself can only fail on a missing key.

use super::PageContext;
use crate::utils::fs::read_file;
use regex::Regex;
use std::{path::Path, sync::LazyLock};
use thiserror::Error;

/// Template errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("invalid placeholder in template: line {line}, col {col}")]
    InvalidPlaceholder { line: usize, col: usize },

    #[error("placeholder `${{{0}}}` is used in the template but not set by the page front matter or config")]
    MissingKey(String),
}

static RE_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:(?P<escaped>\$)|\{(?P<braced>[_A-Za-z][_A-Za-z0-9]*)\}|(?P<invalid>))").unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// Parsed template: literal text interleaved with named placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse template text.
    ///
    /// Reports the 1-based line and column of the first malformed `$`.
    pub fn parse(text: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut last = 0;

        for caps in RE_PLACEHOLDER.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            literal.push_str(&text[last..whole.start()]);
            last = whole.end();

            if caps.name("escaped").is_some() {
                literal.push('$');
            } else if let Some(name) = caps.name("braced") {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Placeholder(name.as_str().to_owned()));
            } else {
                let (line, col) = line_col(text, whole.start());
                return Err(TemplateError::InvalidPlaceholder { line, col });
            }
        }

        literal.push_str(&text[last..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Read and parse a template file.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let text = read_file(path)?;
        Self::parse(&text).map_err(|source| crate::Error::Template {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replace every placeholder with its value from `context`.
    ///
    /// Keys in `context` the template never mentions are ignored.
    pub fn substitute(&self, context: &PageContext) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    let value = context
                        .get(name)
                        .ok_or_else(|| TemplateError::MissingKey(name.clone()))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

/// 1-based line and column (in chars) of byte offset `pos`.
fn line_col(text: &str, pos: usize) -> (usize, usize) {
    let before = &text[..pos];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let col = before[line_start..].chars().count() + 1;
    (line, col)
}
