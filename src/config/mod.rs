//! Site configuration stored in `config.json`.
//!
//! The config is a flat JSON object. Only `template` is required; every
//! other key is site-wide data made available to the template.
//!
//! # Example
//!
//! ```json
//! {
//!     "site_title": "htmlocto",
//!     "site_url": "https://example.com",
//!     "template": "template.html"
//! }
//! ```

pub mod defaults;
mod error;
mod paths;

pub use error::ConfigError;
pub use paths::SitePaths;

use crate::utils::fs::{read_file, write_file};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, ser::PrettyFormatter};
use std::path::{Path, PathBuf};

/// Root configuration, an ordered `key -> value` mapping.
///
/// Keys keep the order they were inserted or read in, so a saved config
/// reads back the same way a user wrote it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteConfig {
    entries: Map<String, Value>,
}

impl SiteConfig {
    /// Parse configuration from a JSON string.
    ///
    /// Anything other than a JSON object is rejected.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(ConfigError::Json)
    }

    /// Load configuration from file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = read_file(path)?;
        Self::from_str(&content)
    }

    /// Write configuration as JSON indented by four spaces.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        write_file(path, &self.to_json_pretty()?)?;
        Ok(())
    }

    fn to_json_pretty(&self) -> Result<String, ConfigError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser).map_err(ConfigError::Encode)?;
        // serde_json only ever emits UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Set `key`, replacing any previous value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Location of the page template, as written in the config.
    pub fn template_path(&self) -> Result<PathBuf, ConfigError> {
        match self.get(defaults::TEMPLATE_KEY) {
            Some(Value::String(path)) => Ok(PathBuf::from(path)),
            _ => Err(ConfigError::MissingTemplate),
        }
    }

    /// Every entry rendered as substitution text, in config order.
    pub fn text_entries(&self) -> impl Iterator<Item = (&str, String)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value_to_text(value)))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for SiteConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut config = Self::default();
        for (key, value) in iter {
            config.insert(key, value);
        }
        config
    }
}

/// Text a config value contributes to a page.
///
/// Strings are used verbatim, `null` is empty, everything else is its JSON form.
fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
