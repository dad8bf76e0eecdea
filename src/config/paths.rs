//! Path resolution for the site layout.
//!
//! ```text
//! root/
//!   ├── config.json
//!   ├── template.html      (optional)
//!   ├── pages/*.md
//!   └── output/*.html      (or root/*.html with --root)
//! ```

use super::defaults;
use std::path::{Path, PathBuf};

/// Absolute-or-relative locations of everything a run touches.
///
/// Built once from the site root; all other paths are joined onto it.
#[derive(Debug, Clone)]
pub struct SitePaths {
    root: PathBuf,
    config: PathBuf,
    pages: PathBuf,
    output: PathBuf,
}

impl SitePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config: root.join(defaults::config_file()),
            pages: root.join(defaults::pages()),
            output: root.join(defaults::output()),
            root,
        }
    }

    #[inline]
    pub fn config(&self) -> &Path {
        &self.config
    }

    #[inline]
    pub fn pages(&self) -> &Path {
        &self.pages
    }

    #[inline]
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Template `--init` uses without prompting, if present.
    pub fn default_template(&self) -> PathBuf {
        self.root.join(defaults::template())
    }

    /// Directory rendered pages are written into.
    ///
    /// With `flatten`, pages land directly in the site root.
    pub fn output_dir(&self, flatten: bool) -> &Path {
        if flatten { &self.root } else { &self.output }
    }

    /// Resolve a path taken from config or user input against the site root.
    ///
    /// Absolute paths are returned unchanged.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Whether the site has been set up with `--init`.
    pub fn is_initialized(&self) -> bool {
        self.config.is_file() && self.pages.is_dir() && self.output.is_dir()
    }
}

impl Default for SitePaths {
    fn default() -> Self {
        Self::new("")
    }
}
