//! Crate-level error and the stage each failure is reported under.

use crate::{config::ConfigError, render::TemplateError, utils::fs::FileError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{source} of `{}`", .path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: TemplateError,
    },

    #[error("{page}: {source}")]
    Render {
        page: String,
        #[source]
        source: TemplateError,
    },

    #[error("site has not been initialized, please run with --init first")]
    NotInitialized,

    /// Interactive setup was cancelled (Ctrl-C or end of input).
    #[error("interrupted")]
    Interrupted,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Stage name reported in the terminal error line.
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::File(err) => err.stage(),
            Self::Config(err) => err.stage(),
            Self::Template { .. } => "load_template",
            Self::Render { .. } => "render_html",
            Self::NotInitialized | Self::Other(_) => "main",
            Self::Interrupted => "init",
        }
    }

    /// Whether the failure should be reported, or exit quietly.
    pub const fn is_silent(&self) -> bool {
        matches!(self, Self::Interrupted)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
