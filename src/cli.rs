//! Command-line interface definitions.

use clap::{ArgAction, Parser};

/// Lightweight static site generator
///
/// Renders every `pages/*.md` through the template named in `config.json`
/// and writes the results to `output/`.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,

    /// Initiate or re-config the site's structure and exit
    #[arg(short, long)]
    pub init: bool,

    /// Save rendered pages at the top of the execution directory
    #[arg(short, long)]
    pub root: bool,
}
