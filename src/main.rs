//! htmlocto - a lightweight static site generator for Markdown pages.

mod build;
mod cli;
mod config;
mod error;
mod init;
mod logger;
mod render;
mod utils;

pub use error::{Error, Result};

use build::build_site;
use clap::Parser;
use cli::Cli;
use config::SitePaths;
use init::new_site;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_silent() => ExitCode::FAILURE,
        Err(err) => {
            logger::error(err.stage(), &err);
            ExitCode::FAILURE
        }
    }
}

/// Dispatch on CLI flags. The site is always the working directory.
fn run(cli: &Cli) -> Result<()> {
    let paths = SitePaths::default();

    if cli.init {
        return new_site(&paths);
    }

    build_site(&paths, cli.root).map(|_| ())
}
