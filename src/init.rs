//! Site initialization module.
//!
//! Creates the `pages/` and `output/` directories and writes `config.json`
//! from a few interactive prompts. Safe to re-run: existing directories are
//! kept and the config is rewritten.

use crate::{
    Error, Result,
    config::{SiteConfig, SitePaths, defaults},
    log,
    utils::fs::FileError,
};
use anyhow::Context;
use std::{
    fs,
    io::{self, BufRead, Write},
    path::Path,
};

/// Set up the site structure and config at `paths`.
///
/// Ctrl-C or end of input while prompting exits non-zero and leaves no config behind.
pub fn new_site(paths: &SitePaths) -> Result<()> {
    ctrlc::set_handler(|| std::process::exit(1)).context("Failed to set Ctrl+C handler")?;

    init_site_structure(paths)?;

    let config = prompt_config(paths, &mut io::stdin().lock(), &mut io::stdout().lock())?;
    config.save(paths.config())?;
    log!("init"; "wrote {}", paths.config().display());

    Ok(())
}

/// Create the pages and output directories if they are missing.
fn init_site_structure(paths: &SitePaths) -> Result<(), FileError> {
    let dirs = [
        (paths.pages(), "put your md pages here"),
        (paths.output(), "rendered html is placed here"),
    ];

    for (dir, purpose) in dirs {
        if dir.exists() {
            continue;
        }
        fs::create_dir(dir).map_err(|err| FileError::Unwritable(dir.to_path_buf(), err))?;
        log!("init"; "created {} directory ({purpose})", dir.display());
    }

    Ok(())
}

/// Ask for the site settings and build the config from the answers.
///
/// The template is taken from `template.html` in the site root when present,
/// otherwise the user is asked until they name an existing file.
fn prompt_config(
    paths: &SitePaths,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<SiteConfig> {
    let mut config = SiteConfig::default();
    config.insert("site_title", prompt(input, output, "site title")?);
    config.insert("site_url", prompt(input, output, "site url")?);

    let template = if paths.default_template().is_file() {
        defaults::template().to_string_lossy().into_owned()
    } else {
        loop {
            let location = prompt(input, output, "template location")?;
            if paths.resolve(Path::new(&location)).is_file() {
                break location;
            }
            writeln!(output, "template not found!").context("Failed to write to stdout")?;
        }
    };
    config.insert(defaults::TEMPLATE_KEY, template);

    Ok(config)
}

/// Print `label: ` and read one line of input, without its line ending.
fn prompt(input: &mut impl BufRead, output: &mut impl Write, label: &str) -> Result<String> {
    write!(output, "{label}: ")
        .and_then(|()| output.flush())
        .context("Failed to write to stdout")?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    if read == 0 {
        return Err(Error::Interrupted);
    }

    Ok(line.trim_end_matches(['\n', '\r']).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_prompts(paths: &SitePaths, answers: &str) -> (Result<SiteConfig>, String) {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = prompt_config(paths, &mut input, &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_init_site_structure() {
        let dir = TempDir::new().unwrap();
        let paths = SitePaths::new(dir.path());

        init_site_structure(&paths).unwrap();

        assert!(paths.pages().is_dir());
        assert!(paths.output().is_dir());
    }

    #[test]
    fn test_init_site_structure_keeps_existing() {
        let dir = TempDir::new().unwrap();
        let paths = SitePaths::new(dir.path());
        fs::create_dir(paths.pages()).unwrap();
        fs::write(paths.pages().join("index.md"), "hello").unwrap();

        init_site_structure(&paths).unwrap();

        assert!(paths.pages().join("index.md").exists());
        assert!(paths.output().is_dir());
    }

    #[test]
    fn test_prompt_with_default_template() {
        let dir = TempDir::new().unwrap();
        let paths = SitePaths::new(dir.path());
        fs::write(paths.default_template(), "${main_content}").unwrap();

        let (config, output) = run_prompts(&paths, "My Site\nhttps://example.com\n");
        let config = config.unwrap();

        assert_eq!(output, "site title: site url: ");
        let expected: SiteConfig = [
            ("site_title", json!("My Site")),
            ("site_url", json!("https://example.com")),
            ("template", json!("template.html")),
        ]
        .into_iter()
        .collect();
        assert_eq!(config, expected);
    }

    #[test]
    fn test_prompt_until_template_exists() {
        let dir = TempDir::new().unwrap();
        let paths = SitePaths::new(dir.path());
        fs::create_dir(dir.path().join("layouts")).unwrap();
        fs::write(dir.path().join("layouts").join("base.html"), "${main_content}").unwrap();

        let (config, output) =
            run_prompts(&paths, "t\r\nu\r\nmissing.html\nlayouts/base.html\n");
        let config = config.unwrap();

        assert_eq!(config.get("site_title"), Some(&json!("t")));
        assert_eq!(config.template_path().unwrap().to_str(), Some("layouts/base.html"));
        assert_eq!(output.matches("template location: ").count(), 2);
        assert_eq!(output.matches("template not found!").count(), 1);
    }

    #[test]
    fn test_end_of_input_is_interrupt() {
        let dir = TempDir::new().unwrap();
        let paths = SitePaths::new(dir.path());

        let (config, _) = run_prompts(&paths, "only a title\n");

        assert!(matches!(config, Err(Error::Interrupted)));
        assert!(!paths.config().exists());
    }

    #[test]
    fn test_empty_answers_are_kept() {
        let dir = TempDir::new().unwrap();
        let paths = SitePaths::new(dir.path());
        fs::write(paths.default_template(), "").unwrap();

        let (config, _) = run_prompts(&paths, "\n\n");
        let config = config.unwrap();

        assert_eq!(config.get("site_title"), Some(&json!("")));
        assert_eq!(config.get("site_url"), Some(&json!("")));
    }
}
