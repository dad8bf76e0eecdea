//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── SiteConfig::load()      config.json
//!     ├── Template::load()        file named by config `template`
//!     │
//!     └── for each pages/*.md     (directory listing order)
//!             read ──► render_page() ──► write output/<name>.html
//! ```
//!
//! The first failing page stops the whole build.

use crate::{
    Error, Result,
    config::{
        SiteConfig, SitePaths,
        defaults::{OUTPUT_EXT, PAGE_EXT},
    },
    log,
    render::{MarkdownRenderer, Template, render_page},
    utils::fs::{FileError, read_file, write_file},
};
use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};
use walkdir::WalkDir;

/// Outcome of a successful build.
#[derive(Debug, Clone, Copy)]
pub struct BuildSummary {
    /// Pages written
    pub pages: usize,
    /// Wall-clock time spent rendering
    pub elapsed: Duration,
}

impl fmt::Display for BuildSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "finished rendering {} page{} in {:.4} secs",
            self.pages,
            if self.pages == 1 { "" } else { "s" },
            self.elapsed.as_secs_f64()
        )
    }
}

/// A Markdown source found in the pages directory.
#[derive(Debug, Clone)]
struct PageSource {
    /// File name, e.g. `about.md`
    name: String,
    path: PathBuf,
}

impl PageSource {
    /// File name of the rendered page, e.g. `about.html`.
    fn output_name(&self) -> String {
        let stem = self.name.strip_suffix(PAGE_EXT).unwrap_or(&self.name);
        format!("{stem}{OUTPUT_EXT}")
    }
}

/// Build every page of the site.
///
/// With `flatten`, pages are written to the site root instead of `output/`.
pub fn build_site(paths: &SitePaths, flatten: bool) -> Result<BuildSummary> {
    if !paths.is_initialized() {
        return Err(Error::NotInitialized);
    }

    let config = SiteConfig::load(paths.config())?;
    let template = Template::load(&paths.resolve(&config.template_path()?))?;
    let mut renderer = MarkdownRenderer::new();
    let output_dir = paths.output_dir(flatten);

    let start = Instant::now();
    let mut pages = 0;

    for page in collect_pages(paths.pages())? {
        build_page(&page, &mut renderer, &template, &config, output_dir)?;
        pages += 1;
    }

    let summary = BuildSummary {
        pages,
        elapsed: start.elapsed(),
    };
    log!("build"; "{summary}");

    Ok(summary)
}

/// Render a single page and write it into `output_dir`.
fn build_page(
    page: &PageSource,
    renderer: &mut MarkdownRenderer,
    template: &Template,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<()> {
    let text = read_file(&page.path)?;

    log!("render"; "rendering page {}", page.name);
    let html = render_page(&text, renderer, template, config).map_err(|source| Error::Render {
        page: page.name.clone(),
        source,
    })?;

    let output_path = output_dir.join(page.output_name());
    log!("write"; "{} -> {}", page.name, output_path.display());
    write_file(&output_path, &html)?;

    Ok(())
}

/// List `*.md` regular files directly inside `dir`, unsorted.
///
/// Symlinks are resolved; dangling links and names that are not valid UTF-8
/// are skipped.
fn collect_pages(dir: &Path) -> Result<Vec<PageSource>, FileError> {
    let mut pages = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(dir).to_path_buf();
            FileError::Unreadable(path, io::Error::from(err))
        })?;

        let Some(name) = entry.file_name().to_str() else {
            log!("warn"; "skipping non UTF-8 file name {}", entry.path().display());
            continue;
        };
        if !name.ends_with(PAGE_EXT) || !is_regular_file(entry.path())? {
            continue;
        }

        pages.push(PageSource {
            name: name.to_owned(),
            path: entry.into_path(),
        });
    }

    Ok(pages)
}

/// Whether `path` is a file once symlinks are followed.
///
/// A symlink to a missing target counts as not a file.
fn is_regular_file(path: &Path) -> Result<bool, FileError> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log!("warn"; "skipping dangling link {}", path.display());
            Ok(false)
        }
        Err(err) => Err(FileError::Unreadable(path.to_path_buf(), err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::TemplateError;
    use tempfile::TempDir;

    /// Initialized site with `template.html` and the given pages.
    fn site(template: &str, pages: &[(&str, &str)]) -> (TempDir, SitePaths) {
        let dir = TempDir::new().unwrap();
        let paths = SitePaths::new(dir.path());
        fs::create_dir(paths.pages()).unwrap();
        fs::create_dir(paths.output()).unwrap();
        fs::write(
            paths.config(),
            r#"{"site_title": "htmlocto", "author": "Joel Torres", "template": "template.html"}"#,
        )
        .unwrap();
        fs::write(dir.path().join("template.html"), template).unwrap();
        for (name, text) in pages {
            fs::write(paths.pages().join(name), text).unwrap();
        }
        (dir, paths)
    }

    #[test]
    fn test_build_site() {
        let (_dir, paths) = site(
            "<title>${site_title}</title><h1>${title}</h1>\n${main_content}",
            &[
                ("index.md", "title: home\n\nwelcome"),
                ("about.md", "title: about\n\nby *me*"),
            ],
        );

        let summary = build_site(&paths, false).unwrap();

        assert_eq!(summary.pages, 2);
        assert_eq!(
            fs::read_to_string(paths.output().join("index.html")).unwrap(),
            "<title>htmlocto</title><h1>home</h1>\n<p>welcome</p>"
        );
        assert_eq!(
            fs::read_to_string(paths.output().join("about.html")).unwrap(),
            "<title>htmlocto</title><h1>about</h1>\n<p>by <em>me</em></p>"
        );
    }

    #[test]
    fn test_build_site_skips_non_pages() {
        let (_dir, paths) = site("${main_content}", &[("page.md", "x"), ("notes.txt", "y")]);
        fs::create_dir(paths.pages().join("drafts.md")).unwrap();
        fs::write(paths.pages().join("drafts.md").join("nested.md"), "z").unwrap();

        let summary = build_site(&paths, false).unwrap();

        assert_eq!(summary.pages, 1);
        let mut written: Vec<_> = fs::read_dir(paths.output())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        written.sort();
        assert_eq!(written, vec!["page.html"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_build_site_skips_dangling_links() {
        use std::os::unix::fs::symlink;

        let (dir, paths) = site("${main_content}", &[("a.md", "hello")]);
        let missing = dir.path().join("missing");
        symlink(&missing, paths.pages().join("notes.txt")).unwrap();
        symlink(&missing, paths.pages().join("gone.md")).unwrap();

        let summary = build_site(&paths, false).unwrap();

        assert_eq!(summary.pages, 1);
        assert_eq!(
            fs::read_to_string(paths.output().join("a.html")).unwrap(),
            "<p>hello</p>"
        );
        assert!(!paths.output().join("gone.html").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_build_site_follows_page_links() {
        use std::os::unix::fs::symlink;

        let (dir, paths) = site("${main_content}", &[]);
        let source = dir.path().join("shared.md");
        fs::write(&source, "linked").unwrap();
        symlink(&source, paths.pages().join("linked.md")).unwrap();

        let summary = build_site(&paths, false).unwrap();

        assert_eq!(summary.pages, 1);
        assert_eq!(
            fs::read_to_string(paths.output().join("linked.html")).unwrap(),
            "<p>linked</p>"
        );
    }

    #[test]
    fn test_unreadable_page_stops_build() {
        let (_dir, paths) = site("${main_content}", &[("good.md", "fine")]);
        fs::write(paths.pages().join("bad.md"), [0x66, 0xff, 0xfe, 0x0a]).unwrap();

        let err = build_site(&paths, false).unwrap_err();

        assert_eq!(err.stage(), "read_file");
        match err {
            Error::File(FileError::Unreadable(path, _)) => {
                assert_eq!(path, paths.pages().join("bad.md"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!paths.output().join("bad.html").exists());
    }

    #[test]
    fn test_build_site_flatten_to_root() {
        let (dir, paths) = site("${main_content}", &[("post.md", "hello")]);

        build_site(&paths, true).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("post.html")).unwrap(),
            "<p>hello</p>"
        );
        assert!(!paths.output().join("post.html").exists());
    }

    #[test]
    fn test_build_site_empty_pages_dir() {
        let (_dir, paths) = site("${main_content}", &[]);

        let summary = build_site(&paths, false).unwrap();

        assert_eq!(summary.pages, 0);
    }

    #[test]
    fn test_missing_placeholder_writes_nothing() {
        let (_dir, paths) = site("<h1>${title}</h1>${main_content}", &[("untitled.md", "no title")]);

        let err = build_site(&paths, false).unwrap_err();

        assert_eq!(err.stage(), "render_html");
        match err {
            Error::Render { page, source } => {
                assert_eq!(page, "untitled.md");
                assert_eq!(source, TemplateError::MissingKey("title".into()));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!paths.output().join("untitled.html").exists());
    }

    #[test]
    fn test_not_initialized() {
        let dir = TempDir::new().unwrap();
        let paths = SitePaths::new(dir.path());

        assert!(matches!(build_site(&paths, false), Err(Error::NotInitialized)));
    }

    #[test]
    fn test_invalid_template() {
        let (_dir, paths) = site("<p>$main_content</p>", &[("a.md", "x")]);

        let err = build_site(&paths, false).unwrap_err();

        assert_eq!(err.stage(), "load_template");
        assert!(matches!(
            err,
            Error::Template {
                source: TemplateError::InvalidPlaceholder { line: 1, col: 4 },
                ..
            }
        ));
    }

    #[test]
    fn test_missing_template_file() {
        let (dir, paths) = site("${main_content}", &[]);
        fs::remove_file(dir.path().join("template.html")).unwrap();

        let err = build_site(&paths, false).unwrap_err();

        assert!(matches!(err, Error::File(FileError::NotFound(_))));
        assert!(err.to_string().contains("template.html"));
    }

    #[test]
    fn test_invalid_config() {
        let (_dir, paths) = site("${main_content}", &[]);
        fs::write(paths.config(), "{ not json").unwrap();

        let err = build_site(&paths, false).unwrap_err();

        assert_eq!(err.stage(), "load_config");
        assert!(err.to_string().contains("check for valid JSON"));
    }

    #[test]
    fn test_output_name() {
        let page = |name: &str| PageSource {
            name: name.into(),
            path: PathBuf::from(name),
        };

        assert_eq!(page("about.md").output_name(), "about.html");
        assert_eq!(page("v1.md.backup.md").output_name(), "v1.md.backup.html");
        assert_eq!(page(".md").output_name(), ".html");
    }

    #[test]
    fn test_summary_message() {
        let one = BuildSummary {
            pages: 1,
            elapsed: Duration::from_micros(1234),
        };
        let many = BuildSummary {
            pages: 3,
            elapsed: Duration::from_millis(1500),
        };

        assert_eq!(one.to_string(), "finished rendering 1 page in 0.0012 secs");
        assert_eq!(many.to_string(), "finished rendering 3 pages in 1.5000 secs");
    }
}
