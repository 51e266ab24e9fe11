//! Site building: discovery, loading, ordering, rendering, assets.
//!
//! [`Site`] drives one full build and is then discarded. Discovery collects
//! every `*.md` file under the source root and sorts the paths
//! lexicographically, so the navigation tie-break for documents sharing a
//! `position` is reproducible across platforms rather than dependent on
//! filesystem enumeration order.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::assets::copy_assets;
use crate::document::{Document, LoadError};
use crate::nav::{nav_entries, order_documents};
use crate::renderer::{PageRenderer, RenderError};

/// Filename extension identifying source documents.
const DOCUMENT_EXT: &str = "md";

/// Directory layout for one build.
#[derive(Clone, Debug)]
pub struct SiteLayout {
    /// Root directory containing markdown sources.
    pub source_dir: PathBuf,
    /// Root directory receiving rendered pages.
    pub output_dir: PathBuf,
    /// Directory containing the layout template.
    pub template_dir: PathBuf,
    /// Static assets directory mirrored into the output tree.
    pub assets_dir: PathBuf,
}

/// Error returned when a build fails.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A source document failed to load.
    #[error("{0}")]
    Load(#[from] LoadError),
    /// The layout template could not be loaded.
    #[error("{0}")]
    Template(#[source] RenderError),
    /// A page failed to render.
    #[error("Failed to render {}: {source}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },
    /// Two documents resolved to the same output slug.
    #[error("Duplicate slug \"{slug}\": {} and {}", first.display(), second.display())]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
    /// Static assets could not be copied.
    #[error("Failed to copy static assets: {0}")]
    Assets(#[source] io::Error),
}

/// Counts reported after a successful build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Pages rendered.
    pub pages: usize,
    /// Asset files copied.
    pub assets: usize,
}

/// The document set discovered under the source root for one build.
pub struct Site {
    layout: SiteLayout,
    documents: Vec<Document>,
}

impl Site {
    /// Discover and load every document under the source root.
    ///
    /// Hidden files and directories are skipped. A missing source root
    /// yields an empty document set.
    ///
    /// # Errors
    ///
    /// Returns an error naming the failing file if any document cannot be
    /// read or has malformed front matter.
    pub fn load(layout: SiteLayout) -> Result<Self, BuildError> {
        tracing::info!(source = %layout.source_dir.display(), "Scanning site");

        let mut paths = Vec::new();
        collect_documents(&layout.source_dir, &mut paths);
        paths.sort();
        tracing::info!(count = paths.len(), "Found source documents");

        let documents = paths
            .iter()
            .map(|path| Document::load(path))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { layout, documents })
    }

    /// Documents in their current order.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Run one full build.
    ///
    /// Pages render in navigation order, each receiving the same nav list.
    /// The layout template is loaded before the first page is written, so a
    /// template error never leaves partial output behind. Static assets are
    /// mirrored only after every page rendered.
    ///
    /// # Errors
    ///
    /// Any duplicate slug, template, render or asset-copy failure aborts the
    /// build.
    pub fn build(&mut self) -> Result<BuildSummary, BuildError> {
        order_documents(&mut self.documents);
        let nav_links = nav_entries(&self.documents);

        self.check_unique_slugs()?;

        let renderer = PageRenderer::new(&self.layout.template_dir, self.layout.output_dir.clone())
            .map_err(BuildError::Template)?;

        for document in &self.documents {
            renderer
                .render(document, &nav_links)
                .map_err(|source| BuildError::Render {
                    path: document.path.clone(),
                    source,
                })?;
        }

        let assets = copy_assets(&self.layout.assets_dir, &self.layout.output_dir)
            .map_err(BuildError::Assets)?;

        tracing::info!(pages = self.documents.len(), assets, "Build complete");
        Ok(BuildSummary {
            pages: self.documents.len(),
            assets,
        })
    }

    fn check_unique_slugs(&self) -> Result<(), BuildError> {
        let mut seen: HashMap<&str, &Path> = HashMap::new();
        for document in &self.documents {
            if let Some(first) = seen.insert(document.slug.as_str(), document.path.as_path()) {
                return Err(BuildError::DuplicateSlug {
                    slug: document.slug.clone(),
                    first: first.to_path_buf(),
                    second: document.path.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Recursively collect document files under `dir`.
///
/// Hidden entries are skipped. An unreadable directory contributes nothing.
fn collect_documents(dir: &Path, paths: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.filter_map(Result::ok) {
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            collect_documents(&path, paths);
        } else if path.extension().is_some_and(|e| e == DOCUMENT_EXT) {
            paths.push(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::renderer::TEMPLATE_NAME;

    use super::*;

    const LAYOUT: &str = "<!DOCTYPE html>\n<html>\n<head><title>{{ title }}</title></head>\n<body>\n<nav>{% for link in nav_links %}<a href=\"/{{ link.slug }}/\">{{ link.title }}</a>{% endfor %}</nav>\n<main>{{ content }}</main>\n</body>\n</html>\n";

    struct Fixture {
        dir: tempfile::TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            fs::create_dir(dir.path().join("content")).unwrap();
            let templates = dir.path().join("templates");
            fs::create_dir(&templates).unwrap();
            fs::write(templates.join(TEMPLATE_NAME), LAYOUT).unwrap();
            Self { dir }
        }

        fn write_page(&self, name: &str, content: &str) {
            let path = self.dir.path().join("content").join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }

        fn layout(&self) -> SiteLayout {
            SiteLayout {
                source_dir: self.dir.path().join("content"),
                output_dir: self.dir.path().join("docs"),
                template_dir: self.dir.path().join("templates"),
                assets_dir: self.dir.path().join("statics"),
            }
        }

        fn output(&self, slug: &str) -> PathBuf {
            self.dir.path().join("docs").join(slug).join("index.html")
        }
    }

    #[test]
    fn test_build_round_trip() {
        let fx = Fixture::new();
        fx.write_page(
            "about.md",
            "---\nslug: about\ntitle: About Us\nposition: 2\n---\n# Hi\n",
        );
        fx.write_page("home.md", "---\ntitle: Home\nposition: 1\n---\nWelcome.\n");

        let mut site = Site::load(fx.layout()).unwrap();
        let summary = site.build().unwrap();

        assert_eq!(summary.pages, 2);
        let html = fs::read_to_string(fx.output("about")).unwrap();
        assert!(html.contains("<h1>Hi</h1>"));
        assert!(html.contains("<title>About Us</title>"));
        assert!(html.contains("<a href=\"/about/\">About Us</a>"));
        // position 1 sorts Home before About Us in every page's nav
        assert!(html.contains("<a href=\"/home/\">Home</a><a href=\"/about/\">About Us</a>"));
        assert!(fx.output("home").is_file());
    }

    #[test]
    fn test_build_copies_assets_after_pages() {
        let fx = Fixture::new();
        fx.write_page("page.md", "body\n");
        let statics = fx.dir.path().join("statics");
        fs::create_dir(&statics).unwrap();
        fs::write(statics.join("style.css"), "body {}").unwrap();

        let summary = Site::load(fx.layout()).unwrap().build().unwrap();

        assert_eq!(summary, BuildSummary { pages: 1, assets: 1 });
        assert!(fx.dir.path().join("docs").join("statics").join("style.css").is_file());
    }

    #[test]
    fn test_build_duplicate_slug_fails() {
        let fx = Fixture::new();
        fx.write_page("About.md", "one\n");
        fx.write_page("sub/about.md", "two\n");

        let result = Site::load(fx.layout()).unwrap().build();

        match result {
            Err(BuildError::DuplicateSlug { slug, first, second }) => {
                assert_eq!(slug, "about");
                assert_ne!(first, second);
            }
            other => panic!("expected DuplicateSlug, got {other:?}"),
        }
        // nothing was rendered
        assert!(!fx.dir.path().join("docs").exists());
    }

    #[test]
    fn test_build_empty_source_tree() {
        let fx = Fixture::new();

        let mut site = Site::load(fx.layout()).unwrap();
        let summary = site.build().unwrap();

        assert_eq!(summary, BuildSummary::default());
        assert!(site.documents().is_empty());
        assert!(!fx.dir.path().join("docs").exists());
    }

    #[test]
    fn test_build_missing_source_dir() {
        let fx = Fixture::new();
        fs::remove_dir(fx.dir.path().join("content")).unwrap();

        let summary = Site::load(fx.layout()).unwrap().build().unwrap();

        assert_eq!(summary.pages, 0);
    }

    #[test]
    fn test_build_missing_template_writes_nothing() {
        let fx = Fixture::new();
        fx.write_page("page.md", "body\n");
        fs::remove_file(fx.dir.path().join("templates").join(TEMPLATE_NAME)).unwrap();

        let result = Site::load(fx.layout()).unwrap().build();

        assert!(matches!(result, Err(BuildError::Template(_))));
        assert!(!fx.dir.path().join("docs").exists());
    }

    #[test]
    fn test_build_positionless_documents_keep_lexicographic_order() {
        let fx = Fixture::new();
        fx.write_page("zeta.md", "z\n");
        fx.write_page("alpha.md", "a\n");
        fx.write_page("last.md", "---\nposition: 7\n---\nbody\n");

        let mut site = Site::load(fx.layout()).unwrap();
        site.build().unwrap();

        let slugs: Vec<_> = site.documents().iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs, vec!["last", "alpha", "zeta"]);
    }

    #[test]
    fn test_build_malformed_front_matter_aborts() {
        let fx = Fixture::new();
        fx.write_page("bad.md", "---\ntitle: [broken\n---\nbody\n");

        let result = Site::load(fx.layout());

        match result {
            Err(BuildError::Load(err)) => assert!(err.to_string().contains("bad.md")),
            Err(other) => panic!("expected Load error, got {other:?}"),
            Ok(_) => panic!("expected Load error, got Ok"),
        }
    }

    #[test]
    fn test_load_discovers_nested_and_skips_hidden() {
        let fx = Fixture::new();
        fx.write_page("top.md", "t\n");
        fx.write_page("guides/setup.md", "s\n");
        fx.write_page(".draft.md", "hidden\n");
        fx.write_page("notes.txt", "not a document\n");

        let site = Site::load(fx.layout()).unwrap();

        let slugs: Vec<_> = site.documents().iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs, vec!["setup", "top"]);
    }

    #[test]
    fn test_build_rerun_is_idempotent() {
        let fx = Fixture::new();
        fx.write_page("page.md", "# Stable\n");

        Site::load(fx.layout()).unwrap().build().unwrap();
        let first = fs::read(fx.output("page")).unwrap();
        Site::load(fx.layout()).unwrap().build().unwrap();
        let second = fs::read(fx.output("page")).unwrap();

        assert_eq!(first, second);
    }
}
