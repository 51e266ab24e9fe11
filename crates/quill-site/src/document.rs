//! Document loading.
//!
//! A [`Document`] is one parsed source file: front matter plus markdown body,
//! with its output slug and display title resolved at load time.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use quill_meta::{FrontMatter, MatterError};

/// One parsed source file.
///
/// `slug`, `title` and `position` are resolved once when the file is loaded
/// and never change afterwards. Documents live for a single build.
#[derive(Clone, Debug)]
pub struct Document {
    /// Source file location.
    pub path: PathBuf,
    /// Parsed front matter, including keys Quill does not consume.
    pub matter: FrontMatter,
    /// Markdown body (everything after the front matter block).
    pub body: String,
    /// Output path identifier. Must be unique across the site.
    pub slug: String,
    /// Display title used in navigation and the page layout.
    pub title: String,
    /// Navigation sort key from front matter.
    pub position: Option<i64>,
}

/// Error returned when a document cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Source file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A front matter block is present but malformed.
    #[error("Invalid front matter in {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: MatterError,
    },
}

impl Document {
    /// Load and parse the document at `path`.
    ///
    /// The slug falls back to the filename stem lowercased with spaces
    /// replaced by hyphens; the title falls back to the raw stem.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Read`] if the file cannot be read and
    /// [`LoadError::Metadata`] if its front matter block is malformed.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        tracing::info!(path = %path.display(), "Loading document");

        let raw = fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let (matter, body) = quill_meta::split(&raw).map_err(|source| LoadError::Metadata {
            path: path.to_path_buf(),
            source,
        })?;

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let slug = matter
            .slug
            .clone()
            .unwrap_or_else(|| stem.to_lowercase().replace(' ', "-"));
        let title = matter.title.clone().unwrap_or(stem);
        let position = matter.position;

        Ok(Self {
            path: path.to_path_buf(),
            matter,
            body: body.to_owned(),
            slug,
            title,
            position,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use quill_meta::MatterError;

    use super::*;

    fn write_doc(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_defaults_from_filename() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(&dir, "About Us.md", "# Hi\n");

        let doc = Document::load(&path).unwrap();

        assert_eq!(doc.slug, "about-us");
        assert_eq!(doc.title, "About Us");
        assert_eq!(doc.position, None);
        assert_eq!(doc.body, "# Hi\n");
        assert!(doc.matter.is_empty());
    }

    #[test]
    fn test_load_metadata_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(
            &dir,
            "page.md",
            "---\nslug: about\ntitle: About Us\nposition: 2\n---\n# Hi\n",
        );

        let doc = Document::load(&path).unwrap();

        assert_eq!(doc.slug, "about");
        assert_eq!(doc.title, "About Us");
        assert_eq!(doc.position, Some(2));
        assert_eq!(doc.body, "# Hi\n");
    }

    #[test]
    fn test_load_keeps_unrecognized_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(&dir, "page.md", "---\nauthor: jane\n---\nbody\n");

        let doc = Document::load(&path).unwrap();

        assert_eq!(
            doc.matter.extra.get("author"),
            Some(&serde_yaml::Value::String("jane".to_owned()))
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Document::load(&dir.path().join("missing.md"));

        assert!(matches!(result, Err(LoadError::Read { .. })));
    }

    #[test]
    fn test_load_malformed_front_matter() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(&dir, "page.md", "---\ntitle: [broken\n---\nbody\n");

        let result = Document::load(&path);

        assert!(matches!(
            result,
            Err(LoadError::Metadata {
                source: MatterError::Parse(_),
                ..
            })
        ));
    }

    #[test]
    fn test_load_unterminated_front_matter() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(&dir, "page.md", "---\ntitle: open\n");

        let result = Document::load(&path);

        assert!(matches!(
            result,
            Err(LoadError::Metadata {
                source: MatterError::Unterminated,
                ..
            })
        ));
    }

    #[test]
    fn test_load_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(&dir, "bad.md", "---\nnever closed\n");

        let err = Document::load(&path).unwrap_err();

        assert!(err.to_string().contains("bad.md"));
    }
}
