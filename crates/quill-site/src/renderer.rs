//! Page rendering through the shared layout template.
//!
//! [`PageRenderer`] merges one document's converted body with the layout
//! template and writes the result under the output root. The template
//! environment is an explicit value owned by the renderer rather than
//! process-wide state, so builds are repeatable with different layouts.
//!
//! The layout contract is three named values: `title` (escaped string),
//! `content` (HTML-safe string) and `nav_links` (sequence of
//! `{title, slug}`).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use minijinja::value::Value;
use minijinja::{Environment, context, path_loader};
use quill_render::render_markdown;

use crate::document::Document;
use crate::nav::NavEntry;

/// Layout template filename resolved inside the template directory.
pub const TEMPLATE_NAME: &str = "template.html";

/// Error returned when page rendering fails.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Layout template is missing or malformed.
    #[error("Layout template error: {0}")]
    Template(#[from] minijinja::Error),
    /// Output file or its parent directories could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Renders documents through the shared layout into the output tree.
///
/// Each page is written to `<output_root>/<slug>/index.html`, so pages get
/// clean extensionless URLs. Rendering is deterministic: the same document
/// and nav list always produce byte-identical output.
pub struct PageRenderer {
    env: Environment<'static>,
    output_root: PathBuf,
}

impl PageRenderer {
    /// Create a renderer loading its layout from `template_dir`.
    ///
    /// The layout is loaded and compiled here, before any page is rendered,
    /// so a missing or malformed template fails the build while the output
    /// tree is still untouched. The compiled template is cached for the
    /// lifetime of the renderer; the file is not re-read per page.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] if `template.html` cannot be loaded
    /// or does not parse.
    pub fn new(template_dir: &Path, output_root: PathBuf) -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.set_loader(path_loader(template_dir));
        env.get_template(TEMPLATE_NAME)?;

        Ok(Self { env, output_root })
    }

    /// Render one document and write `<output_root>/<slug>/index.html`.
    ///
    /// Parent directories are created as needed. An existing output file is
    /// overwritten; there is no atomic staging.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] if the layout fails to render and
    /// [`RenderError::Write`] if the output path cannot be created or
    /// written.
    pub fn render(
        &self,
        document: &Document,
        nav_links: &[NavEntry],
    ) -> Result<PathBuf, RenderError> {
        let content = render_markdown(&document.body);

        let template = self.env.get_template(TEMPLATE_NAME)?;
        let html = template.render(context! {
            title => document.title,
            content => Value::from_safe_string(content),
            nav_links => nav_links,
        })?;

        let target_dir = self.output_root.join(&document.slug);
        fs::create_dir_all(&target_dir).map_err(|source| RenderError::Write {
            path: target_dir.clone(),
            source,
        })?;

        let target = target_dir.join("index.html");
        tracing::info!(path = %target.display(), "Rendering page");
        fs::write(&target, html).map_err(|source| RenderError::Write {
            path: target.clone(),
            source,
        })?;

        Ok(target)
    }
}
