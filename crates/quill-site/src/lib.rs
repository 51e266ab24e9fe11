//! Site structure and page rendering for Quill.
//!
//! # Architecture
//!
//! A build is a strictly sequential pipeline driven by [`Site`]:
//!
//! 1. Discover `*.md` files under the source root (lexicographic order)
//! 2. Load each file into a [`Document`] (front matter + body)
//! 3. Sort documents into navigation order and project the shared nav list
//! 4. Render every document through the shared layout template
//! 5. Mirror the static assets directory into the output tree
//!
//! Any load or render failure aborts the build; there is no partial-success
//! mode. The nav list is fully constructed before the first render call and
//! never mutated afterwards.

mod assets;
mod document;
mod nav;
mod renderer;
mod site;

pub use assets::copy_assets;
pub use document::{Document, LoadError};
pub use nav::{NavEntry, nav_entries, order_documents};
pub use renderer::{PageRenderer, RenderError, TEMPLATE_NAME};
pub use site::{BuildError, BuildSummary, Site, SiteLayout};
