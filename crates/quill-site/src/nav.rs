//! Navigation ordering and the shared nav list.
//!
//! Every rendered page receives the same [`NavEntry`] list, projected from
//! the full document set after sorting. The list is built once per build and
//! only ever read afterwards.

use serde::Serialize;

use crate::document::Document;

/// Sort key for documents without an explicit `position`.
const POSITION_LAST: i64 = i64::MAX;

/// One entry in the site-wide navigation list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    /// Display title.
    pub title: String,
    /// Link target slug.
    pub slug: String,
}

/// Sort documents into navigation order.
///
/// Orders by `position` ascending; documents without a `position` come after
/// all positioned ones. The sort is stable, so ties keep whatever discovery
/// order the caller established.
pub fn order_documents(documents: &mut [Document]) {
    documents.sort_by_key(|doc| doc.position.unwrap_or(POSITION_LAST));
}

/// Project the shared navigation list from ordered documents.
#[must_use]
pub fn nav_entries(documents: &[Document]) -> Vec<NavEntry> {
    documents
        .iter()
        .map(|doc| NavEntry {
            title: doc.title.clone(),
            slug: doc.slug.clone(),
        })
        .collect()
}
