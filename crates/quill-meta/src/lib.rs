//! Front matter parsing for Quill documents.
//!
//! Source files may open with a `---`-delimited YAML block carrying page
//! metadata. [`split`] separates that block from the markdown body and parses
//! it into a [`FrontMatter`].
//!
//! # Format
//!
//! ```text
//! ---
//! title: About Us
//! position: 2
//! ---
//! Body starts here.
//! ```
//!
//! A file without an opening delimiter has no front matter; the whole file is
//! body. An opening delimiter without a closing one is an error.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Line opening and closing a front matter block.
const DELIMITER: &str = "---";

/// Parsed front matter for a single document.
///
/// All recognized fields are optional. Keys Quill does not consume are
/// preserved in [`extra`](Self::extra) so callers can layer their own
/// conventions on top.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct FrontMatter {
    /// Output path identifier (overrides the filename-derived slug).
    #[serde(default)]
    pub slug: Option<String>,

    /// Page title (overrides the filename-derived title).
    #[serde(default)]
    pub title: Option<String>,

    /// Navigation sort key. Documents without one sort last.
    #[serde(default)]
    pub position: Option<i64>,

    /// Unrecognized keys, kept as raw YAML values.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front matter from YAML content.
    ///
    /// Empty or whitespace-only content yields the default value.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml(content: &str) -> Result<Self, MatterError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(trimmed).map_err(|e| MatterError::Parse(format!("Invalid YAML: {e}")))
    }

    /// Check if the front matter has any non-default values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slug.is_none()
            && self.title.is_none()
            && self.position.is_none()
            && self.extra.is_empty()
    }
}

/// Error type for front matter parsing.
#[derive(Debug, thiserror::Error)]
pub enum MatterError {
    /// An opening `---` line without a closing one.
    #[error("Unterminated front matter block")]
    Unterminated,
    /// YAML parsing error.
    #[error("{0}")]
    Parse(String),
}

/// Split a source file into front matter and markdown body.
///
/// If the first line is not a `---` delimiter the front matter is empty and
/// the entire input is body.
///
/// # Errors
///
/// Returns [`MatterError::Unterminated`] if the opening delimiter is never
/// closed, and [`MatterError::Parse`] if the block is not valid YAML.
pub fn split(input: &str) -> Result<(FrontMatter, &str), MatterError> {
    let Some(block_start) = opening_delimiter_len(input) else {
        return Ok((FrontMatter::default(), input));
    };

    let mut offset = block_start;
    for line in input[block_start..].split_inclusive('\n') {
        if is_delimiter(line) {
            let matter = FrontMatter::from_yaml(&input[block_start..offset])?;
            let body = &input[offset + line.len()..];
            return Ok((matter, body));
        }
        offset += line.len();
    }

    Err(MatterError::Unterminated)
}

/// Byte length of the opening delimiter line, if the input starts with one.
fn opening_delimiter_len(input: &str) -> Option<usize> {
    let first = input.split_inclusive('\n').next()?;
    is_delimiter(first).then_some(first.len())
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}
