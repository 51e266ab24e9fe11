//! Static asset mirroring.
//!
//! After all pages render, the assets directory is copied into the output
//! tree under its own name (`statics/` → `<output>/statics/`). The stale
//! copy from a previous build is removed first so deleted assets do not
//! linger in the output.

use std::fs;
use std::io;
use std::path::Path;

/// Mirror `source` into `output_root`, returning the number of files copied.
///
/// The target subtree is `<output_root>/<source dir name>`; an existing
/// target is deleted before copying. A missing source directory is not an
/// error — the step is skipped with a warning.
///
/// # Errors
///
/// Returns any I/O error encountered while deleting, creating or copying.
pub fn copy_assets(source: &Path, output_root: &Path) -> io::Result<usize> {
    if !source.is_dir() {
        tracing::warn!(path = %source.display(), "Assets directory missing, skipping copy");
        return Ok(0);
    }
    let Some(name) = source.file_name() else {
        return Err(io::Error::other("assets directory has no name"));
    };

    let target = output_root.join(name);
    match fs::remove_dir_all(&target) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    tracing::info!(from = %source.display(), to = %target.display(), "Copying static assets");
    copy_tree(source, &target)
}

/// Recursively copy a directory tree, returning the file count.
fn copy_tree(source: &Path, target: &Path) -> io::Result<usize> {
    fs::create_dir_all(target)?;

    let mut copied = 0;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let from = entry.path();
        let to = target.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copied += copy_tree(&from, &to)?;
        } else {
            fs::copy(&from, &to)?;
            copied += 1;
        }
    }
    Ok(copied)
}
