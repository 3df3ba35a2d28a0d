//! Source discovery and loading
//!
//! Thin filesystem helpers for callers. The analysis itself only ever sees
//! the joined text.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::core::ClassTreeError;

/// File extensions picked up by [`find_source_files`]
pub const SOURCE_EXTENSIONS: &[&str] = &["cpp", "h"];

/// List the `.cpp` and `.h` files directly inside `folder`, sorted by path
///
/// Subdirectories are not searched.
pub fn find_source_files(folder: impl AsRef<Path>) -> Result<Vec<PathBuf>, ClassTreeError> {
    let folder = folder.as_ref();
    let entries = fs::read_dir(folder).map_err(|e| {
        ClassTreeError::source_error(folder, format!("cannot read folder: {}", e))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && has_source_extension(&path) {
            trace!(path = %path.display(), "Found source file");
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(ClassTreeError::no_sources(folder));
    }

    files.sort();
    debug!(folder = %folder.display(), count = files.len(), "Scanned folder");
    Ok(files)
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Read every file and join the contents with newlines, in the given order
pub fn load_sources<P: AsRef<Path>>(paths: &[P]) -> Result<String, ClassTreeError> {
    let mut contents = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            ClassTreeError::source_error(path, format!("cannot read file: {}", e))
        })?;
        debug!(path = %path.display(), bytes = text.len(), "Loaded source");
        contents.push(text);
    }
    Ok(contents.join("\n"))
}
