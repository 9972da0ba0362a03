//! Whole-file reads and atomic overwrites.

use std::fs;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Result, SpliceError};

/// Reads `path` fully into a `String`, requiring valid UTF-8.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| SpliceError::from_io(path, e))?;
    String::from_utf8(bytes).map_err(|source| SpliceError::Encoding {
        path: path.to_path_buf(),
        source,
    })
}

/// Replaces the contents of `path` with `content`.
///
/// Writes to a temporary file in the same directory and renames it over the
/// target, so the original is untouched unless the rename happens. The
/// target's permissions are carried over to the new file. Symlinks are
/// resolved first: the file they point to is replaced, the link stays.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let target = fs::canonicalize(path).map_err(|e| SpliceError::from_io(path, e))?;
    let path = target.as_path();

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let temp = NamedTempFile::new_in(parent).map_err(|e| SpliceError::from_io(parent, e))?;
    fs::write(temp.path(), content).map_err(|e| SpliceError::from_io(temp.path(), e))?;

    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(temp.path(), metadata.permissions())
            .map_err(|e| SpliceError::from_io(temp.path(), e))?;
    }

    debug!(path = %path.display(), bytes = content.len(), "persisting temp file");
    temp.persist(path).map_err(|e| SpliceError::Io {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
