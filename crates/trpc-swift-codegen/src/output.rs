//! Writing generated clients to disk.

use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use trpc_swift_core::{GenerationError, GenerationResult};

/// Write `content` to `path` through a temp file and a rename.
///
/// Readers see either the previous file or the complete new one. Parent
/// directories are created as needed.
///
/// # Errors
///
/// Returns [`GenerationError::WriteFailed`] when a directory cannot be
/// created, the temp file cannot be written, or the rename fails. The temp
/// file is removed on failure.
pub fn write_atomic(path: &Path, content: &str) -> GenerationResult<()> {
    let write_failed = |path: &Path| {
        let path = path.to_path_buf();
        move |source| GenerationError::WriteFailed { path, source }
    };

    // Same directory as the target, so the rename never crosses file systems.
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(write_failed(dir))?;

    let mut temp = NamedTempFile::new_in(dir).map_err(write_failed(dir))?;
    temp.write_all(content.as_bytes())
        .and_then(|()| temp.flush())
        .map_err(write_failed(temp.path()))?;
    temp.persist(path)
        .map_err(|err| write_failed(path)(err.error))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote generated client");
    Ok(())
}
