//! Target file output
//!
//! The new content is written to a temporary file next to the target and
//! renamed over it, so other processes see either the old or the new file.

use glsync_core::{Error, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Atomically replace `path` with `contents`
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    // Write through a symlinked target instead of replacing the link
    let resolved = match std::fs::canonicalize(path) {
        Ok(resolved) => resolved,
        Err(_) => path.to_path_buf(),
    };
    let path = resolved.as_path();

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::output(path, e))?;
    tmp.write_all(contents.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| Error::output(path, e))?;

    // Keep the target's mode; the temp file is created 0600
    if let Ok(metadata) = std::fs::metadata(path) {
        tmp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| Error::output(path, e))?;
    }

    debug!("Replacing {} via {}", path.display(), tmp.path().display());
    tmp.persist(path).map_err(|e| Error::output(path, e.error))?;
    Ok(())
}

/// Write only when `contents` differs from `original`; returns whether it wrote
pub fn write_if_changed(path: &Path, original: &str, contents: &str) -> Result<bool> {
    if original == contents {
        return Ok(false);
    }
    write_atomic(path, contents)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gl.h");
        std::fs::write(&path, "old").unwrap();

        write_atomic(&path, "new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");

        // No temp files left behind
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_unchanged_content_not_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gl.h");
        std::fs::write(&path, "same").unwrap();
        let before = std::fs::metadata(&path).unwrap().modified().unwrap();

        assert!(!write_if_changed(&path, "same", "same").unwrap());
        let after = std::fs::metadata(&path).unwrap().modified().unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_missing_directory_is_output_error() {
        let path = Path::new("/nonexistent/glsync/gl.h");
        assert!(matches!(
            write_atomic(path, "x"),
            Err(Error::OutputAccess { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_target_written_through() {
        let dir = TempDir::new().unwrap();
        let real = dir.path().join("real.h");
        let link = dir.path().join("gl.h");
        std::fs::write(&real, "old").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        write_atomic(&link, "new").unwrap();
        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(std::fs::read_to_string(&real).unwrap(), "new");
    }

    #[cfg(unix)]
    #[test]
    fn test_permissions_preserved() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gl.h");
        std::fs::write(&path, "old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        write_atomic(&path, "new").unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}
