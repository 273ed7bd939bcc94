//! Atomic write primitives
//!
//! Files are written to a temp sibling and renamed into place; snapshot
//! directories are assembled in a staging sibling and renamed into place.
//! A reader never sees a partially written file or snapshot.

use crate::errors::{io_error, Result};
use std::fs;
use std::path::Path;

/// Atomically write bytes to a file
///
/// Creates the parent directory when missing.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_error("create_parent_dir", parent, e))?;
        }
    }

    let temp_path = temp_sibling(target_path);

    if let Err(e) = fs::write(&temp_path, content) {
        let _ = fs::remove_file(&temp_path);
        return Err(io_error("write_temp", &temp_path, e));
    }

    if let Err(e) = fs::rename(&temp_path, target_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(io_error("rename_temp", target_path, e));
    }

    Ok(())
}

/// Publish a fully populated staging directory as `target`
///
/// `fill` writes the directory contents. On any failure the staging
/// directory is removed and `target` is left untouched.
pub fn atomic_publish_dir<F>(staging: &Path, target: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    if staging.exists() {
        // Leftover from an interrupted run
        fs::remove_dir_all(staging).map_err(|e| io_error("clear_staging", staging, e))?;
    }
    fs::create_dir_all(staging).map_err(|e| io_error("create_staging", staging, e))?;

    let result = fill(staging).and_then(|()| {
        fs::rename(staging, target).map_err(|e| io_error("publish_snapshot", target, e))
    });

    if result.is_err() {
        let _ = fs::remove_dir_all(staging);
    }
    result
}

fn temp_sibling(target_path: &Path) -> std::path::PathBuf {
    let mut name = target_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    target_path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use svcs_core::errors::{ExError, ExErrorKind};
    use tempfile::TempDir;

    fn leftover_tmp_files(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.file_name()
                    .to_str()
                    .map(|s| s.ends_with(".tmp"))
                    .unwrap_or(false)
            })
            .count()
    }

    #[test]
    fn test_atomic_write() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("log.txt");

        atomic_write(&target, b"hello").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"hello");
        assert_eq!(leftover_tmp_files(temp_dir.path()), 0);
    }

    #[test]
    fn test_atomic_write_replaces_existing() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("index.txt");

        atomic_write(&target, b"a.txt\n").unwrap();
        atomic_write(&target, b"a.txt\nb.txt\n").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"a.txt\nb.txt\n");
    }

    #[test]
    fn test_atomic_write_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("subdir").join("test.txt");

        atomic_write(&target, b"nested").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"nested");
    }

    #[test]
    fn test_publish_dir_moves_staging_into_place() {
        let temp_dir = TempDir::new().unwrap();
        let staging = temp_dir.path().join(".tmp-abc");
        let target = temp_dir.path().join("abc");

        atomic_publish_dir(&staging, &target, |dir| {
            fs::write(dir.join("a.txt"), b"hello").map_err(|e| io_error("write", dir, e))
        })
        .unwrap();

        assert!(!staging.exists());
        assert_eq!(fs::read(target.join("a.txt")).unwrap(), b"hello");
    }

    #[test]
    fn test_publish_dir_failure_leaves_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let staging = temp_dir.path().join(".tmp-abc");
        let target = temp_dir.path().join("abc");

        let result = atomic_publish_dir(&staging, &target, |dir| {
            fs::write(dir.join("a.txt"), b"partial").map_err(|e| io_error("write", dir, e))?;
            Err(ExError::new(ExErrorKind::StorageFailure).with_message("copy failed"))
        });

        assert!(result.is_err());
        assert!(!staging.exists());
        assert!(!target.exists());
    }
}
