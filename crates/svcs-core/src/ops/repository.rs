use std::collections::BTreeMap;

use crate::errors::{ExError, ExErrorKind, Result, SvcsError};
use crate::fingerprint::Fingerprint;
use crate::model::SnapshotFile;

/// Storage interface over the persisted state of one repository
///
/// Covers the four persisted artifacts (config, index, log, snapshot
/// directories) and the working directory that `add` reads from and
/// `checkout` writes to. Text artifacts are exchanged raw so that callers can
/// apply the matching policy to exactly what is on disk. `None` means the
/// artifact has never been written.
pub trait Repository {
    /// Author name, if configured
    fn read_config(&self) -> Result<Option<String>>;

    /// Replace the author name
    fn write_config(&mut self, author: &str) -> Result<()>;

    fn read_index(&self) -> Result<Option<String>>;

    fn write_index(&mut self, text: &str) -> Result<()>;

    fn read_log(&self) -> Result<Option<String>>;

    fn write_log(&mut self, text: &str) -> Result<()>;

    /// Whether `path` currently exists in the working directory
    fn working_file_exists(&self, path: &str) -> Result<bool>;

    /// Read a working-directory file
    ///
    /// # Errors
    ///
    /// Fails when the file is missing or unreadable; a tracked file deleted
    /// after staging surfaces here.
    fn read_working_file(&self, path: &str) -> Result<Vec<u8>>;

    /// Overwrite a working-directory file
    fn write_working_file(&mut self, path: &str, content: &[u8]) -> Result<()>;

    fn snapshot_exists(&self, id: &str) -> Result<bool>;

    /// Publish a complete snapshot under `id`
    ///
    /// Either every file becomes visible or none does. Publishing over an
    /// existing snapshot keeps the existing one.
    fn publish_snapshot(&mut self, id: &Fingerprint, files: &[SnapshotFile]) -> Result<()>;

    /// Files stored in the snapshot directory named exactly `id`
    fn read_snapshot(&self, id: &str) -> Result<Option<Vec<SnapshotFile>>>;
}

/// In-memory repository for tests and dry runs
///
/// Single-threaded, no interior mutability. `set_read_only(true)` makes every
/// write fail with `StorageFailure`, which lets callers check that a failed
/// command leaves earlier state untouched.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    config: Option<String>,
    index: Option<String>,
    log: Option<String>,
    files: BTreeMap<String, Vec<u8>>,
    snapshots: BTreeMap<String, Vec<SnapshotFile>>,
    read_only: bool,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a file in the working directory (test setup)
    pub fn put_file(&mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), content.into());
    }

    /// Remove a file from the working directory (test setup)
    pub fn remove_file(&mut self, path: &str) -> Option<Vec<u8>> {
        self.files.remove(path)
    }

    pub fn file(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn snapshot_ids(&self) -> impl Iterator<Item = &str> {
        self.snapshots.keys().map(String::as_str)
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    fn check_writable(&self, op: &str) -> Result<()> {
        if self.read_only {
            return Err(ExError::new(ExErrorKind::StorageFailure)
                .with_op(op.to_string())
                .with_message("repository is read-only"));
        }
        Ok(())
    }
}

impl Repository for MemoryRepository {
    fn read_config(&self) -> Result<Option<String>> {
        Ok(self.config.clone())
    }

    fn write_config(&mut self, author: &str) -> Result<()> {
        self.check_writable("write_config")?;
        self.config = Some(author.to_string());
        Ok(())
    }

    fn read_index(&self) -> Result<Option<String>> {
        Ok(self.index.clone())
    }

    fn write_index(&mut self, text: &str) -> Result<()> {
        self.check_writable("write_index")?;
        self.index = Some(text.to_string());
        Ok(())
    }

    fn read_log(&self) -> Result<Option<String>> {
        Ok(self.log.clone())
    }

    fn write_log(&mut self, text: &str) -> Result<()> {
        self.check_writable("write_log")?;
        self.log = Some(text.to_string());
        Ok(())
    }

    fn working_file_exists(&self, path: &str) -> Result<bool> {
        Ok(self.files.contains_key(path))
    }

    fn read_working_file(&self, path: &str) -> Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| {
            ExError::from(SvcsError::PathNotFound {
                path: path.to_string(),
            })
            .with_op("read_working_file")
        })
    }

    fn write_working_file(&mut self, path: &str, content: &[u8]) -> Result<()> {
        self.check_writable("write_working_file")?;
        self.files.insert(path.to_string(), content.to_vec());
        Ok(())
    }

    fn snapshot_exists(&self, id: &str) -> Result<bool> {
        Ok(self.snapshots.contains_key(id))
    }

    fn publish_snapshot(&mut self, id: &Fingerprint, files: &[SnapshotFile]) -> Result<()> {
        self.check_writable("publish_snapshot")?;
        self.snapshots
            .entry(id.as_str().to_string())
            .or_insert_with(|| {
                // Later files with the same flat name replace earlier ones
                let mut by_name: BTreeMap<&str, &SnapshotFile> = BTreeMap::new();
                for file in files {
                    by_name.insert(file.name.as_str(), file);
                }
                by_name.into_values().cloned().collect()
            });
        Ok(())
    }

    fn read_snapshot(&self, id: &str) -> Result<Option<Vec<SnapshotFile>>> {
        Ok(self.snapshots.get(id).cloned())
    }
}
