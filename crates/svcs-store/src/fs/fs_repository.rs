//! On-disk repository
//!
//! Persisted state lives under a storage root (by default `vcs/` inside the
//! working directory); tracked paths and checkout targets resolve against
//! the working directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use svcs_core::errors::SvcsError;
use svcs_core::{Fingerprint, Repository, SnapshotFile};

use crate::errors::{invalid_snapshot_id, io_error, not_utf8, working_file_error, Result};
use crate::fs::atomic::{atomic_publish_dir, atomic_write};
use crate::fs::layout::Layout;

/// Filesystem-backed repository
#[derive(Debug, Clone)]
pub struct FsRepository {
    layout: Layout,
    work_dir: PathBuf,
}

impl FsRepository {
    /// Open a repository without touching the filesystem
    pub fn new(root: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            layout: Layout::new(root),
            work_dir: work_dir.into(),
        }
    }

    /// Open a repository, creating the storage root and `commits/` when absent
    pub fn open_or_init(root: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Result<Self> {
        let repo = Self::new(root, work_dir);
        let commits = repo.layout.commits();
        if !commits.is_dir() {
            fs::create_dir_all(&commits).map_err(|e| io_error("init_storage_root", &commits, e))?;
            tracing::debug!(root = %repo.layout.root().display(), "initialized storage root");
        }
        Ok(repo)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    fn working_path(&self, path: &str) -> PathBuf {
        self.work_dir.join(path)
    }

    fn snapshot_dir(&self, id: &str) -> Result<PathBuf> {
        self.layout.snapshot(id).ok_or_else(|| invalid_snapshot_id(id))
    }
}

/// Read a whole text artifact; `None` when it was never written
fn read_text(operation: &str, path: &Path) -> Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| not_utf8(operation, path)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_error(operation, path, e)),
    }
}

impl Repository for FsRepository {
    fn read_config(&self) -> Result<Option<String>> {
        let text = read_text("read_config", &self.layout.config())?;
        Ok(text.map(|t| t.trim_end_matches(|c: char| c == '\r' || c == '\n').to_string()))
    }

    fn write_config(&mut self, author: &str) -> Result<()> {
        atomic_write(&self.layout.config(), author.as_bytes())
    }

    fn read_index(&self) -> Result<Option<String>> {
        read_text("read_index", &self.layout.index())
    }

    fn write_index(&mut self, text: &str) -> Result<()> {
        atomic_write(&self.layout.index(), text.as_bytes())
    }

    fn read_log(&self) -> Result<Option<String>> {
        read_text("read_log", &self.layout.log())
    }

    fn write_log(&mut self, text: &str) -> Result<()> {
        atomic_write(&self.layout.log(), text.as_bytes())
    }

    fn working_file_exists(&self, path: &str) -> Result<bool> {
        if path.is_empty() {
            return Ok(false);
        }
        let full = self.working_path(path);
        match fs::metadata(&full) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error("stat_working_file", &full, e)),
        }
    }

    fn read_working_file(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.working_path(path);
        fs::read(&full).map_err(|e| working_file_error("read_working_file", &full, e))
    }

    fn write_working_file(&mut self, path: &str, content: &[u8]) -> Result<()> {
        atomic_write(&self.working_path(path), content)
    }

    fn snapshot_exists(&self, id: &str) -> Result<bool> {
        Ok(self.layout.snapshot(id).is_some_and(|dir| dir.is_dir()))
    }

    fn publish_snapshot(&mut self, id: &Fingerprint, files: &[SnapshotFile]) -> Result<()> {
        let target = self.snapshot_dir(id.as_str())?;
        if target.is_dir() {
            tracing::warn!(commit_id = %id, "snapshot already present, keeping existing copy");
            return Ok(());
        }
        let staging = self
            .layout
            .snapshot_staging(id.as_str())
            .ok_or_else(|| invalid_snapshot_id(id.as_str()))?;

        atomic_publish_dir(&staging, &target, |dir| {
            for file in files {
                let path = dir.join(&file.name);
                fs::write(&path, &file.content).map_err(|e| io_error("write_snapshot_file", &path, e))?;
            }
            Ok(())
        })
    }

    fn read_snapshot(&self, id: &str) -> Result<Option<Vec<SnapshotFile>>> {
        let Some(dir) = self.layout.snapshot(id) else {
            return Ok(None);
        };
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error("read_snapshot", &dir, e)),
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_error("read_snapshot", &dir, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = entry
                .file_name()
                .into_string()
                .map_err(|raw| SvcsError::Internal {
                    message: format!("snapshot file name is not UTF-8: {:?}", raw),
                })?;
            let content = fs::read(&path).map_err(|e| io_error("read_snapshot_file", &path, e))?;
            files.push(SnapshotFile::new(name, content));
        }
        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Some(files))
    }
}
