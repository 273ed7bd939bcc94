use std::path::Path;

use crate::errors::SvcsError;

/// One stored file inside a commit snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFile {
    /// Flat file name (directory components stripped)
    pub name: String,
    pub content: Vec<u8>,
}

impl SnapshotFile {
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }
}

/// Flat name a tracked path is stored under inside a snapshot
///
/// Tracked files from different directories sharing a base name map to the
/// same flat name; the later one wins inside the snapshot.
///
/// # Errors
///
/// Returns `SvcsError::NoFileName` for paths such as `..` or `/` that have no
/// final component.
pub fn flat_name(path: &str) -> Result<String, SvcsError> {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| SvcsError::NoFileName {
            path: path.to_string(),
        })
}
