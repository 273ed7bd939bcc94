//! Persisted layout under the storage root
//!
//! ```text
//! <root>/
//!   config.txt      author name, single line
//!   index.txt       tracked paths, one per line
//!   log.txt         newest-first commit records
//!   commits/
//!     <fingerprint>/<flat-file-name>
//! ```

use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.txt";
pub const INDEX_FILE: &str = "index.txt";
pub const LOG_FILE: &str = "log.txt";
pub const COMMIT_DIRECTORY: &str = "commits";

const STAGING_PREFIX: &str = ".tmp-";

/// Resolved paths for one storage root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn index(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    pub fn log(&self) -> PathBuf {
        self.root.join(LOG_FILE)
    }

    pub fn commits(&self) -> PathBuf {
        self.root.join(COMMIT_DIRECTORY)
    }

    /// Snapshot directory for `id`, or `None` if `id` is not a single plain
    /// path component
    pub fn snapshot(&self, id: &str) -> Option<PathBuf> {
        is_plain_component(id).then(|| self.commits().join(id))
    }

    /// Staging directory a snapshot is assembled in before publication
    pub fn snapshot_staging(&self, id: &str) -> Option<PathBuf> {
        is_plain_component(id)
            .then(|| self.commits().join(format!("{}{}", STAGING_PREFIX, id)))
    }
}

fn is_plain_component(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id.starts_with(STAGING_PREFIX)
        && !id.contains(|c: char| c == '/' || c == '\\')
}
