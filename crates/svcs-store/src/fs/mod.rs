//! Filesystem-backed repository
//!
//! Provides:
//! - The persisted layout under the storage root
//! - Atomic file writes and atomic snapshot publication
//! - `FsRepository`, the on-disk implementation of `Repository`

mod atomic;
mod fs_repository;
mod layout;

pub use fs_repository::FsRepository;
pub use layout::{Layout, COMMIT_DIRECTORY, CONFIG_FILE, INDEX_FILE, LOG_FILE};
