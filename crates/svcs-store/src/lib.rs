//! svcs store - filesystem persistence for the svcs engine
//!
//! Provides:
//! - The persisted layout (config, index, log, commit snapshots)
//! - Atomic writes for text artifacts and snapshot directories
//! - `FsRepository`, the on-disk `Repository` implementation

pub mod errors;
pub mod fs;

// Re-export key types
pub use errors::Result;
pub use fs::{FsRepository, Layout};
