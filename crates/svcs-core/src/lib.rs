//! svcs core - storage-independent kernel of the svcs version-control engine
//!
//! This crate provides:
//! - The error facility (`ExError`, `ExErrorKind`, `SvcsError`)
//! - The structured logging facility and its macros
//! - Domain model: tracked file set, commit records, newest-first log
//! - The content fingerprint over the tracked files
//! - The `Repository` storage interface with an in-memory implementation
//! - Pure decision functions for staging, commit and checkout

pub mod errors;
pub mod fingerprint;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod policy;

// Used by the logging macros
pub use svcs_core_types as core_types;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, Result, SvcsError};
pub use fingerprint::{fingerprint, Fingerprint};
pub use model::{CommitLog, CommitRecord, SnapshotFile, TrackedFileSet};
pub use ops::{MemoryRepository, Repository};
pub use policy::MatchMode;
