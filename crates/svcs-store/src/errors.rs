//! Error handling for svcs-store
//!
//! Wraps svcs-core ExError with store-specific helpers

use std::io;
use std::path::Path;

use svcs_core::errors::{ExError, ExErrorKind, SvcsError};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a storage failure from an I/O error
///
/// The raw I/O error is kept as the source so the message survives.
pub fn io_error(operation: &str, path: &Path, err: io::Error) -> ExError {
    ExError::new(ExErrorKind::StorageFailure)
        .with_op(operation.to_string())
        .with_path(path.display().to_string())
        .with_message(err.to_string())
        .with_source(
            ExError::new(ExErrorKind::Io)
                .with_message(format!("{:?}: {}", err.kind(), err)),
        )
}

/// Create an error for a working file that could not be read
///
/// A missing file is `NotFound`; anything else is a storage failure.
pub fn working_file_error(operation: &str, path: &Path, err: io::Error) -> ExError {
    if err.kind() == io::ErrorKind::NotFound {
        ExError::from(SvcsError::PathNotFound {
            path: path.display().to_string(),
        })
        .with_op(operation.to_string())
    } else {
        io_error(operation, path, err)
    }
}

/// Create a non-UTF-8 text error for a persisted artifact
pub fn not_utf8(operation: &str, path: &Path) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op(operation.to_string())
        .with_path(path.display().to_string())
        .with_message("persisted text is not valid UTF-8")
}

/// Create an error for a commit id that cannot name a snapshot directory
pub fn invalid_snapshot_id(id: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("snapshot_path")
        .with_commit_id(id.to_string())
        .with_message("commit id cannot name a snapshot directory")
}
