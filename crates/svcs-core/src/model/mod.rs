pub mod commit;
pub mod snapshot;
pub mod tracked;

pub use commit::{CommitLog, CommitRecord};
pub use snapshot::SnapshotFile;
pub use tracked::TrackedFileSet;
