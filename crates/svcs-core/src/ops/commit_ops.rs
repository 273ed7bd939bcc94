//! Commit decision sequence.
//!
//! First match wins:
//! 1. message absent or empty → `MessageMissing`
//! 2. author not configured → `UserNotConfigured`
//! 3. no index (or an empty one) → `NothingStaged`
//! 4. no log yet → first commit, dedup skipped
//! 5. current fingerprint found in the log → `NothingToCommit`
//! 6. otherwise create the commit

use crate::errors::{ExErrorKind, Result};
use crate::fingerprint::Fingerprint;
use crate::model::commit::escape_message;
use crate::model::{CommitRecord, TrackedFileSet};
use crate::policy::MatchMode;

/// Persisted state the commit decision reads
#[derive(Debug, Clone, Copy, Default)]
pub struct CommitInputs<'a> {
    pub message: Option<&'a str>,
    pub author: Option<&'a str>,
    pub index_text: Option<&'a str>,
    pub log_text: Option<&'a str>,
}

/// Why no commit was created
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitRefusal {
    MessageMissing,
    UserNotConfigured,
    NothingStaged,
    NothingToCommit { fingerprint: Fingerprint },
}

impl CommitRefusal {
    pub fn kind(&self) -> ExErrorKind {
        match self {
            CommitRefusal::MessageMissing => ExErrorKind::UserInputMissing,
            CommitRefusal::UserNotConfigured
            | CommitRefusal::NothingStaged
            | CommitRefusal::NothingToCommit { .. } => ExErrorKind::PreconditionUnmet,
        }
    }
}

impl std::fmt::Display for CommitRefusal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommitRefusal::MessageMissing => f.write_str("Message was not passed."),
            CommitRefusal::UserNotConfigured => f.write_str("Please configure the user."),
            CommitRefusal::NothingStaged => f.write_str("No files staged."),
            CommitRefusal::NothingToCommit { .. } => f.write_str("Nothing to commit."),
        }
    }
}

/// Everything needed to write a new commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitPlan {
    /// Tracked files to copy into the snapshot, in tracked order
    pub tracked: TrackedFileSet,
    /// Record to prepend; its fingerprint names the snapshot directory
    pub record: CommitRecord,
    /// No log existed; an empty one is initialized before prepending
    pub first_commit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitDecision {
    Refuse(CommitRefusal),
    Create(CommitPlan),
}

/// Run the commit decision sequence
///
/// `fingerprint` is only invoked once steps 1-3 have passed, so an invalid
/// command never touches the working directory.
///
/// # Errors
///
/// Propagates failures of `fingerprint` (e.g. a tracked file deleted after
/// staging) and, in exact mode, a log that does not parse.
pub fn decide_commit<F>(
    inputs: &CommitInputs<'_>,
    mode: MatchMode,
    fingerprint: F,
) -> Result<CommitDecision>
where
    F: FnOnce(&TrackedFileSet) -> Result<Fingerprint>,
{
    let message = match inputs.message {
        Some(m) if !m.is_empty() => m,
        _ => return Ok(CommitDecision::Refuse(CommitRefusal::MessageMissing)),
    };

    let Some(author) = inputs.author else {
        return Ok(CommitDecision::Refuse(CommitRefusal::UserNotConfigured));
    };

    let tracked = match inputs.index_text.map(TrackedFileSet::parse) {
        Some(set) if !set.is_empty() => set,
        _ => return Ok(CommitDecision::Refuse(CommitRefusal::NothingStaged)),
    };

    let current = fingerprint(&tracked)?;

    let first_commit = match inputs.log_text {
        None => true,
        Some(log_text) => {
            if mode.log_contains(log_text, current.as_str())? {
                return Ok(CommitDecision::Refuse(CommitRefusal::NothingToCommit {
                    fingerprint: current,
                }));
            }
            false
        }
    };

    Ok(CommitDecision::Create(CommitPlan {
        tracked,
        record: CommitRecord::new(current, author, escape_message(message)),
        first_commit,
    }))
}
