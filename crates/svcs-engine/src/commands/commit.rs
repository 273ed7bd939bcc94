//! Commit creation.
//!
//! Reads the persisted state once, runs the commit decision, then applies a
//! `Create` decision in two steps: the snapshot directory is published
//! first, the log record is prepended second. A failure during publication
//! leaves both the log and existing snapshots untouched.

use std::time::Instant;

use svcs_core::errors::ExErrorKind;
use svcs_core::model::snapshot::flat_name;
use svcs_core::ops::{decide_commit, CommitDecision, CommitInputs, CommitPlan, CommitRefusal};
use svcs_core::{
    fingerprint, log_op_end, log_op_error, log_op_start, Fingerprint, Repository, Result,
    SnapshotFile,
};

use crate::commands::engine_command::EngineOptions;

/// Outcome of `commit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed {
        fingerprint: Fingerprint,
        /// Number of tracked files copied into the snapshot
        files: usize,
    },
    Refused(CommitRefusal),
}

impl CommitOutcome {
    pub fn kind(&self) -> Option<ExErrorKind> {
        match self {
            CommitOutcome::Committed { .. } => None,
            CommitOutcome::Refused(r) => Some(r.kind()),
        }
    }
}

impl std::fmt::Display for CommitOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommitOutcome::Committed { .. } => f.write_str("Changes are committed."),
            CommitOutcome::Refused(r) => write!(f, "{}", r),
        }
    }
}

/// Record the tracked files as a new commit
///
/// # Errors
///
/// Storage failures abort the command. A tracked file deleted after staging
/// surfaces as `NotFound` with its path.
pub fn commit(
    message: Option<&str>,
    options: &EngineOptions,
    repo: &mut dyn Repository,
) -> Result<CommitOutcome> {
    log_op_start!("commit");
    let start = Instant::now();

    let outcome = commit_impl(message, options, repo).map_err(|e| {
        log_op_error!("commit", e, duration_ms = start.elapsed().as_millis() as u64);
        e
    })?;

    match &outcome {
        CommitOutcome::Committed { fingerprint, files } => {
            log_op_end!(
                "commit",
                duration_ms = start.elapsed().as_millis() as u64,
                fingerprint = fingerprint.as_str(),
                tracked_len = *files
            );
        }
        CommitOutcome::Refused(refusal) => {
            log_op_end!(
                "commit",
                duration_ms = start.elapsed().as_millis() as u64,
                refused = %refusal
            );
        }
    }
    Ok(outcome)
}

fn commit_impl(
    message: Option<&str>,
    options: &EngineOptions,
    repo: &mut dyn Repository,
) -> Result<CommitOutcome> {
    let author = repo.read_config()?;
    let index_text = repo.read_index()?;
    let log_text = repo.read_log()?;

    let inputs = CommitInputs {
        message,
        author: author.as_deref(),
        index_text: index_text.as_deref(),
        log_text: log_text.as_deref(),
    };

    // Contents are read once; the snapshot stores exactly what was hashed
    let mut contents: Vec<Vec<u8>> = Vec::new();
    let decision = {
        let reader: &dyn Repository = &*repo;
        decide_commit(&inputs, options.match_mode, |tracked| {
            for path in tracked.iter() {
                contents.push(reader.read_working_file(path)?);
            }
            Ok(fingerprint(&contents))
        })?
    };

    let plan = match decision {
        CommitDecision::Refuse(refusal) => {
            tracing::debug!(refusal = %refusal, "commit refused");
            return Ok(CommitOutcome::Refused(refusal));
        }
        CommitDecision::Create(plan) => plan,
    };

    apply_plan(plan, contents, log_text.as_deref(), repo)
}

fn apply_plan(
    plan: CommitPlan,
    contents: Vec<Vec<u8>>,
    log_text: Option<&str>,
    repo: &mut dyn Repository,
) -> Result<CommitOutcome> {
    let files = plan
        .tracked
        .iter()
        .zip(contents)
        .map(|(path, content)| Ok(SnapshotFile::new(flat_name(path)?, content)))
        .collect::<Result<Vec<_>>>()?;

    let id = &plan.record.fingerprint;
    if repo.snapshot_exists(id.as_str())? {
        // Left behind by an earlier commit whose log write failed
        tracing::debug!(fingerprint = id.as_str(), "snapshot already present, reusing it");
    } else {
        repo.publish_snapshot(id, &files)?;
        tracing::debug!(fingerprint = id.as_str(), files = files.len(), "published snapshot");
    }

    if plan.first_commit {
        tracing::debug!("initializing commit log");
    }
    let mut new_log = plan.record.render();
    new_log.push_str(log_text.unwrap_or_default());
    repo.write_log(&new_log)?;

    Ok(CommitOutcome::Committed {
        fingerprint: id.clone(),
        files: files.len(),
    })
}
