//! Index commands: list tracked files, stage a file.

use std::time::Instant;

use svcs_core::errors::ExErrorKind;
use svcs_core::ops::{decide_stage, StageDecision};
use svcs_core::{log_op_end, log_op_error, log_op_start, Repository, TrackedFileSet};
use svcs_core::Result;

use crate::commands::engine_command::EngineOptions;

/// Outcome of `add` with no path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackedListing {
    Files(TrackedFileSet),
    /// Nothing staged yet
    Empty,
}

impl TrackedListing {
    pub fn len(&self) -> usize {
        match self {
            TrackedListing::Files(set) => set.len(),
            TrackedListing::Empty => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Display for TrackedListing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackedListing::Files(set) => {
                f.write_str("Tracked files:")?;
                for path in set.iter() {
                    write!(f, "\n{}", path)?;
                }
                Ok(())
            }
            TrackedListing::Empty => f.write_str("Add a file to the index."),
        }
    }
}

/// Outcome of `add <path>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The path is tracked; `newly_added` is false for a re-add
    Tracked { path: String, newly_added: bool },
    NotFound { path: String },
}

impl AddOutcome {
    pub fn kind(&self) -> Option<ExErrorKind> {
        match self {
            AddOutcome::Tracked { .. } => None,
            AddOutcome::NotFound { .. } => Some(ExErrorKind::NotFound),
        }
    }
}

impl std::fmt::Display for AddOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddOutcome::Tracked { path, .. } => write!(f, "The file '{}' is tracked.", path),
            AddOutcome::NotFound { path } => write!(f, "Can't find '{}'.", path),
        }
    }
}

/// List the tracked files in tracked order
pub fn list_tracked(repo: &dyn Repository) -> Result<TrackedListing> {
    let listing = match repo.read_index()? {
        Some(text) => {
            let set = TrackedFileSet::parse(&text);
            if set.is_empty() {
                TrackedListing::Empty
            } else {
                TrackedListing::Files(set)
            }
        }
        None => TrackedListing::Empty,
    };
    tracing::debug!(tracked_len = listing.len(), "listed tracked files");
    Ok(listing)
}

/// Stage `path`
///
/// The index is persisted immediately when it changes.
pub fn add(path: &str, options: &EngineOptions, repo: &mut dyn Repository) -> Result<AddOutcome> {
    log_op_start!("add", path = path);
    let start = Instant::now();

    let outcome = add_impl(path, options, repo).map_err(|e| {
        log_op_error!(
            "add",
            e,
            duration_ms = start.elapsed().as_millis() as u64,
            path = path
        );
        e
    })?;

    log_op_end!(
        "add",
        duration_ms = start.elapsed().as_millis() as u64,
        path = path,
        newly_added = matches!(outcome, AddOutcome::Tracked { newly_added: true, .. })
    );
    Ok(outcome)
}

fn add_impl(path: &str, options: &EngineOptions, repo: &mut dyn Repository) -> Result<AddOutcome> {
    let exists = repo.working_file_exists(path)?;
    let index_text = repo.read_index()?;

    match decide_stage(path, exists, index_text.as_deref(), options.match_mode) {
        StageDecision::NotFound => Ok(AddOutcome::NotFound {
            path: path.to_string(),
        }),
        StageDecision::AlreadyTracked => Ok(AddOutcome::Tracked {
            path: path.to_string(),
            newly_added: false,
        }),
        StageDecision::Write { set, created } => {
            repo.write_index(&set.render())?;
            if created {
                tracing::debug!(path, "created index");
            }
            Ok(AddOutcome::Tracked {
                path: path.to_string(),
                newly_added: true,
            })
        }
    }
}
