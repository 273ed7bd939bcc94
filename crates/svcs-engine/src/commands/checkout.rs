//! Restore a recorded snapshot into the working directory.

use std::time::Instant;

use svcs_core::errors::ExErrorKind;
use svcs_core::ops::{decide_checkout, missing_snapshot_refusal, CheckoutDecision, CheckoutRefusal};
use svcs_core::{log_op_end, log_op_error, log_op_start, Repository, Result};

use crate::commands::engine_command::EngineOptions;

/// Outcome of `checkout`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Switched {
        id: String,
        /// Flat names written into the working directory
        restored: Vec<String>,
    },
    Refused(CheckoutRefusal),
}

impl CheckoutOutcome {
    pub fn kind(&self) -> Option<ExErrorKind> {
        match self {
            CheckoutOutcome::Switched { .. } => None,
            CheckoutOutcome::Refused(r) => Some(r.kind()),
        }
    }
}

impl std::fmt::Display for CheckoutOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckoutOutcome::Switched { id, .. } => write!(f, "Switched to commit {}.", id),
            CheckoutOutcome::Refused(r) => write!(f, "{}", r),
        }
    }
}

/// Overwrite working files with the snapshot named `id`
///
/// Files absent from the snapshot are left alone.
pub fn checkout(
    id: Option<&str>,
    options: &EngineOptions,
    repo: &mut dyn Repository,
) -> Result<CheckoutOutcome> {
    log_op_start!("checkout", commit_id = id.unwrap_or_default());
    let start = Instant::now();

    let outcome = checkout_impl(id, options, repo).map_err(|e| {
        log_op_error!(
            "checkout",
            e,
            duration_ms = start.elapsed().as_millis() as u64,
            commit_id = id.unwrap_or_default()
        );
        e
    })?;

    log_op_end!(
        "checkout",
        duration_ms = start.elapsed().as_millis() as u64,
        switched = outcome.kind().is_none()
    );
    Ok(outcome)
}

fn checkout_impl(
    id: Option<&str>,
    options: &EngineOptions,
    repo: &mut dyn Repository,
) -> Result<CheckoutOutcome> {
    let log_text = repo.read_log()?;
    let id = match decide_checkout(id, log_text.as_deref(), options.match_mode)? {
        CheckoutDecision::Restore(id) => id,
        CheckoutDecision::Refuse(refusal) => return Ok(CheckoutOutcome::Refused(refusal)),
    };

    let Some(files) = repo.read_snapshot(id)? else {
        tracing::warn!(commit_id = id, "log accepts id but no snapshot carries that name");
        if let Some(refusal) = missing_snapshot_refusal(id, options.match_mode) {
            return Ok(CheckoutOutcome::Refused(refusal));
        }
        return Ok(CheckoutOutcome::Switched {
            id: id.to_string(),
            restored: Vec::new(),
        });
    };

    for file in &files {
        repo.write_working_file(&file.name, &file.content)?;
    }

    Ok(CheckoutOutcome::Switched {
        id: id.to_string(),
        restored: files.into_iter().map(|f| f.name).collect(),
    })
}
