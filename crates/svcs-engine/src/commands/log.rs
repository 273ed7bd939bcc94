//! Commit history command.

use std::time::Instant;

use svcs_core::{log_op_end, log_op_error, log_op_start, CommitLog, Repository, Result};

/// Outcome of `log`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutcome {
    /// Records, newest first
    Entries(CommitLog),
    NoCommits,
}

impl std::fmt::Display for LogOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogOutcome::Entries(log) => {
                for (i, record) in log.records().iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n\n")?;
                    }
                    write!(f, "{}", record)?;
                }
                Ok(())
            }
            LogOutcome::NoCommits => f.write_str("No commits yet."),
        }
    }
}

/// Read the commit history, newest first
///
/// # Errors
///
/// A log that does not follow the record layout surfaces as `InvalidInput`.
pub fn show_log(repo: &dyn Repository) -> Result<LogOutcome> {
    log_op_start!("log");
    let start = Instant::now();

    let outcome = show_log_impl(repo).map_err(|e| {
        log_op_error!("log", e, duration_ms = start.elapsed().as_millis() as u64);
        e
    })?;

    let log_len = match &outcome {
        LogOutcome::Entries(log) => log.len(),
        LogOutcome::NoCommits => 0,
    };
    log_op_end!(
        "log",
        duration_ms = start.elapsed().as_millis() as u64,
        log_len = log_len
    );
    Ok(outcome)
}

fn show_log_impl(repo: &dyn Repository) -> Result<LogOutcome> {
    let Some(text) = repo.read_log()? else {
        return Ok(LogOutcome::NoCommits);
    };
    let log = CommitLog::parse(&text)?;
    if log.is_empty() {
        Ok(LogOutcome::NoCommits)
    } else {
        Ok(LogOutcome::Entries(log))
    }
}
