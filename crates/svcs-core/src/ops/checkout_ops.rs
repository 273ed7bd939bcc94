use crate::errors::{ExErrorKind, Result};
use crate::policy::MatchMode;

/// Why a checkout was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutRefusal {
    IdMissing,
    NotFound { id: String },
}

impl CheckoutRefusal {
    pub fn kind(&self) -> ExErrorKind {
        match self {
            CheckoutRefusal::IdMissing => ExErrorKind::UserInputMissing,
            CheckoutRefusal::NotFound { .. } => ExErrorKind::NotFound,
        }
    }
}

impl std::fmt::Display for CheckoutRefusal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckoutRefusal::IdMissing => f.write_str("Commit id was not passed."),
            CheckoutRefusal::NotFound { .. } => f.write_str("Commit does not exist."),
        }
    }
}

/// Outcome of validating a checkout argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutDecision<'a> {
    Refuse(CheckoutRefusal),
    /// Restore the snapshot directory named by this literal identifier
    Restore(&'a str),
}

/// Validate a checkout argument against the log
///
/// An empty id is treated as missing: under substring matching it would
/// otherwise match every log and name the snapshot root itself.
///
/// # Errors
///
/// In exact mode, a log that does not parse.
pub fn decide_checkout<'a>(
    id: Option<&'a str>,
    log_text: Option<&str>,
    mode: MatchMode,
) -> Result<CheckoutDecision<'a>> {
    let id = match id {
        Some(id) if !id.is_empty() => id,
        _ => return Ok(CheckoutDecision::Refuse(CheckoutRefusal::IdMissing)),
    };

    let known = match log_text {
        Some(text) => mode.log_contains(text, id)?,
        None => false,
    };
    if known {
        Ok(CheckoutDecision::Restore(id))
    } else {
        Ok(CheckoutDecision::Refuse(CheckoutRefusal::NotFound {
            id: id.to_string(),
        }))
    }
}

/// Refusal for an accepted id that names no snapshot directory
///
/// Substring matching accepts any fragment of a logged fingerprint; such a
/// checkout restores nothing and still reports success. Exact matching only
/// gets here when a snapshot directory was removed, which is refused.
pub fn missing_snapshot_refusal(id: &str, mode: MatchMode) -> Option<CheckoutRefusal> {
    match mode {
        MatchMode::Substring => None,
        MatchMode::Exact => Some(CheckoutRefusal::NotFound { id: id.to_string() }),
    }
}
