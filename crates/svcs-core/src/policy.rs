//! Identifier matching policy
//!
//! Index membership, the dedup check and checkout validation all ask whether
//! a string "occurs" in persisted text. Stores written by earlier releases
//! answered that with plain substring containment over the whole file, which
//! treats `a.txt` as already tracked once `data.txt` is, and accepts any
//! fragment of a logged fingerprint as a commit id. `MatchMode` selects
//! between that legacy answer and exact matching.

use crate::errors::SvcsError;
use crate::model::{CommitLog, TrackedFileSet};

/// How tracked paths and commit ids are looked up in persisted text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Substring containment over the raw persisted text
    #[default]
    Substring,
    /// Exact line match for the index, exact fingerprint equality for the log
    Exact,
}

impl MatchMode {
    /// Whether `path` counts as already present in the persisted index text
    pub fn index_contains(&self, index_text: &str, path: &str) -> bool {
        match self {
            MatchMode::Substring => index_text.contains(path),
            MatchMode::Exact => TrackedFileSet::parse(index_text).contains(path),
        }
    }

    /// Whether `id` counts as present in the persisted log text
    ///
    /// # Errors
    ///
    /// In exact mode, log text that does not parse is `MalformedLog`.
    pub fn log_contains(&self, log_text: &str, id: &str) -> Result<bool, SvcsError> {
        match self {
            MatchMode::Substring => Ok(log_text.contains(id)),
            MatchMode::Exact => Ok(CommitLog::parse(log_text)?.contains_fingerprint(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "commit abcdef0123\nAuthor: alice\nfirst\n\n";

    #[test]
    fn test_substring_index_treats_fragment_as_tracked() {
        let index = "data.txt\n";
        assert!(MatchMode::Substring.index_contains(index, "a.txt"));
        assert!(!MatchMode::Exact.index_contains(index, "a.txt"));
        assert!(MatchMode::Exact.index_contains(index, "data.txt"));
    }

    #[test]
    fn test_substring_log_accepts_fragment() {
        assert!(MatchMode::Substring.log_contains(LOG, "abcdef").unwrap());
        assert!(!MatchMode::Exact.log_contains(LOG, "abcdef").unwrap());
        assert!(MatchMode::Exact.log_contains(LOG, "abcdef0123").unwrap());
    }

    #[test]
    fn test_substring_log_matches_author_text() {
        assert!(MatchMode::Substring.log_contains(LOG, "alice").unwrap());
        assert!(!MatchMode::Exact.log_contains(LOG, "alice").unwrap());
    }

    #[test]
    fn test_exact_lookup_reports_unreadable_log() {
        let err = MatchMode::Exact
            .log_contains("not a log\n", "abcdef")
            .unwrap_err();
        assert!(matches!(err, SvcsError::MalformedLog { line: 1, .. }));
        assert!(!MatchMode::Substring
            .log_contains("not a log\n", "abcdef")
            .unwrap());
    }

    #[test]
    fn test_exact_lookup_reads_multi_paragraph_messages() {
        let log = "commit abcdef0123\nAuthor: alice\ntitle\n\nbody\n\n";
        assert!(MatchMode::Exact.log_contains(log, "abcdef0123").unwrap());
    }

    #[test]
    fn test_default_is_substring() {
        assert_eq!(MatchMode::default(), MatchMode::Substring);
    }
}
