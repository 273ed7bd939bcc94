use crate::model::TrackedFileSet;
use crate::policy::MatchMode;

/// Result of deciding how to stage one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageDecision {
    /// The path does not exist in the working directory
    NotFound,
    /// The index already counts the path as tracked; nothing to write
    AlreadyTracked,
    /// Persist `set`; `created` is true when no index existed before
    Write { set: TrackedFileSet, created: bool },
}

/// Decide how `add(path)` changes the index
///
/// Existence is checked first; when no index exists the new set holds only
/// `path`, otherwise `path` is appended unless `mode` finds it already
/// present in the persisted index text.
pub fn decide_stage(
    path: &str,
    exists: bool,
    index_text: Option<&str>,
    mode: MatchMode,
) -> StageDecision {
    if !exists {
        return StageDecision::NotFound;
    }

    match index_text {
        None => StageDecision::Write {
            set: TrackedFileSet::with_path(path),
            created: true,
        },
        Some(text) if mode.index_contains(text, path) => StageDecision::AlreadyTracked,
        Some(text) => {
            let mut set = TrackedFileSet::parse(text);
            set.insert(path);
            StageDecision::Write {
                set,
                created: false,
            }
        }
    }
}
