/// Ordered set of tracked working-directory paths
///
/// Insertion order is preserved and entries are unique by exact string
/// equality. The set only grows; nothing removes an entry and nothing checks
/// that a tracked path still exists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackedFileSet {
    paths: Vec<String>,
}

impl TrackedFileSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self { paths: Vec::new() }
    }

    /// Create a set holding a single path
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            paths: vec![path.into()],
        }
    }

    /// Parse the persisted index text (one path per line)
    ///
    /// Blank lines are skipped; duplicate lines collapse to their first
    /// occurrence.
    pub fn parse(text: &str) -> Self {
        let mut set = Self::new();
        for line in text.lines() {
            let line = line.trim_end_matches('\r');
            if !line.is_empty() {
                set.insert(line);
            }
        }
        set
    }

    /// Render the persisted index text, every line newline-terminated
    pub fn render(&self) -> String {
        let mut out = String::new();
        for path in &self.paths {
            out.push_str(path);
            out.push('\n');
        }
        out
    }

    /// Append `path` unless an identical entry is already present
    ///
    /// Returns `true` when the set changed.
    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if self.contains(&path) {
            return false;
        }
        self.paths.push(path);
        true
    }

    /// Exact membership test
    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
